//! Scheduled task bookkeeping
//!
//! The session owns one [`TaskSlot`] per kind of delayed work (countdown,
//! puzzle load). Arming a slot bumps its generation and hands out a
//! [`TaskTicket`]; a completion is only honored while its ticket matches the
//! live generation. Cancelled or superseded tasks may still deliver late
//! completions, and those are dropped here rather than racing newer state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Countdown,
    Load,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskTicket {
    pub kind: TaskKind,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSlot {
    kind: TaskKind,
    generation: u64,
    armed: bool,
}

impl TaskSlot {
    pub fn new(kind: TaskKind) -> Self {
        Self {
            kind,
            generation: 0,
            armed: false,
        }
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Start a new generation, invalidating any outstanding ticket.
    pub fn arm(&mut self) -> TaskTicket {
        self.generation = self.generation.wrapping_add(1);
        self.armed = true;
        TaskTicket {
            kind: self.kind,
            generation: self.generation,
        }
    }

    /// Returns whether a task was pending.
    pub fn cancel(&mut self) -> bool {
        std::mem::replace(&mut self.armed, false)
    }

    pub fn accepts(&self, ticket: TaskTicket) -> bool {
        self.armed && ticket.kind == self.kind && ticket.generation == self.generation
    }
}

/// Instructions for whoever drives real timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TimerCommand {
    /// Deliver `CountdownTick(ticket)` every `period_ms` until stopped.
    StartCountdown { ticket: TaskTicket, period_ms: u32 },
    StopCountdown,
    /// Deliver `LoadElapsed(ticket)` once after `delay_ms`.
    ScheduleLoad { ticket: TaskTicket, delay_ms: u32 },
    CancelLoad,
}
