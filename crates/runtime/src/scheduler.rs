//! Tokio-backed timers for the session's task slots.
//!
//! One task per slot: starting a countdown or scheduling a load aborts the
//! previous handle of that kind. Aborting is best effort; a completion that was
//! already queued still reaches the session, which drops it by ticket.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant};

use braintwist_core::{SessionEvent, TimerCommand};

pub struct Scheduler {
    events: mpsc::UnboundedSender<SessionEvent>,
    countdown: Option<JoinHandle<()>>,
    load: Option<JoinHandle<()>>,
}

impl Scheduler {
    pub fn new(events: mpsc::UnboundedSender<SessionEvent>) -> Self {
        Self {
            events,
            countdown: None,
            load: None,
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn apply(&mut self, command: TimerCommand) {
        match command {
            TimerCommand::StartCountdown { ticket, period_ms } => {
                abort(&mut self.countdown);
                let period = Duration::from_millis(period_ms.max(1) as u64);
                let events = self.events.clone();
                self.countdown = Some(tokio::spawn(async move {
                    let mut interval = interval_at(Instant::now() + period, period);
                    loop {
                        interval.tick().await;
                        if events.send(SessionEvent::CountdownTick(ticket)).is_err() {
                            break;
                        }
                    }
                }));
            }
            TimerCommand::StopCountdown => abort(&mut self.countdown),
            TimerCommand::ScheduleLoad { ticket, delay_ms } => {
                abort(&mut self.load);
                let delay = Duration::from_millis(delay_ms as u64);
                let events = self.events.clone();
                self.load = Some(tokio::spawn(async move {
                    sleep(delay).await;
                    let _ = events.send(SessionEvent::LoadElapsed(ticket));
                }));
            }
            TimerCommand::CancelLoad => abort(&mut self.load),
        }
    }

    pub fn countdown_running(&self) -> bool {
        self.countdown.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn load_pending(&self) -> bool {
        self.load.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn shutdown(&mut self) {
        abort(&mut self.countdown);
        abort(&mut self.load);
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn abort(slot: &mut Option<JoinHandle<()>>) {
    if let Some(handle) = slot.take() {
        handle.abort();
    }
}
