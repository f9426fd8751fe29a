//! Answer focus for slot-based puzzles.

use braintwist_core::SessionSnapshot;

/// Focused answer slot and highlighted option.
///
/// Refocuses the first editable slot whenever a new round starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerCursor {
    round_id: Option<u64>,
    slot: usize,
    choice: usize,
}

impl AnswerCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn choice(&self) -> usize {
        self.choice
    }

    pub fn sync(&mut self, snapshot: &SessionSnapshot) {
        if self.round_id == Some(snapshot.round_id) {
            return;
        }
        self.round_id = Some(snapshot.round_id);
        self.slot = editable_slots(snapshot).next().unwrap_or(0);
        self.choice = 0;
    }

    /// Move to the next editable slot; stays put on the last one.
    pub fn advance(&mut self, snapshot: &SessionSnapshot) {
        let current = self.slot;
        if let Some(next) = editable_slots(snapshot).find(|&s| s > current) {
            self.slot = next;
        }
    }

    /// Move to the previous editable slot; stays put on the first one.
    pub fn retreat(&mut self, snapshot: &SessionSnapshot) {
        let current = self.slot;
        if let Some(prev) = editable_slots(snapshot).filter(|&s| s < current).last() {
            self.slot = prev;
        }
    }

    pub fn select(&mut self, index: usize, len: usize) -> bool {
        if index < len {
            self.choice = index;
            true
        } else {
            false
        }
    }

    pub fn cycle_choice(&mut self, len: usize, forward: bool) {
        if len == 0 {
            return;
        }
        self.choice = if forward {
            (self.choice + 1) % len
        } else {
            (self.choice + len - 1) % len
        };
    }
}

fn editable_slots(snapshot: &SessionSnapshot) -> impl Iterator<Item = usize> + '_ {
    snapshot
        .puzzle
        .iter()
        .flat_map(|p| p.editable.iter().enumerate())
        .filter_map(|(slot, &editable)| editable.then_some(slot))
}
