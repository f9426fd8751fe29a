//! Render-facing snapshots and round reports.

use serde::{Deserialize, Serialize};

use crate::puzzle::Puzzle;
use crate::types::{Category, Difficulty, Phase};

/// What the presentation layer needs to draw a puzzle (the solution stays inside the engine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleView {
    /// `None` for the fallback puzzle.
    pub category: Option<Category>,
    pub instructions: String,
    pub prompt: Vec<String>,
    pub options: Option<Vec<String>>,
    /// Per answer slot: whether the player types into it.
    pub editable: Vec<bool>,
}

impl From<&Puzzle> for PuzzleView {
    fn from(puzzle: &Puzzle) -> Self {
        Self {
            category: puzzle.category(),
            instructions: puzzle.instructions().to_string(),
            prompt: puzzle.prompt(),
            options: puzzle.options().map(<[String]>::to_vec),
            editable: (0..puzzle.slot_count())
                .map(|slot| puzzle.is_editable(slot))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub category: Option<Category>,
    pub category_tag: String,
    pub difficulty: Difficulty,
    pub phase: Phase,
    pub loading: bool,
    pub puzzle: Option<PuzzleView>,
    pub answers: Vec<String>,
    pub attempts: u32,
    pub lives: u8,
    pub score: u32,
    pub time_remaining: Option<u32>,
    pub last_points: u32,
    pub round_id: u64,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            category: None,
            category_tag: String::new(),
            difficulty: Difficulty::default(),
            phase: Phase::Setup,
            loading: true,
            puzzle: None,
            answers: Vec::new(),
            attempts: 0,
            lives: crate::types::MAX_LIVES,
            score: 0,
            time_remaining: None,
            last_points: 0,
            round_id: 0,
        }
    }
}

impl SessionSnapshot {
    /// Inputs accept edits.
    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing && !self.loading
    }

    /// Difficulty and category buttons are enabled.
    pub fn selectable(&self) -> bool {
        self.phase != Phase::Playing && !self.loading
    }
}

/// Round outcome handed to the progress collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundReport {
    pub completed: bool,
    /// Points earned by this round (zero unless completed).
    pub score: u32,
    /// Seconds spent, i.e. budget minus time remaining.
    pub time_taken: u32,
}

/// `m:ss`
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
