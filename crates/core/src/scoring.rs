//! Scoring module - points for a correct answer
//!
//! `points = base(difficulty) + floor(time_remaining / 2)`; failures and
//! timeouts award nothing.

use crate::types::Difficulty;

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub base: u32,
    pub time_bonus: u32,
    pub total: u32,
}

/// Time bonus: one point per two whole seconds left.
pub fn time_bonus(time_remaining: u32) -> u32 {
    time_remaining / 2
}

pub fn calculate_score(difficulty: Difficulty, time_remaining: u32) -> ScoreResult {
    let base = difficulty.base_points();
    let time_bonus = time_bonus(time_remaining);
    ScoreResult {
        base,
        time_bonus,
        total: base.saturating_add(time_bonus),
    }
}

/// Shorthand for `calculate_score(..).total`.
pub fn points_for(difficulty: Difficulty, time_remaining: u32) -> u32 {
    calculate_score(difficulty, time_remaining).total
}
