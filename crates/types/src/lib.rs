//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! They are plain data with string tags so the same values can flow through the
//! engine, the terminal front end, and serialized round reports.
//!
//! # Difficulty Tiers
//!
//! | Tier | Time budget | Base points | Pattern cells |
//! |------|-------------|-------------|---------------|
//! | `easy` | 60s | 10 | 3 |
//! | `medium` | 45s | 20 | 4 |
//! | `hard` | 30s | 30 | 5 |
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `COUNTDOWN_PERIOD_MS` | 1000 | One countdown step (one second of budget) |
//! | `LOAD_DELAY_MS` | 800 | Simulated fetch latency before a new puzzle shows |
//!
//! # Examples
//!
//! ```
//! use braintwist_types::{Category, Difficulty, Phase};
//!
//! let category = Category::from_str("Math").unwrap();
//! assert_eq!(category.as_str(), "math");
//!
//! assert_eq!(Difficulty::Medium.time_budget_secs(), 45);
//! assert!(Phase::Failed.is_terminal());
//! ```

use serde::{Deserialize, Serialize};

/// Lives granted at the start of a game.
pub const MAX_LIVES: u8 = 3;

/// Countdown step interval (milliseconds).
pub const COUNTDOWN_PERIOD_MS: u32 = 1000;

/// Simulated puzzle fetch latency (milliseconds).
pub const LOAD_DELAY_MS: u32 = 800;

/// Inclusive value range for pattern cells.
pub const PATTERN_MIN: u32 = 1;
pub const PATTERN_MAX: u32 = 5;

/// Puzzle family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Pattern,
    Word,
    Math,
    Logic,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Pattern,
        Category::Word,
        Category::Math,
        Category::Logic,
    ];

    /// Parse category from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pattern" => Some(Category::Pattern),
            "word" => Some(Category::Word),
            "math" => Some(Category::Math),
            "logic" => Some(Category::Logic),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Pattern => "pattern",
            Category::Word => "word",
            Category::Math => "math",
            Category::Logic => "logic",
        }
    }

    /// Player-facing instructions for the category.
    pub fn instructions(&self) -> &'static str {
        match self {
            Category::Pattern => "Identify the pattern and fill in the missing value.",
            Category::Word => "Unscramble the letters to form a word.",
            Category::Math => "Solve the math problem.",
            Category::Logic => "Analyze the statement and select the logical conclusion.",
        }
    }

    /// Cycle to the next category (wraps around)
    pub fn next(&self) -> Self {
        match self {
            Category::Pattern => Category::Word,
            Category::Word => Category::Math,
            Category::Math => Category::Logic,
            Category::Logic => Category::Pattern,
        }
    }
}

/// Difficulty tier, selectable before a round starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Parse difficulty from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Seconds on the clock when a round starts.
    pub fn time_budget_secs(&self) -> u32 {
        match self {
            Difficulty::Easy => 60,
            Difficulty::Medium => 45,
            Difficulty::Hard => 30,
        }
    }

    /// Points for a correct answer before the time bonus.
    pub fn base_points(&self) -> u32 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 20,
            Difficulty::Hard => 30,
        }
    }

    /// Number of cells in a pattern grid.
    pub fn pattern_len(&self) -> usize {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 4,
            Difficulty::Hard => 5,
        }
    }
}

/// Round phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Setup,
    Playing,
    Success,
    Failed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::Playing => "playing",
            Phase::Success => "success",
            Phase::Failed => "failed",
        }
    }

    /// A round has ended (either way).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Success | Phase::Failed)
    }
}

/// Operations the presentation layer forwards to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionCommand {
    SetDifficulty { difficulty: Difficulty },
    SetCategory { category: Category },
    Start,
    ChangeAnswer { slot: usize, value: String },
    Submit,
    Next,
    Retry,
}

impl SessionCommand {
    /// Short tag, used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionCommand::SetDifficulty { .. } => "setDifficulty",
            SessionCommand::SetCategory { .. } => "setCategory",
            SessionCommand::Start => "start",
            SessionCommand::ChangeAnswer { .. } => "changeAnswer",
            SessionCommand::Submit => "submit",
            SessionCommand::Next => "next",
            SessionCommand::Retry => "retry",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_tags() {
        for category in Category::ALL {
            assert_eq!(Category::from_str(category.as_str()), Some(category));
        }
        assert_eq!(Category::from_str(" LOGIC "), Some(Category::Logic));
        assert_eq!(Category::from_str("riddle"), None);
    }

    #[test]
    fn category_cycle_visits_all() {
        let mut c = Category::Pattern;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(c);
            c = c.next();
        }
        assert_eq!(seen, Category::ALL.to_vec());
        assert_eq!(c, Category::Pattern);
    }

    #[test]
    fn difficulty_tables() {
        assert_eq!(Difficulty::Easy.time_budget_secs(), 60);
        assert_eq!(Difficulty::Hard.time_budget_secs(), 30);
        assert_eq!(Difficulty::Medium.base_points(), 20);
        assert_eq!(Difficulty::Hard.pattern_len(), 5);
        assert_eq!(Difficulty::from_str("Medium"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::default(), Difficulty::Easy);
    }

    #[test]
    fn command_serializes_with_type_tag() {
        let cmd = SessionCommand::ChangeAnswer {
            slot: 0,
            value: "7".to_string(),
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["type"], "changeAnswer");
        assert_eq!(json["slot"], 0);

        let diff: SessionCommand =
            serde_json::from_str(r#"{"type":"setDifficulty","difficulty":"hard"}"#).unwrap();
        assert_eq!(
            diff,
            SessionCommand::SetDifficulty {
                difficulty: Difficulty::Hard
            }
        );
    }
}
