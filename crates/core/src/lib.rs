//! Core puzzle engine - pure, seedable, and testable
//!
//! This crate contains puzzle generation, answer validation, scoring, and the
//! session state machine. It has **no dependencies** on terminals, async
//! runtimes, or I/O:
//!
//! - **Seedable**: a fixed seed reproduces the same puzzles (tests, benches)
//! - **Timer-free**: the session emits [`TimerCommand`]s and consumes tick and
//!   load events, so any host (tokio, a test loop) can drive it
//! - **Total**: malformed input degrades (fallback puzzle, non-match) instead of failing
//!
//! # Module Structure
//!
//! - [`bank`]: fixed word lists and logic items per difficulty
//! - [`puzzle`]: puzzle payloads per category and their solutions
//! - [`generator`]: procedural generation from a [`SimpleRng`]
//! - [`validate`]: category-specific answer checks
//! - [`scoring`]: base points plus time bonus
//! - [`task`]: generation-tagged task slots for countdown and load timers
//! - [`session`]: the round state machine
//! - [`snapshot`]: render snapshots and round reports
//! - [`progress`], [`achievements`]: per-user records and unlock rules
//!
//! # Example
//!
//! ```
//! use braintwist_core::{Session, SessionOptions};
//! use braintwist_core::types::{Category, Phase, SessionCommand};
//!
//! let mut session = Session::for_category(Category::Math, SessionOptions::immediate());
//! session.open();
//! assert_eq!(session.phase(), Phase::Setup);
//!
//! session.dispatch(SessionCommand::Start.into());
//! assert_eq!(session.phase(), Phase::Playing);
//! assert_eq!(session.time_remaining(), Some(60));
//! ```

pub mod achievements;
pub mod bank;
pub mod generator;
pub mod progress;
pub mod puzzle;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod task;
pub mod validate;

pub use braintwist_types as types;

// Re-export commonly used types for convenience
pub use achievements::{default_catalog, unlocked, Achievement, UnlockCondition};
pub use generator::PuzzleGenerator;
pub use progress::{MemoryProgressStore, ProgressRecord, ProgressStats, ProgressStore};
pub use puzzle::{
    LogicPuzzle, MathPuzzle, Operator, PatternPuzzle, Puzzle, PuzzleKind, Solution, WordPuzzle,
};
pub use rng::SimpleRng;
pub use scoring::{calculate_score, points_for, ScoreResult};
pub use session::{Dispatch, Notice, Session, SessionEvent, SessionOptions};
pub use snapshot::{format_clock, PuzzleView, RoundReport, SessionSnapshot};
pub use task::{TaskKind, TaskSlot, TaskTicket, TimerCommand};
