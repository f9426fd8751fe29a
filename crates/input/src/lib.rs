//! Terminal input module (session-facing).
//!
//! Maps `crossterm` key events into [`crate::types::SessionCommand`]s against
//! the latest [`braintwist_core::SessionSnapshot`]. Answer focus lives in an
//! [`AnswerCursor`] on the input side; the session only sees whole slot values.

pub mod cursor;
pub mod map;

pub use braintwist_types as types;

pub use cursor::AnswerCursor;
pub use map::{map_key, should_quit};
