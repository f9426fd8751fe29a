//! Terminal rendering for the puzzle session.
//!
//! A small text-card renderer: the session view lays a snapshot out as styled
//! lines, writes them into a framebuffer, and the terminal renderer repaints
//! only the rows that changed.
//!
//! - [`SessionView`] is pure and unit-tested
//! - [`TerminalRenderer`] owns the crossterm side (raw mode, alternate screen)

pub mod fb;
pub mod renderer;
pub mod session_view;

pub use braintwist_core as core;
pub use braintwist_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb, Tone};
pub use renderer::{changed_rows, encode_rows_into, TerminalRenderer};
pub use session_view::{Overlay, SessionView, Span, ViewLine, Viewport};
