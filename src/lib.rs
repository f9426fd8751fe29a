//! BrainTwist (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, integration
//! tests, and benches share `braintwist::{core,input,runtime,term,types}`.

pub use braintwist_core as core;
pub use braintwist_input as input;
pub use braintwist_runtime as runtime;
pub use braintwist_term as term;
pub use braintwist_types as types;
