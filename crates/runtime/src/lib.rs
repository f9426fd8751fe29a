//! Session runtime - tokio host for the pure session state machine
//!
//! The core [`Session`](braintwist_core::Session) only emits timer commands.
//! This crate turns them into real tasks and exposes the session over channels:
//!
//! - [`Scheduler`]: one abortable tokio task per timer slot (countdown, load)
//! - [`SessionRuntime`]: single-owner loop over player commands and timer events
//! - [`SessionHandle`]: async client (send, snapshots, notices, shutdown)
//! - [`SessionHost`]: blocking wrapper with its own runtime for the terminal loop
//! - [`RuntimeConfig`]: `BRAINTWIST_*` environment configuration

pub mod config;
pub mod runtime;
pub mod scheduler;

pub use braintwist_core as core;
pub use braintwist_types as types;

pub use config::RuntimeConfig;
pub use runtime::{BoxedStore, SessionHandle, SessionHost, SessionRuntime};
pub use scheduler::Scheduler;
