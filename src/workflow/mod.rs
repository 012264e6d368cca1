//! Workflow module
//!
//! This module contains components for orchestrating a run.

mod context;
mod engine;

pub use context::{RunContext, RunCounters, RunState};
pub use engine::{RunOptions, RunStatus, process_files};
