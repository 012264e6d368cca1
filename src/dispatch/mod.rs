//! Command dispatch module
//!
//! This module contains components for running the external command once per
//! file and classifying the result.

mod cancel;
mod command;
mod outcome;
mod process;
mod report;

pub use cancel::CancelFlag;
pub use command::CommandTemplate;
pub use outcome::{CapturedOutput, DispatchOutcome};
pub use process::{Dispatcher, ProcessDispatcher};
pub use report::report_outcome;
