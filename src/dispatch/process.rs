//! Child process execution
//!
//! This module runs the external command for one file and classifies what
//! happened into a `DispatchOutcome`.

use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, ExitStatus};

use log::{debug, trace};

use super::cancel::CancelFlag;
use super::command::CommandTemplate;
use super::outcome::{CapturedOutput, DispatchOutcome};

/// Runs the external command for a single file
///
/// The orchestrator only talks to this trait, so tests can substitute a
/// scripted implementation for real processes.
pub trait Dispatcher {
    /// Dispatches `template ++ [original, destination]`
    fn dispatch(
        &mut self,
        template: &CommandTemplate,
        original: &Path,
        destination: &Path,
    ) -> DispatchOutcome;
}

/// Dispatcher that spawns real child processes
#[derive(Debug, Clone)]
pub struct ProcessDispatcher {
    dry_run: bool,
    cancel: CancelFlag,
}

impl ProcessDispatcher {
    /// Creates a dispatcher
    ///
    /// # Arguments
    /// * `dry_run` - When true, nothing is ever spawned and every dispatch is `Skipped`
    /// * `cancel` - Flag raised by the interrupt handler
    pub fn new(dry_run: bool, cancel: CancelFlag) -> Self {
        ProcessDispatcher { dry_run, cancel }
    }

    fn classify_exit(&self, status: ExitStatus, output: CapturedOutput) -> DispatchOutcome {
        if self.cancel.is_cancelled() || killed_by_interrupt(&status) {
            return DispatchOutcome::Interrupted;
        }

        if status.success() {
            DispatchOutcome::Success { output }
        } else {
            DispatchOutcome::NonZeroExit {
                code: status.code(),
                output,
            }
        }
    }
}

impl Dispatcher for ProcessDispatcher {
    fn dispatch(
        &mut self,
        template: &CommandTemplate,
        original: &Path,
        destination: &Path,
    ) -> DispatchOutcome {
        if self.dry_run {
            trace!("Dry run, not spawning {}", template.program());
            return DispatchOutcome::Skipped;
        }

        debug!("Spawning {}", template.program());
        let result = Command::new(template.program())
            .args(template.arguments(original, destination))
            .output();

        match result {
            Ok(output) => self.classify_exit(
                output.status,
                CapturedOutput::from_bytes(&output.stdout, &output.stderr),
            ),
            Err(e) if e.kind() == ErrorKind::NotFound => DispatchOutcome::CommandNotFound {
                program: template.program().to_string(),
            },
            Err(_) if self.cancel.is_cancelled() => DispatchOutcome::Interrupted,
            Err(e) => DispatchOutcome::UnexpectedError {
                message: e.to_string(),
            },
        }
    }
}

#[cfg(unix)]
fn killed_by_interrupt(status: &ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;

    const SIGINT: i32 = 2;
    status.signal() == Some(SIGINT)
}

#[cfg(not(unix))]
fn killed_by_interrupt(_status: &ExitStatus) -> bool {
    false
}
