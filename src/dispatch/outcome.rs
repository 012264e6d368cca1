//! Dispatch outcomes
//!
//! Every dispatch attempt ends in exactly one of these variants. Only
//! `Interrupted` stops the run.

/// Captured standard output and standard error of a child process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CapturedOutput {
    /// Builds captured output from raw bytes, replacing invalid UTF-8
    pub fn from_bytes(stdout: &[u8], stderr: &[u8]) -> Self {
        CapturedOutput {
            stdout: String::from_utf8_lossy(stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        }
    }
}

/// Result of dispatching the external command for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The process exited with status 0
    Success { output: CapturedOutput },
    /// Dry run, nothing was executed
    Skipped,
    /// The program could not be located
    CommandNotFound { program: String },
    /// The process ran but exited with a non-zero status
    ///
    /// `code` is `None` when the process was terminated by a signal.
    NonZeroExit {
        code: Option<i32>,
        output: CapturedOutput,
    },
    /// The operator cancelled the run while the command was executing
    Interrupted,
    /// Any other failure while spawning or waiting on the process
    UnexpectedError { message: String },
}

impl DispatchOutcome {
    /// Whether this outcome must stop the run
    pub fn is_fatal(&self) -> bool {
        matches!(self, DispatchOutcome::Interrupted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_interrupted_is_fatal() {
        assert!(DispatchOutcome::Interrupted.is_fatal());
        assert!(!DispatchOutcome::Skipped.is_fatal());
        assert!(
            !DispatchOutcome::CommandNotFound {
                program: "nope".to_string()
            }
            .is_fatal()
        );
        assert!(
            !DispatchOutcome::NonZeroExit {
                code: Some(1),
                output: CapturedOutput::default()
            }
            .is_fatal()
        );
    }

    #[test]
    fn test_captured_output_is_trimmed() {
        let output = CapturedOutput::from_bytes(b"hello\n", b"  warn \n");
        assert_eq!(output.stdout, "hello");
        assert_eq!(output.stderr, "warn");
    }
}
