//! Outcome reporting
//!
//! Per-file failures are fully handled here: they are logged with the
//! attempted command and whatever the process printed, then forgotten.

use colored::Colorize;
use log::{error, info};

use crate::logging::format_message;

use super::outcome::{CapturedOutput, DispatchOutcome};

/// Logs the outcome of one dispatch
///
/// # Arguments
/// * `outcome` - What happened
/// * `command_line` - The full command that was attempted
/// * `verbose` - Also show captured output of successful runs
pub fn report_outcome(outcome: &DispatchOutcome, command_line: &str, verbose: bool) {
    match outcome {
        DispatchOutcome::Success { output } => {
            info!(
                "{}",
                format_message("  ✔ Success.", &format!("  {}", "✔ Success.".green()))
            );
            if verbose {
                report_output(output);
            }
        }
        DispatchOutcome::Skipped => {
            info!(
                "{}",
                format_message(
                    "  (Dry run: Command not executed)",
                    &format!("  {}", "(Dry run: Command not executed)".blue())
                )
            );
        }
        // The orchestrator announces the abort itself.
        DispatchOutcome::Interrupted => {}
        failure => {
            for line in failure_lines(failure, command_line) {
                error!("{line}");
            }
        }
    }
}

/// The error lines for a per-file failure, always naming the attempted command
fn failure_lines(outcome: &DispatchOutcome, command_line: &str) -> Vec<String> {
    let mut lines = match outcome {
        DispatchOutcome::CommandNotFound { program } => vec![format!(
            "  ✖ Error: Command '{program}' not found. Make sure it's in your PATH."
        )],
        DispatchOutcome::NonZeroExit { code: Some(code), .. } => {
            vec![format!("  ✖ Error executing command (exit code {code}):")]
        }
        DispatchOutcome::NonZeroExit { code: None, .. } => {
            vec!["  ✖ Error executing command (terminated by signal):".to_string()]
        }
        DispatchOutcome::UnexpectedError { message } => {
            vec![format!("  ✖ An unexpected error occurred: {message}")]
        }
        _ => return Vec::new(),
    };
    lines.push(format!("    Command: {command_line}"));

    if let DispatchOutcome::NonZeroExit { output, .. } = outcome {
        lines.extend(output_lines(output));
    }
    lines
}

fn output_lines(output: &CapturedOutput) -> impl Iterator<Item = String> + '_ {
    [("STDOUT", &output.stdout), ("STDERR", &output.stderr)]
        .into_iter()
        .filter(|(_, text)| !text.is_empty())
        .map(|(label, text)| format!("    {label}: {text}"))
}

fn report_output(output: &CapturedOutput) {
    for line in output_lines(output) {
        info!("{}", format_message(&line, &line.cyan().to_string()));
    }
}
