//! Workflow engine
//!
//! This module contains the engine that drives discovery, path mirroring and
//! dispatch for a whole run.

use std::fs::create_dir_all;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use colored::Colorize;
use log::{debug, error, info};

use crate::discovery::{FilePattern, scan_directory};
use crate::dispatch::{CancelFlag, CommandTemplate, Dispatcher, report_outcome};
use crate::logging::format_message;
use crate::path_gen::derive_destination;
use crate::progress::{ProgressReporter, files_label};

use super::context::{RunContext, RunCounters};

/// Options for a run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory searched recursively for files
    pub source_dir: PathBuf,
    /// Glob pattern selecting the files
    pub file_pattern: String,
    /// Match the pattern case-insensitively
    pub ignore_case: bool,
    /// The external command and its fixed arguments
    pub command: CommandTemplate,
    /// Root under which the source tree is mirrored
    pub output_basedir: PathBuf,
    /// Extra directory between the root and the mirrored path, may be empty
    pub output_subdir: PathBuf,
    /// Prefix for every destination file name
    pub output_prefix: String,
    /// Print commands instead of running them
    pub dry_run: bool,
    /// Show captured output of successful commands
    pub verbose: bool,
}

impl RunOptions {
    /// The directory mirrored paths are placed under
    pub fn output_dir(&self) -> PathBuf {
        if self.output_subdir.as_os_str().is_empty() {
            self.output_basedir.clone()
        } else {
            self.output_basedir.join(&self.output_subdir)
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Nothing matched the pattern; no processing happened
    NoMatches,
    /// Every discovered file was visited
    Completed(RunCounters),
    /// The operator cancelled the run
    Aborted(RunCounters),
}

/// Runs the whole pipeline
///
/// 1. Validate the source directory and discover matching files
/// 2. For each file, derive its mirrored destination
/// 3. Dispatch the command and report the outcome
/// 4. Print the summary
///
/// Per-file failures are logged and skipped. Only an interrupt stops the loop.
///
/// # Arguments
/// * `options` - What to run and where
/// * `dispatcher` - Executes the command for one file
/// * `reporter` - Receives progress updates
/// * `cancel` - Checked between files
///
/// # Returns
/// * `Result<RunStatus>` - How the run ended
///
/// # Errors
/// * Returns an error if the source directory is missing or not a directory
/// * Returns an error if the pattern is invalid
/// * Returns an error if the output directory cannot be created
pub fn process_files(
    options: &RunOptions,
    dispatcher: &mut dyn Dispatcher,
    reporter: &mut dyn ProgressReporter,
    cancel: &CancelFlag,
) -> Result<RunStatus> {
    let mut context = RunContext::new();
    let output_dir = options.output_dir();

    let pattern = FilePattern::with_case(&options.file_pattern, !options.ignore_case)?;

    info!(
        "{}",
        format_message(
            "Scanning for files...",
            &"Scanning for files...".cyan().to_string()
        )
    );
    let files = scan_directory(&options.source_dir, &pattern, Some(&output_dir))?;

    if files.is_empty() {
        let message = format!(
            "No files matching '{}' found in '{}'. Exiting.",
            options.file_pattern,
            options.source_dir.display()
        );
        info!("{}", format_message(&message, &message.yellow().to_string()));
        context.complete();
        return Ok(RunStatus::NoMatches);
    }

    let total = files.len();
    context.begin_processing(total);

    let message = format!("Found {total} file(s) to process.");
    info!("{}", format_message(&message, &message.cyan().to_string()));

    create_dir_all(&output_dir).map_err(|e| {
        anyhow!(
            "Failed to create output directory {}: {}",
            output_dir.display(),
            e
        )
    })?;
    debug!("Ensured output directory {}", output_dir.display());

    info!(
        "{}",
        format_message(
            "--- Starting File Processing ---",
            &"--- Starting File Processing ---".yellow().to_string()
        )
    );
    reporter.render(0, total, &files_label(0, total));

    for file in &files {
        if cancel.is_cancelled() {
            return Ok(abort(&mut context, reporter));
        }

        let position = context.next_position();
        reporter.suspend(&mut || {
            info!(
                "{}",
                format_message(
                    &format!("Processing ({position}/{total}): {}", file.path.display()),
                    &format!(
                        "{} {}",
                        format!("Processing ({position}/{total}):").yellow(),
                        file.path.display().to_string().blue()
                    )
                )
            )
        });

        let destination = match derive_destination(
            &options.source_dir,
            &file.path,
            &output_dir,
            &options.output_prefix,
        ) {
            Ok(destination) => destination,
            Err(e) => {
                reporter.suspend(&mut || error!("  ✖ Error: {e}"));
                context.advance();
                continue;
            }
        };

        let command_line = options.command.command_line(&file.path, &destination);
        reporter.suspend(&mut || {
            info!(
                "{}",
                format_message(
                    &format!("  Output to: {}", destination.display()),
                    &format!(
                        "  {} {}",
                        "Output to:".yellow(),
                        destination.display().to_string().blue()
                    )
                )
            );
            info!(
                "{}",
                format_message(
                    &format!("  Command: {command_line}"),
                    &format!("  {} {}", "Command:".yellow(), command_line.cyan())
                )
            );
        });

        reporter.render(position - 1, total, &files_label(position, total));
        let outcome = dispatcher.dispatch(&options.command, &file.path, &destination);
        context.advance();

        if outcome.is_fatal() {
            return Ok(abort(&mut context, reporter));
        }
        reporter.suspend(&mut || report_outcome(&outcome, &command_line, options.verbose));
    }

    reporter.render(total, total, &files_label(total, total));
    reporter.finish();
    context.complete();

    let counters = context.counters();
    info!(
        "{}",
        format_message(
            "--- Processing Complete ---",
            &"--- Processing Complete ---".yellow().to_string()
        )
    );
    let summary = format!(
        "Summary: Found {} files, successfully processed {}.",
        counters.total, counters.processed
    );
    info!("{}", format_message(&summary, &summary.green().to_string()));

    Ok(RunStatus::Completed(counters))
}

fn abort(context: &mut RunContext, reporter: &mut dyn ProgressReporter) -> RunStatus {
    reporter.abandon();
    context.abort();
    error!("  ✖ Closing... ");
    RunStatus::Aborted(context.counters())
}
