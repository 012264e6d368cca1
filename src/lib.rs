//! Batch file dispatcher
//!
//! Finds every file under a source directory whose name matches a glob
//! pattern and runs an external command once per file with the original path
//! and a mirrored destination path appended.

use anyhow::Result;
use clap::ArgMatches;
use colored::Colorize;
use log::info;

pub mod cli;
pub mod config;
pub mod constants;
pub mod discovery;
pub mod dispatch;
pub mod errors;
pub mod logging;
pub mod path_gen;
pub mod progress;
pub mod workflow;

use crate::dispatch::{CancelFlag, ProcessDispatcher};
use crate::logging::{format_message, stdout_is_terminal};
use crate::progress::{LogProgress, ProgressReporter, TerminalProgress};
use crate::workflow::{RunOptions, RunStatus, process_files};

pub mod prelude {
    pub use crate::cli::{build_run_options, get_log_file, get_matches, get_verbosity};
    pub use crate::errors::{
        Error, Result, config_parsing_error, file_operation_error, generic_error,
        glob_pattern_error, invalid_filename_error, not_a_directory_error,
        path_creation_error, path_operation_error,
    };
    pub use crate::logging::{LogLevel, format_message, init_logger};
    pub use crate::perform_processing_based_on_arguments;
    pub use crate::workflow::{RunCounters, RunOptions, RunStatus};
}

/// Runs the dispatcher for parsed command-line arguments
///
/// Reads the configured defaults, installs the interrupt handler and picks a
/// progress reporter suited to the terminal before handing over to the
/// workflow engine.
///
/// # Errors
/// Returns an error for every run-terminating condition: unreadable
/// configuration, invalid source directory, invalid pattern
pub fn perform_processing_based_on_arguments(matches: &ArgMatches) -> Result<RunStatus> {
    let settings = config::read_settings(cli::get_config_option(matches))?;
    let options = cli::build_run_options(matches, &settings)?;

    log_run_parameters(&options);

    let cancel = CancelFlag::new();
    cancel.install_interrupt_handler()?;

    let mut dispatcher = ProcessDispatcher::new(options.dry_run, cancel.clone());
    let mut reporter: Box<dyn ProgressReporter> = if stdout_is_terminal() {
        Box::new(TerminalProgress::stdout()?)
    } else {
        Box::new(LogProgress::new())
    };

    process_files(&options, &mut dispatcher, reporter.as_mut(), &cancel)
}

fn log_run_parameters(options: &RunOptions) {
    let parameters = [
        ("Source Directory", options.source_dir.display().to_string()),
        ("File Pattern", options.file_pattern.clone()),
        ("Command Prefix", format!("{:?}", options.command.tokens())),
        ("Dry Run", options.dry_run.to_string()),
        ("Verbose Mode", options.verbose.to_string()),
        ("Output File Prefix", format!("'{}'", options.output_prefix)),
        ("Output Directory", options.output_dir().display().to_string()),
    ];

    info!(
        "{}",
        format_message(
            "Starting with arguments:",
            &"Starting with arguments:".cyan().to_string()
        )
    );
    for (label, value) in parameters {
        info!(
            "{}",
            format_message(
                &format!("  {label}: {value}"),
                &format!("  {} {value}", format!("{label}:").cyan())
            )
        );
    }
    info!("{}", format_message(&"-".repeat(40), &"-".repeat(40).cyan().to_string()));
}
