//! Logging setup
//!
//! Everything the run reports goes through `log`. The terminal gets
//! level-coloured lines on stdout, an optional file gets timestamped records.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::SecondsFormat;
use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

/// How much the run reports, chosen by repeating `-v`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Run parameters, per-file progress, failures and the summary
    Info,
    /// Adds scan details and headless progress lines
    Debug,
    /// Adds every spawned process
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }

    /// Level for the number of `-v` flags given before the command
    pub fn from_occurrences(occurrences: u8) -> Self {
        match occurrences {
            0 => LogLevel::Info,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

/// Initialise the logger
///
/// Terminal output goes to stdout so it shares the line discipline of the
/// progress bar. When `log_file` is given, every record is also appended
/// there with a timestamp, level and target.
///
/// # Errors
/// Returns an error if the log file cannot be opened or a logger is already set
pub fn init_logger(verbosity: LogLevel, log_file: Option<&Path>) -> Result<()> {
    let mut logger = Dispatch::new()
        .level(verbosity.to_level_filter())
        .chain(terminal_dispatch());

    if let Some(path) = log_file {
        logger = logger.chain(file_dispatch(path)?);
    }

    logger.apply().context("Logger already initialised")?;
    log::debug!("Logger initialized with verbosity level: {verbosity:?}");

    Ok(())
}

fn terminal_dispatch() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::White)
        .debug(Color::White)
        .trace(Color::BrightBlack);

    Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "\x1B[{}m{}\x1B[0m",
                colors.get_color(&record.level()).to_fg_str(),
                message
            ))
        })
        .chain(std::io::stdout())
}

fn file_dispatch(path: &Path) -> Result<Dispatch> {
    let file = fern::log_file(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    Ok(Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                record.level(),
                record.target(),
                message
            ))
        })
        .chain(file))
}

/// Whether stdout is attached to a terminal
pub fn stdout_is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}

/// Picks the coloured variant of a message only for an interactive stdout
pub fn format_message(message: &str, colored_message: &str) -> String {
    if stdout_is_terminal() {
        colored_message.to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_log_level_from_occurrences() {
        assert_eq!(LogLevel::from_occurrences(0), LogLevel::Info);
        assert_eq!(LogLevel::from_occurrences(1), LogLevel::Debug);
        assert_eq!(LogLevel::from_occurrences(2), LogLevel::Trace);
        assert_eq!(LogLevel::from_occurrences(255), LogLevel::Trace);
    }

    #[test]
    fn test_log_level_filters() {
        assert_eq!(LogLevel::Info.to_level_filter(), LevelFilter::Info);
        assert_eq!(LogLevel::Debug.to_level_filter(), LevelFilter::Debug);
        assert_eq!(LogLevel::Trace.to_level_filter(), LevelFilter::Trace);
    }

    #[test]
    fn test_unwritable_log_file() {
        let temp_dir = tempdir().unwrap();
        let error = file_dispatch(&temp_dir.path().join("missing").join("run.log")).unwrap_err();
        assert!(error.to_string().starts_with("Failed to open log file"));
    }

    #[test]
    fn test_format_message() {
        // Depends on whether the test runner owns a terminal.
        let plain = "Found 2 file(s) to process.";
        let colored = "\x1B[36mFound 2 file(s) to process.\x1B[0m";

        let result = format_message(plain, colored);
        assert!(result == plain || result == colored);
    }
}
