//! Progress reporting
//!
//! The orchestrator drives a `ProgressReporter`; whether that draws an
//! in-place terminal bar or just logs is decided once at startup.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use log::debug;

use crate::constants::{PROGRESS_BAR_WIDTH, PROGRESS_DECIMALS, PROGRESS_PREFIX};

/// Receives progress updates from the orchestrator
pub trait ProgressReporter {
    /// Shows `current` out of `total` with a trailing label
    ///
    /// Callers never pass `total == 0` or `current > total`.
    fn render(&mut self, current: usize, total: usize, label: &str);

    /// Runs `output` with the status line out of the way
    fn suspend(&mut self, output: &mut dyn FnMut()) {
        output();
    }

    /// Removes the status line after an abort
    fn abandon(&mut self);

    /// Leaves the final state on screen
    fn finish(&mut self);
}

/// The standard "(N/total files)" label
pub fn files_label(current: usize, total: usize) -> String {
    format!("({current}/{total} files)")
}

/// Formats the percentage of `current` out of `total`
pub fn format_percent(current: usize, total: usize, decimals: usize) -> String {
    let fraction = if total == 0 {
        0.0
    } else {
        (current.min(total) as f64) / (total as f64)
    };
    format!("{:.*}", decimals, 100.0 * fraction)
}

/// Bar style: `Progress: |████----| 25.0% (1/4 files)`
///
/// indicatif only offers an integer percentage, so `pct` is a custom key.
pub fn bar_style(width: usize, decimals: usize) -> Result<ProgressStyle> {
    let template = format!("{{prefix:.yellow}} |{{bar:{width}.green}}| {{pct}}% {{msg:.yellow}}");
    Ok(ProgressStyle::with_template(&template)?
        .with_key(
            "pct",
            move |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                let total = state.len().unwrap_or(0) as usize;
                let _ = w.write_str(&format_percent(state.pos() as usize, total, decimals));
            },
        )
        .progress_chars("█-"))
}

/// In-place progress bar for interactive terminals
pub struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    /// A bar on stdout with the default width and precision
    pub fn stdout() -> Result<Self> {
        TerminalProgress::new(
            ProgressDrawTarget::stdout(),
            PROGRESS_BAR_WIDTH,
            PROGRESS_DECIMALS,
        )
    }

    pub fn new(target: ProgressDrawTarget, width: usize, decimals: usize) -> Result<Self> {
        let bar = ProgressBar::with_draw_target(None, target);
        bar.set_style(bar_style(width, decimals)?);
        bar.set_prefix(PROGRESS_PREFIX);
        Ok(TerminalProgress { bar })
    }

    /// The underlying bar
    pub fn bar(&self) -> &ProgressBar {
        &self.bar
    }
}

impl ProgressReporter for TerminalProgress {
    fn render(&mut self, current: usize, total: usize, label: &str) {
        self.bar.set_length(total as u64);
        self.bar.set_position(current as u64);
        self.bar.set_message(label.to_string());
    }

    fn suspend(&mut self, output: &mut dyn FnMut()) {
        self.bar.suspend(output);
    }

    fn abandon(&mut self) {
        self.bar.finish_and_clear();
    }

    fn finish(&mut self) {
        self.bar.finish();
    }
}

/// Non-interactive reporter that logs progress at debug level
#[derive(Debug)]
pub struct LogProgress {
    decimals: usize,
}

impl LogProgress {
    pub fn new() -> Self {
        LogProgress {
            decimals: PROGRESS_DECIMALS,
        }
    }
}

impl Default for LogProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for LogProgress {
    fn render(&mut self, current: usize, total: usize, label: &str) {
        debug!(
            "{PROGRESS_PREFIX} {}% {label}",
            format_percent(current, total, self.decimals)
        );
    }

    fn abandon(&mut self) {}

    fn finish(&mut self) {}
}
