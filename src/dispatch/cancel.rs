//! Operator cancellation
//!
//! A Ctrl-C handler flips a shared flag. The dispatcher consults it after a
//! child exits and the orchestrator consults it between files.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Result, anyhow};
use log::debug;

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the run as cancelled
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Routes Ctrl-C to this flag instead of killing the process
    ///
    /// The child running in the foreground still receives the signal from
    /// the terminal, so it exits and the dispatcher sees the flag.
    ///
    /// # Errors
    /// Returns an error if a handler is already installed
    pub fn install_interrupt_handler(&self) -> Result<()> {
        let flag = self.clone();
        ctrlc::set_handler(move || flag.cancel())
            .map_err(|e| anyhow!("Failed to install the interrupt handler: {e}"))?;
        debug!("Interrupt handler installed");
        Ok(())
    }
}
