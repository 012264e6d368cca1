//! Command templates
//!
//! The caller supplies the external program and its fixed leading arguments.
//! Every dispatch reuses the same template and appends the original and
//! destination paths.

use std::ffi::OsString;
use std::path::Path;

use crate::errors::{Result, generic_error};

/// The external program and its fixed arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    tokens: Vec<String>,
}

impl CommandTemplate {
    /// Creates a template from the program name followed by its arguments
    ///
    /// # Errors
    /// Returns an error if `tokens` is empty
    pub fn new<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        if tokens.is_empty() {
            return Err(generic_error(
                "You must provide a command to execute (e.g. `cp`, `magick`)",
            ));
        }
        Ok(CommandTemplate { tokens })
    }

    /// The program to execute
    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    /// The fixed arguments following the program
    pub fn fixed_args(&self) -> &[String] {
        &self.tokens[1..]
    }

    /// All tokens, program first
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Builds the argument vector passed to the program for one file
    pub fn arguments(&self, original: &Path, destination: &Path) -> Vec<OsString> {
        self.fixed_args()
            .iter()
            .map(OsString::from)
            .chain([
                original.as_os_str().to_os_string(),
                destination.as_os_str().to_os_string(),
            ])
            .collect()
    }

    /// Renders the full command for one file as a single line
    pub fn command_line(&self, original: &Path, destination: &Path) -> String {
        let mut line = self.tokens.join(" ");
        line.push(' ');
        line.push_str(&original.to_string_lossy());
        line.push(' ');
        line.push_str(&destination.to_string_lossy());
        line
    }
}
