//! Configuration data structures
//!
//! This module contains the optional defaults read from a YAML file.

use anyhow::{Result, anyhow};
use serde::Deserialize;

use crate::discovery::FilePattern;

/// Default option values for the command line
///
/// Every field is optional; a value given on the command line always wins.
///
/// ```yaml
/// file_pattern: "*.jpg"
/// output_file_prefix: "small_"
/// output_basedir: "~/Pictures/processed"
/// output_subdir: "2024"
/// ignore_case: true
/// ```
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Glob pattern matched against file names
    pub file_pattern: Option<String>,
    /// Prefix for destination file names
    pub output_file_prefix: Option<String>,
    /// Root directory for mirrored output
    pub output_basedir: Option<String>,
    /// Subdirectory inserted below the output root
    pub output_subdir: Option<String>,
    /// Case-insensitive matching
    pub ignore_case: Option<bool>,
}

impl Settings {
    /// Validates the settings
    ///
    /// # Errors
    /// Returns an error with a helpful message if the pattern does not compile
    /// or a directory value is blank
    pub fn validate(&self) -> Result<()> {
        if let Some(pattern) = &self.file_pattern {
            FilePattern::new(pattern)
                .map_err(|e| anyhow!("{e}. Please check the `file_pattern` setting."))?;
        }

        if let Some(basedir) = &self.output_basedir
            && basedir.trim().is_empty()
        {
            return Err(anyhow!(
                "The `output_basedir` setting is empty. Remove it or specify a directory."
            ));
        }

        Ok(())
    }
}
