//! File name matching functionality
//!
//! This module wraps a glob pattern and decides whether a discovered file
//! belongs to the run.

use std::path::Path;

use glob::{MatchOptions, Pattern};
use log::trace;

use crate::errors::{Result, glob_pattern_error};

/// A compiled glob pattern used to select files
///
/// Patterns without a path separator are matched against the base name only.
/// Patterns containing `/` (e.g. `**/*.txt`) are matched against the path
/// relative to the source root, with `*` never crossing a separator.
#[derive(Debug, Clone)]
pub struct FilePattern {
    pattern: Pattern,
    options: MatchOptions,
    match_relative_path: bool,
}

impl FilePattern {
    /// Compiles a case-sensitive pattern
    ///
    /// # Errors
    /// Returns an error if the glob syntax is invalid
    pub fn new(pattern: &str) -> Result<Self> {
        Self::with_case(pattern, true)
    }

    /// Compiles a pattern with explicit case sensitivity
    ///
    /// # Errors
    /// Returns an error if the glob syntax is invalid
    pub fn with_case(pattern: &str, case_sensitive: bool) -> Result<Self> {
        let compiled = Pattern::new(pattern).map_err(|e| glob_pattern_error(e, pattern))?;

        Ok(FilePattern {
            pattern: compiled,
            options: MatchOptions {
                case_sensitive,
                require_literal_separator: true,
                require_literal_leading_dot: false,
            },
            match_relative_path: pattern.contains('/'),
        })
    }

    /// The pattern as written by the user
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// Checks whether a file belongs to the run
    ///
    /// # Arguments
    /// * `name` - The file's base name
    /// * `relative` - The file's path relative to the source root
    pub fn is_match(&self, name: &Path, relative: &Path) -> bool {
        let candidate = if self.match_relative_path {
            relative
        } else {
            name
        };
        let matched = self.pattern.matches_path_with(candidate, self.options);
        trace!(
            "Pattern '{}' against '{}': {matched}",
            self.as_str(),
            candidate.display()
        );
        matched
    }
}
