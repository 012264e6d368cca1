//! File discovery module
//!
//! This module contains components for scanning directories and matching files.

mod matcher;
mod scanner;

pub use matcher::FilePattern;
pub use scanner::{FileMatch, scan_directory};
