//! Configuration loading functionality
//!
//! This module finds and reads the YAML defaults file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use directories::ProjectDirs;
use log::debug;
use serde_yaml::from_str;

use crate::constants::{APPLICATION, DEFAULT_CONFIG_FILE, ORGANIZATION, QUALIFIER};
use crate::errors::{config_parsing_error, file_operation_error};

use super::model::Settings;

/// Expands `~` and environment variables in a path
///
/// Unknown variables are left as written.
pub fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .map(|expanded| expanded.into_owned())
        .unwrap_or_else(|_| shellexpand::tilde(path).into_owned())
}

/// Loads settings from a YAML file
///
/// An empty file yields the default settings.
///
/// # Arguments
/// * `file` - Path to the configuration file
///
/// # Returns
/// * `Result<Settings>` - The loaded settings or an error
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid YAML for `Settings`
pub fn load_settings(file: &Path) -> Result<Settings> {
    let file_content =
        fs::read(file).map_err(|e| file_operation_error(e, file.to_path_buf(), "read"))?;

    let content_str = String::from_utf8(file_content).map_err(|e| {
        config_parsing_error(
            e,
            &format!(
                "Configuration file {} contains invalid UTF-8 characters",
                file.display()
            ),
        )
    })?;

    if content_str.trim().is_empty() {
        debug!("Configuration file {} is empty", file.display());
        return Ok(Settings::default());
    }

    let settings: Settings = from_str(&content_str).map_err(|e| {
        let detail = format!(
            "Failed to parse configuration file {}: {}. Please check the YAML syntax.",
            file.display(),
            e
        );
        config_parsing_error(e, &detail)
    })?;

    settings.validate()?;
    debug!("Loaded settings from {}: {settings:?}", file.display());

    Ok(settings)
}

/// Determines which configuration file to read, if any
///
/// An explicit path must exist. Without one, `config.yaml` in the platform
/// configuration directory is used when present.
///
/// # Errors
/// Returns an error if an explicit path does not exist
pub fn resolve_config_path(explicit: Option<&str>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        let path = PathBuf::from(expand_path(path));
        if !path.is_file() {
            return Err(anyhow!(
                "Configuration file {} does not exist",
                path.display()
            ));
        }
        return Ok(Some(path));
    }

    let default = default_config_path().filter(|path| path.is_file());
    if let Some(path) = &default {
        debug!("Using configuration file {}", path.display());
    }
    Ok(default)
}

/// Reads the settings for a run
///
/// # Errors
/// Returns an error if an explicit file is missing or any file is invalid
pub fn read_settings(explicit: Option<&str>) -> Result<Settings> {
    match resolve_config_path(explicit)? {
        Some(path) => load_settings(&path),
        None => Ok(Settings::default()),
    }
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|folder| folder.config_dir().join(DEFAULT_CONFIG_FILE))
}
