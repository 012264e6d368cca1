//! Configuration module
//!
//! This module contains components for loading option defaults.

mod loader;
mod model;

pub use loader::{expand_path, load_settings, read_settings, resolve_config_path};
pub use model::Settings;
