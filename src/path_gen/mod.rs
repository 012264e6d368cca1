//! Path generation module
//!
//! This module contains components for generating destination paths.

mod mirror;

pub use mirror::derive_destination;
