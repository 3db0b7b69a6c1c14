//! Configuration module for Gardener
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (GARDENER_*)
//! 3. Project config (`<root>/.gardener.toml`)
//! 4. User config (`<config dir>/gardener/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use types::{project_config_path, BuildConfig, Config, OutputConfig, Verbosity, WalkConfig};
