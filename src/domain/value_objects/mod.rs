//! Value Objects
//!
//! Immutable types identified by their value.

mod config_warning;
mod exclude_patterns;
mod label;

pub use config_warning::ConfigWarning;
pub use exclude_patterns::ExcludePatterns;
pub use label::TargetLabel;
