//! Gardener - keeps source-grouping rules in BUILD files current
//!
//! Walks a source tree bottom-up. Every directory that owns a `BUILD` or
//! `BUILD.bazel` file gets a `filegroup` named `srcs` covering its files and,
//! when gardened descendants exist, a `recursive-srcs` rule aggregating their
//! labels. Rules are only rewritten when tagged `automanaged`.
//!
//! ## Layers
//!
//! - `domain` - entities, value objects, services and ports
//! - `application` - the garden use case (tree walk)
//! - `infrastructure` - local file system, BUILD parser/printer, event sinks
//! - `config` - layered TOML configuration

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::garden::{GardenOptions, GardenResult, GardenUseCase};
pub use config::Config;
pub use domain::value_objects::TargetLabel;
pub use error::{GardenerError, GardenerResult};
