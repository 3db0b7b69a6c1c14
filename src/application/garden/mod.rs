//! Garden Use Case
//!
//! Walks a source tree and keeps the grouping rules of every BUILD file
//! current.
//!
//! This module handles:
//! - Post-order traversal and build file selection
//! - Synthesizing `srcs` / `recursive-srcs` per directory
//! - Reconciling them into the parsed file and writing it back
//! - Propagating each directory's label to its parent

mod options;
mod result;
mod use_case;

pub use options::GardenOptions;
pub use result::GardenResult;
pub use use_case::GardenUseCase;
