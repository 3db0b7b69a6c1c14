//! Garden result types

use std::path::PathBuf;

use crate::domain::value_objects::TargetLabel;

/// Result of a walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GardenResult {
    /// Labels the root resolved to (empty if nothing was gardened)
    pub labels: Vec<TargetLabel>,
    /// Build files written, in post-order
    pub written: Vec<PathBuf>,
}

impl GardenResult {
    /// Number of build files written
    pub fn written_count(&self) -> usize {
        self.written.len()
    }

    /// Labels in `//package:name` form
    pub fn label_strings(&self) -> Vec<String> {
        self.labels.iter().map(ToString::to_string).collect()
    }
}
