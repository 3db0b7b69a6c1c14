//! Exclude patterns value object
//!
//! Directories matching `walk.exclude` are never entered. Patterns use
//! gitignore semantics and are resolved against the walk root.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

use crate::error::{GardenerError, GardenerResult};

/// Compiled `walk.exclude` patterns
///
/// Uses the `ignore` crate for gitignore-compatible pattern matching.
#[derive(Debug)]
pub struct ExcludePatterns {
    matcher: Gitignore,
    pattern_count: usize,
}

impl Default for ExcludePatterns {
    fn default() -> Self {
        Self::empty()
    }
}

impl ExcludePatterns {
    /// Create an empty pattern set (matches nothing).
    pub fn empty() -> Self {
        Self {
            matcher: Gitignore::empty(),
            pattern_count: 0,
        }
    }

    /// Compile patterns relative to `root`
    pub fn new(root: &Path, patterns: &[String]) -> GardenerResult<Self> {
        let mut builder = GitignoreBuilder::new(root);
        let mut pattern_count = 0;

        for pattern in patterns {
            let trimmed = pattern.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            builder
                .add_line(None, trimmed)
                .map_err(|e| GardenerError::InvalidExclude {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
            pattern_count += 1;
        }

        let matcher = builder.build().map_err(|e| GardenerError::InvalidExclude {
            pattern: patterns.join(", "),
            message: e.to_string(),
        })?;

        Ok(Self {
            matcher,
            pattern_count,
        })
    }

    /// Check whether a directory (path relative to the root) is excluded.
    pub fn is_excluded(&self, rel_path: &Path) -> bool {
        if self.pattern_count == 0 || rel_path.as_os_str().is_empty() {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(rel_path, true)
            .is_ignore()
    }

    /// Get the number of patterns loaded.
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    pub fn is_empty(&self) -> bool {
        self.pattern_count == 0
    }
}
