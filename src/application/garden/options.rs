//! Garden options

use std::path::{Path, PathBuf};

use crate::config::Config;

/// Options for one walk
#[derive(Debug, Clone)]
pub struct GardenOptions {
    /// Walk root; labels are relative to it
    pub root: PathBuf,
    /// Accepted build file names, highest priority first
    pub build_file_names: Vec<String>,
    /// Kind of the grouping rule
    pub rule_kind: String,
    /// Tag marking rules gardener may overwrite
    pub managed_tag: String,
    /// Whether symlinked directories are descended into
    pub follow_symlinks: bool,
    /// Gitignore-style directory excludes, relative to the root
    pub exclude: Vec<String>,
}

impl GardenOptions {
    /// Options with built-in defaults
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::from_config(&Config::default(), root)
    }

    /// Options from a loaded configuration
    pub fn from_config(config: &Config, root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            build_file_names: config.build.file_names.clone(),
            rule_kind: config.build.rule_kind.clone(),
            managed_tag: config.build.managed_tag.clone(),
            follow_symlinks: config.walk.follow_symlinks,
            exclude: config.walk.exclude.clone(),
        }
    }

    /// Set follow symlinks
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Set exclude patterns
    pub fn with_exclude(mut self, patterns: Vec<String>) -> Self {
        self.exclude = patterns;
        self
    }

    /// Set accepted build file names
    pub fn with_build_file_names(mut self, names: Vec<String>) -> Self {
        self.build_file_names = names;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
