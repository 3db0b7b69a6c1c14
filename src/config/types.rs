//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ConfigWarning;
use crate::error::{GardenerError, GardenerResult};

use super::loader;

/// Build file handling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Accepted build file names, highest priority first
    #[serde(default = "default_file_names")]
    pub file_names: Vec<String>,

    /// Kind of the grouping rule that gets maintained
    #[serde(default = "default_rule_kind")]
    pub rule_kind: String,

    /// Tag that marks a rule as owned by gardener
    #[serde(default = "default_managed_tag")]
    pub managed_tag: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            file_names: default_file_names(),
            rule_kind: default_rule_kind(),
            managed_tag: default_managed_tag(),
        }
    }
}

fn default_file_names() -> Vec<String> {
    vec!["BUILD.bazel".to_string(), "BUILD".to_string()]
}

fn default_rule_kind() -> String {
    "filegroup".to_string()
}

fn default_managed_tag() -> String {
    "automanaged".to_string()
}

/// Tree walk behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WalkConfig {
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Gitignore-style patterns, relative to the walk root
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// Parse a level name, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "quiet" => Some(Self::Quiet),
            "normal" => Some(Self::Normal),
            "verbose" => Some(Self::Verbose),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }

    /// Raise the level by `count` steps, saturating at `Debug`
    pub fn raised(self, count: u8) -> Self {
        let mut level = self;
        for _ in 0..count {
            level = match level {
                Self::Quiet => Self::Normal,
                Self::Normal => Self::Verbose,
                Self::Verbose | Self::Debug => Self::Debug,
            };
        }
        level
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub walk: WalkConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> GardenerResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> GardenerResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults, then apply
    /// `GARDENER_*` environment overrides
    pub fn load_or_default(root: &Path) -> GardenerResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(root)
    }

    /// Apply environment variable overrides (GARDENER_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_overrides(self, |key| std::env::var(key).ok())
    }

    /// Reject values the walk cannot work with
    pub fn validate(&self, file: &Path) -> GardenerResult<()> {
        let invalid = |message: &str| GardenerError::Config {
            file: file.to_path_buf(),
            message: message.to_string(),
        };

        if self.build.file_names.is_empty() {
            return Err(invalid("build.file_names must not be empty"));
        }
        if self
            .build
            .file_names
            .iter()
            .any(|n| n.is_empty() || n.contains('/') || n.contains('\\'))
        {
            return Err(invalid("build.file_names must be plain file names"));
        }
        if self.build.rule_kind.trim().is_empty() {
            return Err(invalid("build.rule_kind must not be empty"));
        }
        if !is_dotted_name(&self.build.rule_kind) {
            return Err(invalid(
                "build.rule_kind must be a name or dotted name, e.g. filegroup or native.filegroup",
            ));
        }
        if self.build.managed_tag.trim().is_empty() {
            return Err(invalid("build.managed_tag must not be empty"));
        }
        Ok(())
    }
}

/// `name` or `a.b.name`, each part `[A-Za-z_][A-Za-z0-9_]*`
fn is_dotted_name(value: &str) -> bool {
    value.split('.').all(|part| {
        let mut chars = part.chars();
        chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}

/// Path of the project-level config file for a walk root
pub fn project_config_path(root: &Path) -> PathBuf {
    root.join(".gardener.toml")
}
