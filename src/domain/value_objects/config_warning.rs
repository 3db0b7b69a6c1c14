//! Configuration warning value object.

use std::fmt;
use std::path::PathBuf;

/// An unknown key found while loading `.gardener.toml`.
///
/// Loading still succeeds; the CLI prints these to stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Dotted path of the key, e.g. `walk.folow_symlinks`
    pub key: String,
    pub file: PathBuf,
    /// 1-indexed line of the first occurrence
    pub line: Option<usize>,
    /// Closest known key, if any is near enough
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(
                f,
                "unknown config key '{}' in {}:{}",
                self.key,
                self.file.display(),
                line
            )?,
            None => write!(
                f,
                "unknown config key '{}' in {}",
                self.key,
                self.file.display()
            )?,
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_line_and_suggestion() {
        let warning = ConfigWarning {
            key: "walk.folow_symlinks".to_string(),
            file: PathBuf::from(".gardener.toml"),
            line: Some(4),
            suggestion: Some("follow_symlinks".to_string()),
        };
        assert_eq!(
            warning.to_string(),
            "unknown config key 'walk.folow_symlinks' in .gardener.toml:4 (did you mean 'follow_symlinks'?)"
        );
    }

    #[test]
    fn display_without_line() {
        let warning = ConfigWarning {
            key: "extra".to_string(),
            file: PathBuf::from("config.toml"),
            line: None,
            suggestion: None,
        };
        assert_eq!(warning.to_string(), "unknown config key 'extra' in config.toml");
    }
}
