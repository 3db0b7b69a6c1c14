//! Target label value object
//!
//! `//<package>:<name>`, where the package is the directory path relative to
//! the walk root with `/` separators. The root itself is the empty package.

use std::fmt;
use std::path::{Component, Path};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetLabel {
    package: String,
    name: String,
}

impl TargetLabel {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Package string for `dir` relative to `root`
    ///
    /// Falls back to `dir` itself when it is not under `root`.
    pub fn package_for(root: &Path, dir: &Path) -> String {
        let relative = dir.strip_prefix(root).unwrap_or(dir);
        relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

}

impl fmt::Display for TargetLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "//{}:{}", self.package, self.name)
    }
}
