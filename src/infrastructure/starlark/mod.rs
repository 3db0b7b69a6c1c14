//! Starlark BUILD format
//!
//! `BuildFormat` implementation for the declarative BUILD dialect.

mod parser;
mod printer;

use std::path::Path;

use crate::domain::entities::BuildFile;
use crate::domain::ports::{BuildFormat, ParseError};

pub use parser::{parse_build_file, ParsedFile};
pub use printer::{format_build_file, quote};

/// Parses and prints BUILD / BUILD.bazel files
#[derive(Debug, Clone, Copy, Default)]
pub struct StarlarkFormat;

impl StarlarkFormat {
    pub fn new() -> Self {
        Self
    }
}

impl BuildFormat for StarlarkFormat {
    fn parse(&self, path: &Path, content: &str) -> Result<BuildFile, ParseError> {
        let parsed = parse_build_file(content)?;
        Ok(BuildFile {
            path: path.to_path_buf(),
            stmts: parsed.stmts,
            trailing_comments: parsed.trailing_comments,
        })
    }

    fn format(&self, file: &BuildFile) -> String {
        format_build_file(file)
    }
}
