//! BuildFormat port - build file text <-> structured statements
//!
//! The walker never looks at raw BUILD text. It asks a `BuildFormat` to turn
//! text into a `BuildFile` and, after reconciliation, to print it back in
//! canonical form.

use std::path::Path;
use thiserror::Error;

use crate::domain::entities::BuildFile;

/// Position and reason of a syntax error (1-based line and column)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}, column {column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

/// Parser and canonical printer for one build file dialect
pub trait BuildFormat {
    /// Parse build file text into its statement list
    fn parse(&self, path: &Path, content: &str) -> Result<BuildFile, ParseError>;

    /// Print a statement list in canonical form
    ///
    /// Must be deterministic: the same `BuildFile` always yields the same bytes.
    fn format(&self, file: &BuildFile) -> String;
}
