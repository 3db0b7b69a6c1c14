//! Error types for Gardener
//!
//! Library code returns `GardenerError`; the binary wraps it in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{FsError, ParseError};

/// Result type alias for Gardener operations
pub type GardenerResult<T> = Result<T, GardenerError>;

/// Main error type for Gardener operations
///
/// Every variant aborts the walk; nothing is retried.
#[derive(Error, Debug)]
pub enum GardenerError {
    /// Directory enumeration failed
    #[error("failed to list directory {}: {source}", path.display())]
    Listing {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    /// Build file content could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    /// Rewritten build file could not be written back
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    /// Build file does not conform to the supported syntax
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// A followed symlink leads back into one of its own ancestors
    #[error("symlink loop detected at {}", path.display())]
    SymlinkLoop { path: PathBuf },

    /// Configuration file is malformed or holds invalid values
    #[error("invalid configuration in {}: {message}", file.display())]
    Config { file: PathBuf, message: String },

    /// An exclude pattern could not be compiled
    #[error("invalid exclude pattern '{pattern}': {message}")]
    InvalidExclude { pattern: String, message: String },

    /// IO error outside the walk (config loading, working directory)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
