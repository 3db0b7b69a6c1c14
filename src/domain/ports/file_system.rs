//! FileSystem port - abstraction over the directory tree being gardened
//!
//! The walker only needs to list directories, read and write build files,
//! and resolve symlinks. Keeping that behind a trait lets the domain run
//! against the local disk or an in-memory tree in tests.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug, Error)]
pub enum FsError {
    /// File or directory not found
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Permission denied
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),
    /// Any other I/O failure
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Classify an `io::Error` raised while touching `path`
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// What a directory entry is, without following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    /// A symbolic link; `target_is_dir` is false for dangling links
    Symlink { target_is_dir: bool },
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl DirEntry {
    /// True for real directories (symlinks excluded)
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    /// True for regular files and symlinks that do not point at a directory
    pub fn is_file_like(&self) -> bool {
        matches!(
            self.kind,
            EntryKind::File
                | EntryKind::Symlink {
                    target_is_dir: false
                }
        )
    }

    /// True for symlinks pointing at a directory
    pub fn is_dir_symlink(&self) -> bool {
        self.kind == EntryKind::Symlink {
            target_is_dir: true,
        }
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O with atomic writes
/// - `MemoryFs` - in-memory tree for unit tests
pub trait FileSystem {
    /// List a directory, sorted by entry name
    fn list_dir(&self, path: &Path) -> FsResult<Vec<DirEntry>>;

    /// Read file content as string
    fn read(&self, path: &Path) -> FsResult<String>;

    /// Replace a file's content atomically
    fn write(&self, path: &Path, content: &str) -> FsResult<()>;

    /// Resolve a path to its canonical form (symlinks followed)
    fn canonicalize(&self, path: &Path) -> FsResult<PathBuf>;
}
