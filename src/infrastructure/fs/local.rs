//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::domain::ports::{DirEntry, EntryKind, FileSystem, FsError, FsResult};

/// Local file system implementation
///
/// Writes go through a temp file in the target directory and a rename, so a
/// crash never leaves a half-written BUILD file behind.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn list_dir(&self, path: &Path) -> FsResult<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| FsError::from_io(path, e))? {
            let entry = entry.map_err(|e| FsError::from_io(path, e))?;
            let entry_path = entry.path();
            let file_type = entry
                .file_type()
                .map_err(|e| FsError::from_io(&entry_path, e))?;

            let kind = if file_type.is_symlink() {
                // Dangling links report an error here; treat them as non-directories
                let target_is_dir = fs::metadata(&entry_path)
                    .map(|m| m.is_dir())
                    .unwrap_or(false);
                EntryKind::Symlink { target_is_dir }
            } else if file_type.is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::File
            };

            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry_path,
                kind,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read(&self, path: &Path) -> FsResult<String> {
        fs::read_to_string(path).map_err(|e| FsError::from_io(path, e))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| FsError::from_io(path, e))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| FsError::from_io(path, e))?;

        // Keep the original mode; temp files are created 0600
        if let Ok(meta) = fs::metadata(path) {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .map_err(|e| FsError::from_io(path, e))?;
        }

        tmp.persist(path)
            .map_err(|e| FsError::from_io(path, e.error))?;
        Ok(())
    }

    fn canonicalize(&self, path: &Path) -> FsResult<PathBuf> {
        fs::canonicalize(path).map_err(|e| FsError::from_io(path, e))
    }
}
