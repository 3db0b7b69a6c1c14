//! In-memory file system for tests
//!
//! Uses `Arc<Mutex<>>` internally so it can be cloned into a use case and
//! still be inspected by the test afterwards.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::domain::ports::{DirEntry, EntryKind, FileSystem, FsError, FsResult};

#[derive(Debug, Default)]
struct Tree {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, String>,
    symlinks: BTreeMap<PathBuf, PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    tree: Arc<Mutex<Tree>>,
    unreadable: Arc<Mutex<BTreeSet<PathBuf>>>,
    writes: Arc<Mutex<Vec<PathBuf>>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory and all its parents
    pub fn add_dir(&self, path: impl AsRef<Path>) -> &Self {
        let mut tree = self.tree.lock().unwrap();
        for ancestor in path.as_ref().ancestors() {
            if !ancestor.as_os_str().is_empty() {
                tree.dirs.insert(ancestor.to_path_buf());
            }
        }
        self
    }

    /// Add a file (parents created)
    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) -> &Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.tree
            .lock()
            .unwrap()
            .files
            .insert(path.to_path_buf(), content.to_string());
        self
    }

    /// Add a symlink at `path` pointing at `target`
    pub fn add_symlink(&self, path: impl AsRef<Path>, target: impl AsRef<Path>) -> &Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.tree
            .lock()
            .unwrap()
            .symlinks
            .insert(path.to_path_buf(), target.as_ref().to_path_buf());
        self
    }

    /// Make `read` of this path fail with permission denied
    pub fn deny_read(&self, path: impl AsRef<Path>) -> &Self {
        self.unreadable
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf());
        self
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.tree.lock().unwrap().files.get(path.as_ref()).cloned()
    }

    /// Paths written so far, in order
    pub fn writes(&self) -> Vec<PathBuf> {
        self.writes.lock().unwrap().clone()
    }

    fn resolve(&self, path: &Path) -> FsResult<PathBuf> {
        let tree = self.tree.lock().unwrap();
        let mut resolved = PathBuf::new();
        for component in path.components() {
            match component {
                Component::CurDir => continue,
                other => resolved.push(other),
            }
            let mut hops = 0;
            while let Some(target) = tree.symlinks.get(&resolved) {
                hops += 1;
                if hops > 40 {
                    return Err(FsError::Io {
                        path: path.to_path_buf(),
                        source: std::io::Error::other("too many levels of symbolic links"),
                    });
                }
                resolved = target.clone();
            }
        }
        Ok(resolved)
    }
}

impl FileSystem for MemoryFs {
    fn list_dir(&self, path: &Path) -> FsResult<Vec<DirEntry>> {
        let real = self.resolve(path)?;
        let tree = self.tree.lock().unwrap();
        if !tree.dirs.contains(&real) {
            return Err(FsError::NotFound(path.to_path_buf()));
        }

        let mut entries = Vec::new();
        let children = tree
            .dirs
            .iter()
            .map(|p| (p, EntryKind::Dir))
            .chain(tree.files.keys().map(|p| (p, EntryKind::File)))
            .chain(tree.symlinks.iter().map(|(p, target)| {
                (
                    p,
                    EntryKind::Symlink {
                        target_is_dir: tree.dirs.contains(target),
                    },
                )
            }));
        for (child, kind) in children {
            if child.parent() != Some(real.as_path()) {
                continue;
            }
            let Some(name) = child.file_name() else {
                continue;
            };
            let name = name.to_string_lossy().into_owned();
            entries.push(DirEntry {
                path: path.join(&name),
                name,
                kind,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read(&self, path: &Path) -> FsResult<String> {
        if self.unreadable.lock().unwrap().contains(path) {
            return Err(FsError::PermissionDenied(path.to_path_buf()));
        }
        let real = self.resolve(path)?;
        self.tree
            .lock()
            .unwrap()
            .files
            .get(&real)
            .cloned()
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        let real = self.resolve(path)?;
        self.tree
            .lock()
            .unwrap()
            .files
            .insert(real, content.to_string());
        self.writes.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn canonicalize(&self, path: &Path) -> FsResult<PathBuf> {
        self.resolve(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_direct_children_only() {
        let fs = MemoryFs::new();
        fs.add_file("/ws/BUILD", "").add_file("/ws/a/b/BUILD", "");

        let names: Vec<_> = fs
            .list_dir(Path::new("/ws"))
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();

        assert_eq!(names, vec!["BUILD", "a"]);
    }

    #[test]
    fn symlinked_dirs_are_listed_through_the_link() {
        let fs = MemoryFs::new();
        fs.add_file("/ws/real/BUILD", "")
            .add_symlink("/ws/link", "/ws/real");

        let entries = fs.list_dir(Path::new("/ws/link")).unwrap();

        assert_eq!(entries[0].path, Path::new("/ws/link/BUILD"));
        assert_eq!(
            fs.canonicalize(Path::new("/ws/link")).unwrap(),
            Path::new("/ws/real")
        );
    }

    #[test]
    fn write_is_recorded() {
        let fs = MemoryFs::new();
        fs.add_file("/ws/BUILD", "old");
        fs.write(Path::new("/ws/BUILD"), "new").unwrap();
        assert_eq!(fs.file("/ws/BUILD").as_deref(), Some("new"));
        assert_eq!(fs.writes(), vec![PathBuf::from("/ws/BUILD")]);
    }
}
