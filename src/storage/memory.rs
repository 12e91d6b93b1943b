//! In-memory storage.
//!
//! Holds a small file tree in ordered maps. Reads and writes can be denied
//! per path to reproduce permission failures.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Component, Path, PathBuf};

use crate::error::{Result, SurfaceError};
use crate::storage::{Entry, EntryKind, Storage};

/// [`Storage`] backed by in-memory maps.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: BTreeMap<PathBuf, Vec<u8>>,
    folders: BTreeSet<PathBuf>,
    denied_reads: HashSet<PathBuf>,
    denied_writes: HashSet<PathBuf>,
    corrupt_writes: HashSet<PathBuf>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty folder and its ancestors.
    pub fn add_folder(&mut self, path: impl AsRef<Path>) {
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.folders.insert(ancestor.to_path_buf());
        }
    }

    /// Add a file, creating its parent folders.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_folder(parent);
        }
        self.files.insert(path.to_path_buf(), content.into());
    }

    /// Current content of a file, if present.
    pub fn file(&self, path: impl AsRef<Path>) -> Option<&[u8]> {
        self.files.get(path.as_ref()).map(Vec::as_slice)
    }

    /// Make every read of `path` fail with access denied.
    pub fn deny_read(&mut self, path: impl AsRef<Path>) {
        self.denied_reads.insert(path.as_ref().to_path_buf());
    }

    /// Make every write to `path` fail with access denied.
    pub fn deny_write(&mut self, path: impl AsRef<Path>) {
        self.denied_writes.insert(path.as_ref().to_path_buf());
    }

    /// Make every write to `path` store one byte less than was written.
    pub fn corrupt_write(&mut self, path: impl AsRef<Path>) {
        self.corrupt_writes.insert(path.as_ref().to_path_buf());
    }

    /// Lift all read and write denials and corruptions.
    pub fn allow_all(&mut self) {
        self.denied_reads.clear();
        self.denied_writes.clear();
        self.corrupt_writes.clear();
    }
}

impl Storage for MemoryStorage {
    fn list(&self, folder: &Path) -> Result<Vec<Entry>> {
        if !self.folders.contains(folder) {
            return Err(SurfaceError::FileNotFound {
                path: folder.to_path_buf(),
            });
        }
        if self.denied_reads.contains(folder) {
            return Err(SurfaceError::AccessDenied {
                path: folder.to_path_buf(),
            });
        }

        let child_name = |path: &PathBuf| -> Option<String> {
            (path.parent() == Some(folder))
                .then(|| path.file_name())
                .flatten()
                .map(|name| name.to_string_lossy().into_owned())
        };

        let mut entries: Vec<Entry> = self
            .folders
            .iter()
            .filter_map(|path| child_name(path).map(|name| (name, EntryKind::Folder)))
            .chain(
                self.files
                    .keys()
                    .filter_map(|path| child_name(path).map(|name| (name, EntryKind::File))),
            )
            .map(|(name, kind)| Entry { name, kind })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(entries)
    }

    fn is_folder(&self, path: &Path) -> bool {
        self.folders.contains(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read(&self, file: &Path) -> Result<Vec<u8>> {
        if self.denied_reads.contains(file) {
            return Err(SurfaceError::AccessDenied {
                path: file.to_path_buf(),
            });
        }
        self.files
            .get(file)
            .cloned()
            .ok_or_else(|| SurfaceError::FileNotFound {
                path: file.to_path_buf(),
            })
    }

    fn write(&mut self, file: &Path, bytes: &[u8]) -> Result<()> {
        if self.denied_writes.contains(file) {
            return Err(SurfaceError::AccessDenied {
                path: file.to_path_buf(),
            });
        }
        match file.parent() {
            Some(parent) if self.folders.contains(parent) => {
                let mut stored = bytes.to_vec();
                if self.corrupt_writes.contains(file) {
                    stored.pop();
                }
                self.files.insert(file.to_path_buf(), stored);
                Ok(())
            }
            _ => Err(SurfaceError::FileNotFound {
                path: file.to_path_buf(),
            }),
        }
    }

    fn remove(&mut self, file: &Path) -> Result<()> {
        if self.denied_writes.contains(file) {
            return Err(SurfaceError::AccessDenied {
                path: file.to_path_buf(),
            });
        }
        self.files
            .remove(file)
            .map(|_| ())
            .ok_or_else(|| SurfaceError::FileNotFound {
                path: file.to_path_buf(),
            })
    }

    /// Lexical resolution; the in-memory tree has no links or working directory.
    fn resolve(&self, path: &Path) -> PathBuf {
        let mut resolved = PathBuf::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    resolved.pop();
                }
                other => resolved.push(other),
            }
        }
        resolved
    }
}
