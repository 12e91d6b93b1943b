//! Storage Module
//!
//! The storage collaborator the engine talks to. Scanning, loading and
//! saving only ever go through the [`Storage`] trait, so the same session
//! runs against the real filesystem or an in-memory tree.

pub mod fs;
pub mod memory;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use fs::FsStorage;
pub use memory::MemoryStorage;

/// Kind of a folder entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Folder,
}

/// One immediate entry of a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Entry name (last path component).
    pub name: String,
    /// File or folder.
    pub kind: EntryKind,
}

impl Entry {
    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }
}

/// Primitive file and folder operations required by the engine.
pub trait Storage {
    /// Enumerate the immediate entries of a folder.
    fn list(&self, folder: &Path) -> Result<Vec<Entry>>;

    /// Whether `path` resolves to an existing folder.
    fn is_folder(&self, path: &Path) -> bool;

    /// Whether `path` resolves to an existing file.
    fn is_file(&self, path: &Path) -> bool;

    /// Read the full content of a file.
    fn read(&self, file: &Path) -> Result<Vec<u8>>;

    /// Create or truncate a file, write `bytes` and close it.
    fn write(&mut self, file: &Path, bytes: &[u8]) -> Result<()>;

    /// Delete a file.
    fn remove(&mut self, file: &Path) -> Result<()>;

    /// Absolute form of `path` with `.` and `..` resolved, so the last
    /// component names the folder itself. Unresolvable paths come back as-is.
    fn resolve(&self, path: &Path) -> PathBuf {
        path.to_path_buf()
    }

    /// Read a file as text. Invalid UTF-8 is replaced, not rejected.
    fn read_to_string(&self, file: &Path) -> Result<String> {
        let bytes = self.read(file)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
