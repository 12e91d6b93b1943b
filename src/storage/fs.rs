//! Filesystem-backed storage.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, SurfaceError};
use crate::storage::{Entry, EntryKind, Storage};

/// [`Storage`] over the local filesystem.
///
/// Folder listings are sorted by file name so scans are reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl FsStorage {
    pub fn new() -> Self {
        Self
    }
}

fn read_error(path: &Path, err: io::Error) -> SurfaceError {
    match err.kind() {
        io::ErrorKind::NotFound => SurfaceError::FileNotFound {
            path: path.to_path_buf(),
        },
        io::ErrorKind::PermissionDenied => SurfaceError::AccessDenied {
            path: path.to_path_buf(),
        },
        _ => SurfaceError::FileReadError {
            path: path.to_path_buf(),
            source: err,
        },
    }
}

fn write_error(path: &Path, err: io::Error) -> SurfaceError {
    match err.kind() {
        io::ErrorKind::PermissionDenied => SurfaceError::AccessDenied {
            path: path.to_path_buf(),
        },
        _ => SurfaceError::FileWriteError {
            path: path.to_path_buf(),
            source: err,
        },
    }
}

impl Storage for FsStorage {
    fn list(&self, folder: &Path) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();

        for entry in WalkDir::new(folder)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| read_error(folder, io::Error::from(e)))?;
            let kind = if entry.file_type().is_dir() {
                EntryKind::Folder
            } else {
                EntryKind::File
            };
            entries.push(Entry {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind,
            });
        }

        Ok(entries)
    }

    fn is_folder(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, file: &Path) -> Result<Vec<u8>> {
        fs::read(file).map_err(|e| read_error(file, e))
    }

    fn write(&mut self, file: &Path, bytes: &[u8]) -> Result<()> {
        fs::write(file, bytes).map_err(|e| write_error(file, e))
    }

    fn remove(&mut self, file: &Path) -> Result<()> {
        fs::remove_file(file).map_err(|e| write_error(file, e))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_is_sorted_and_typed() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("zandvoort")).unwrap();
        fs::create_dir(temp_dir.path().join("imola")).unwrap();
        fs::write(temp_dir.path().join("readme.txt"), b"hi").unwrap();

        let entries = FsStorage::new().list(temp_dir.path()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names, vec!["imola", "readme.txt", "zandvoort"]);
        assert!(entries[0].is_folder());
        assert_eq!(entries[1].kind, EntryKind::File);
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = FsStorage::new()
            .read(&temp_dir.path().join("surfaces.ini"))
            .unwrap_err();
        assert_eq!(err.error_code(), "FILE_NOT_FOUND");
    }

    #[test]
    fn test_resolve_names_the_folder() {
        let temp_dir = TempDir::new().unwrap();
        let track = temp_dir.path().join("drift");
        fs::create_dir_all(track.join("data")).unwrap();

        let resolved = FsStorage::new().resolve(&track.join("data").join(".."));

        assert_eq!(resolved.file_name().unwrap(), "drift");
        assert!(resolved.is_absolute());
    }

    #[test]
    fn test_remove_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("surfaces.ini.bak");
        let mut storage = FsStorage::new();
        storage.write(&file, b"x").unwrap();

        storage.remove(&file).unwrap();

        assert!(!storage.is_file(&file));
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("surfaces.ini");
        let mut storage = FsStorage::new();

        storage.write(&file, b"[SURFACE_0]\r\n").unwrap();

        assert!(storage.is_file(&file));
        assert!(!storage.is_folder(&file));
        assert_eq!(storage.read_to_string(&file).unwrap(), "[SURFACE_0]\r\n");
    }
}
