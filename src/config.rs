//! Configuration
//!
//! Naming conventions of the asset tree and output options. Every field has
//! a default, so an empty JSON object is a valid configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SurfaceError};

/// Config file name inside the per-user config directory.
pub const CONFIG_FILE: &str = "config.json";
/// Application folder inside the per-user config directory.
pub const APP_DIR: &str = "surfmod";

/// Scanner and serializer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name of the surface configuration file inside a `data` folder.
    pub config_file_name: String,

    /// Folder holding the configuration file, per track and per layout.
    pub data_folder: String,

    /// Suffix appended to the configuration file name for the backup copy.
    pub backup_suffix: String,

    /// Track subfolders never probed as layouts.
    pub excluded_folders: Vec<String>,

    /// Folder holding the track metadata file.
    pub metadata_folder: String,

    /// Track metadata file name.
    pub metadata_file: String,

    /// Emit `;ORIGINAL:` copies of modified sections on save.
    pub annotate_modified: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_file_name: "surfaces.ini".to_string(),
            data_folder: "data".to_string(),
            backup_suffix: ".bak".to_string(),
            excluded_folders: ["data", "ui", "ai", "skins"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            metadata_folder: "ui".to_string(),
            metadata_file: "ui_track.json".to_string(),
            annotate_modified: true,
        }
    }
}

impl Config {
    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| SurfaceError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load an explicit file, else the per-user file if present, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// `<config_dir>/surfmod/config.json`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Pretty JSON form of this configuration.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Whether a track subfolder is excluded from layout probing.
    pub fn is_excluded(&self, folder_name: &str) -> bool {
        self.excluded_folders.iter().any(|name| name == folder_name)
    }

    /// File name of the backup sibling, e.g. `surfaces.ini.bak`.
    pub fn backup_file_name(&self, file_name: &str) -> String {
        format!("{}{}", file_name, self.backup_suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.config_file_name, "surfaces.ini");
        assert!(config.is_excluded("skins"));
        assert!(!config.is_excluded("gp"));
        assert_eq!(config.backup_file_name("surfaces.ini"), "surfaces.ini.bak");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "excluded_folders": ["data", "ui"], "annotate_modified": false }"#)
            .unwrap();

        let config = Config::load(&path).unwrap();

        assert!(!config.is_excluded("ai"));
        assert!(!config.annotate_modified);
        assert_eq!(config.data_folder, "data");
    }

    #[test]
    fn test_json_roundtrip() {
        let config = Config::default();
        let parsed: Config = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "not json").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        assert!(!err.is_recoverable());
    }
}
