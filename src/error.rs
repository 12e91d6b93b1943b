//! Error handling for surfmod
//!
//! Discovery problems never reach this type: the scanner treats them as
//! absence. Everything here is recoverable at the session level and carries
//! a short status message for front-ends.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for surfmod operations
pub type Result<T> = std::result::Result<T, SurfaceError>;

/// Main error type for surfmod operations
#[derive(Error, Debug)]
pub enum SurfaceError {
    // Storage Errors
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Access denied: {path}")]
    AccessDenied { path: PathBuf },

    #[error("Failed to read file: {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}: {source}")]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Backup verification failed: {path}")]
    BackupMismatch { path: PathBuf },

    // Session Errors
    #[error("No surfaces selected")]
    NoSelection,

    #[error("No layout loaded")]
    NoVariantLoaded,

    #[error("Unknown surface section: {id}")]
    UnknownSection { id: String },

    #[error("Unknown preset: {id}")]
    UnknownPreset { id: String },

    // Lookup Errors
    #[error("Track not found: {id}")]
    TrackNotFound { id: String },

    #[error("{count} tracks found, choose one")]
    TrackRequired { count: usize },

    #[error("Layout '{variant}' not found on track '{track}'")]
    VariantNotFound { track: String, variant: String },

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SurfaceError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            SurfaceError::FileNotFound { .. } => "FILE_NOT_FOUND",
            SurfaceError::AccessDenied { .. } => "ACCESS_DENIED",
            SurfaceError::FileReadError { .. } => "FILE_READ_ERROR",
            SurfaceError::FileWriteError { .. } => "FILE_WRITE_ERROR",
            SurfaceError::BackupMismatch { .. } => "BACKUP_MISMATCH",
            SurfaceError::NoSelection => "NO_SELECTION",
            SurfaceError::NoVariantLoaded => "NO_VARIANT_LOADED",
            SurfaceError::UnknownSection { .. } => "UNKNOWN_SECTION",
            SurfaceError::UnknownPreset { .. } => "UNKNOWN_PRESET",
            SurfaceError::TrackNotFound { .. } => "TRACK_NOT_FOUND",
            SurfaceError::TrackRequired { .. } => "TRACK_REQUIRED",
            SurfaceError::VariantNotFound { .. } => "VARIANT_NOT_FOUND",
            SurfaceError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if the session stays usable after this error.
    ///
    /// Every session operation leaves the in-memory state intact on failure.
    /// Serialization errors come from configuration loading or JSON output,
    /// outside any session.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, SurfaceError::Serialization(_))
    }

    /// Short, upper-case status line for display next to the surface list.
    pub fn status_message(&self) -> String {
        match self {
            SurfaceError::NoSelection => "SELECT SURFACES FIRST".to_string(),
            SurfaceError::NoVariantLoaded => "NO LAYOUT LOADED".to_string(),
            SurfaceError::AccessDenied { path } => {
                format!("ACCESS DENIED: {}", path.display())
            }
            SurfaceError::FileNotFound { path } => {
                format!("FILE NOT FOUND: {}", path.display())
            }
            SurfaceError::FileWriteError { .. } | SurfaceError::BackupMismatch { .. } => {
                "SAVE FAILED".to_string()
            }
            SurfaceError::FileReadError { path, .. } => {
                format!("ERROR READING {}", path.display())
            }
            SurfaceError::UnknownPreset { id } => format!("UNKNOWN PRESET: {}", id),
            SurfaceError::UnknownSection { id } => format!("UNKNOWN SURFACE: {}", id),
            _ => self.to_string().to_uppercase(),
        }
    }

    /// Returns a recovery suggestion, when one exists.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            SurfaceError::NoSelection => Some("Select one or more surfaces before applying a preset."),
            SurfaceError::AccessDenied { .. } => {
                Some("Check folder permissions or open the surfaces.ini file directly.")
            }
            SurfaceError::FileWriteError { .. } => Some(
                "The backup may already exist while the main file is unchanged. Retry the save.",
            ),
            SurfaceError::BackupMismatch { .. } => {
                Some("The damaged backup was discarded. Save again to rewrite it.")
            }
            SurfaceError::UnknownPreset { .. } => Some("Run 'surfmod-cli presets' to list presets."),
            SurfaceError::TrackRequired { .. } => {
                Some("Pass --track with a folder name from 'surfmod-cli scan'.")
            }
            _ => None,
        }
    }
}
