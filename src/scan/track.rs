//! Track and layout descriptors produced by a scan.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::error::{Result, SurfaceError};

/// Id of the layout stored directly under the track's `data` folder.
pub const DEFAULT_VARIANT_ID: &str = "default";
/// Label of the default layout.
pub const DEFAULT_VARIANT_LABEL: &str = "Default Layout";
/// Id of a configuration file opened on its own.
pub const STANDALONE_VARIANT_ID: &str = "manual";

/// One selectable layout of a track with its own configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variant {
    /// `default` or the layout folder name.
    pub id: String,
    /// Display label, e.g. `GP` or `Default Layout`.
    pub label: String,
    /// Location of the data folder relative to the track folder, e.g.
    /// `gp/data`. A standalone file has no track folder; its parent folder
    /// is shown as given.
    pub path: String,
    /// The configuration file.
    pub file: PathBuf,
    /// Folder holding the configuration file and its backup.
    pub folder: PathBuf,
}

impl Variant {
    /// Variant for a configuration file opened directly, outside any scan.
    pub fn standalone(file: &Path) -> Self {
        let folder = file.parent().map(Path::to_path_buf).unwrap_or_default();
        Self {
            id: STANDALONE_VARIANT_ID.to_string(),
            label: STANDALONE_VARIANT_ID.to_uppercase(),
            path: folder.display().to_string(),
            file: file.to_path_buf(),
            folder,
        }
    }

    /// File name of the configuration file.
    pub fn file_name(&self) -> String {
        self.file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Sibling backup path, e.g. `data/surfaces.ini.bak`.
    pub fn backup_path(&self, config: &Config) -> PathBuf {
        self.folder.join(config.backup_file_name(&self.file_name()))
    }
}

/// A track folder with at least one editable layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    /// Folder name.
    pub id: String,
    /// Name from the metadata file, else the folder name.
    pub name: String,
    pub tags: Vec<String>,
    pub variants: Vec<Variant>,
    pub folder: PathBuf,
}

impl Track {
    /// `"<name> (<id>)"`, as shown in the track list.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.id)
    }

    /// Case-insensitive substring match on name, id or any tag.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.id.to_lowercase().contains(&term)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&term))
    }

    /// Layout by id, or the first layout when `id` is `None`.
    pub fn variant(&self, id: Option<&str>) -> Result<&Variant> {
        let found = match id {
            Some(id) => self.variants.iter().find(|v| v.id.eq_ignore_ascii_case(id)),
            None => self.variants.first(),
        };
        found.ok_or_else(|| SurfaceError::VariantNotFound {
            track: self.id.clone(),
            variant: id.unwrap_or(DEFAULT_VARIANT_ID).to_string(),
        })
    }
}

/// Tracks matching a search term, in their original order.
pub fn filter_tracks<'a>(tracks: &'a [Track], term: &str) -> Vec<&'a Track> {
    tracks.iter().filter(|track| track.matches(term)).collect()
}

/// Track by folder name.
pub fn find_track<'a>(tracks: &'a [Track], id: &str) -> Result<&'a Track> {
    tracks
        .iter()
        .find(|track| track.id == id)
        .ok_or_else(|| SurfaceError::TrackNotFound { id: id.to_string() })
}

/// Layout label derived from its folder name: `nordschleife_tourist` → `NORDSCHLEIFE TOURIST`.
pub fn layout_label(folder_name: &str) -> String {
    folder_name.replace('_', " ").to_uppercase()
}
