//! AssetTree Scanner
//!
//! Walks a game install, a `tracks` folder or a single track folder and
//! collects every layout that has a `surfaces.ini`. Probing is best effort:
//! anything missing or unreadable below the tracks root simply does not show
//! up in the result.

pub mod track;

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::storage::Storage;

pub use track::{
    filter_tracks, find_track, layout_label, Track, Variant, DEFAULT_VARIANT_ID,
    DEFAULT_VARIANT_LABEL, STANDALONE_VARIANT_ID,
};

/// Scan `root` for tracks.
///
/// The tracks root is `<root>/content/tracks` when present, the root itself
/// when it is named `tracks`, and otherwise the root, unless the root is a
/// track folder (it has a data folder), in which case exactly that track is
/// returned. The root is resolved through the storage first, so `.` or a
/// path ending in `..` names its folder. Only a failure to list the tracks
/// root is reported.
pub fn scan<S: Storage + ?Sized>(storage: &S, root: &Path, config: &Config) -> Result<Vec<Track>> {
    let root = &storage.resolve(root);
    let content_tracks = root.join("content").join("tracks");

    let tracks_root = if storage.is_folder(&content_tracks) {
        content_tracks
    } else if is_named_tracks(root) {
        root.to_path_buf()
    } else if storage.is_folder(&root.join(&config.data_folder)) {
        info!("Scanning single track folder: {}", root.display());
        return Ok(scan_track(storage, root, config).into_iter().collect());
    } else {
        root.to_path_buf()
    };

    info!("Scanning tracks in: {}", tracks_root.display());

    let tracks: Vec<Track> = storage
        .list(&tracks_root)?
        .into_iter()
        .filter(|entry| entry.is_folder())
        .filter_map(|entry| scan_track(storage, &tracks_root.join(&entry.name), config))
        .collect();

    info!("Found {} tracks", tracks.len());
    Ok(tracks)
}

fn is_named_tracks(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().eq_ignore_ascii_case("tracks"))
}

/// Build a track from its folder; `None` when it has no editable layout.
pub fn scan_track<S: Storage + ?Sized>(storage: &S, folder: &Path, config: &Config) -> Option<Track> {
    let id = folder.file_name()?.to_string_lossy().into_owned();
    let (name, tags) = read_metadata(storage, folder, config);
    let name = name.unwrap_or_else(|| id.clone());

    let mut variants = Vec::new();

    let data_folder = folder.join(&config.data_folder);
    if let Some(variant) = probe_variant(storage, &data_folder, config) {
        variants.push(Variant {
            id: DEFAULT_VARIANT_ID.to_string(),
            label: DEFAULT_VARIANT_LABEL.to_string(),
            path: config.data_folder.clone(),
            ..variant
        });
    }

    let entries = storage.list(folder).unwrap_or_else(|e| {
        debug!("Cannot list {}: {}", folder.display(), e);
        Vec::new()
    });

    for entry in entries {
        if !entry.is_folder() || config.is_excluded(&entry.name) {
            continue;
        }
        let layout_data = folder.join(&entry.name).join(&config.data_folder);
        if let Some(variant) = probe_variant(storage, &layout_data, config) {
            variants.push(Variant {
                id: entry.name.clone(),
                label: layout_label(&entry.name),
                path: format!("{}/{}", entry.name, config.data_folder),
                ..variant
            });
        }
    }

    if variants.is_empty() {
        debug!("Skipping {}: no {}", folder.display(), config.config_file_name);
        return None;
    }

    Some(Track {
        id,
        name,
        tags,
        variants,
        folder: folder.to_path_buf(),
    })
}

/// Layout rooted at `data_folder`, with placeholder id and label.
fn probe_variant<S: Storage + ?Sized>(storage: &S, data_folder: &Path, config: &Config) -> Option<Variant> {
    let file: PathBuf = data_folder.join(&config.config_file_name);
    if !storage.is_file(&file) {
        return None;
    }

    Some(Variant {
        id: String::new(),
        label: String::new(),
        path: String::new(),
        file,
        folder: data_folder.to_path_buf(),
    })
}

/// Name and tags from `ui/ui_track.json`, each optional on its own.
/// Any failure reading the file means "no metadata".
fn read_metadata<S: Storage + ?Sized>(
    storage: &S,
    folder: &Path,
    config: &Config,
) -> (Option<String>, Vec<String>) {
    let path = folder.join(&config.metadata_folder).join(&config.metadata_file);
    if !storage.is_file(&path) {
        return (None, Vec::new());
    }

    let json = storage
        .read_to_string(&path)
        .map_err(|e| debug!("Ignoring unreadable {}: {}", path.display(), e))
        .ok()
        .and_then(|text| {
            serde_json::from_str::<serde_json::Value>(text.trim_start_matches('\u{feff}'))
                .map_err(|e| debug!("Ignoring malformed {}: {}", path.display(), e))
                .ok()
        });
    let Some(json) = json else {
        return (None, Vec::new());
    };

    let name = json
        .get("name")
        .and_then(|v| v.as_str())
        .filter(|name| !name.trim().is_empty())
        .map(str::to_string);
    let tags = json
        .get("tags")
        .and_then(|v| v.as_array())
        .map(|tags| {
            tags.iter()
                .filter_map(|tag| tag.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    (name, tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    const INI: &str = "[SURFACE_0]\nKEY=ROAD\n";

    fn names(tracks: &[Track]) -> Vec<&str> {
        tracks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_default_layout_only() {
        let mut storage = MemoryStorage::new();
        storage.add_file("/ac/content/tracks/monza/data/surfaces.ini", INI);

        let tracks = scan(&storage, Path::new("/ac"), &Config::default()).unwrap();

        assert_eq!(names(&tracks), vec!["monza"]);
        let variants = &tracks[0].variants;
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].id, "default");
        assert_eq!(variants[0].label, "Default Layout");
        assert_eq!(variants[0].path, "data");
        assert_eq!(variants[0].folder, PathBuf::from("/ac/content/tracks/monza/data"));
    }

    #[test]
    fn test_extra_layouts_and_exclusions() {
        let mut storage = MemoryStorage::new();
        storage.add_file("/tracks/spa/data/surfaces.ini", INI);
        storage.add_file("/tracks/spa/gp/data/surfaces.ini", INI);
        storage.add_file("/tracks/spa/24h_layout/data/surfaces.ini", INI);
        storage.add_file("/tracks/spa/skins/data/surfaces.ini", INI);
        storage.add_file("/tracks/spa/ai/data/surfaces.ini", INI);
        storage.add_file("/tracks/spa/extension/ext_config.ini", "");

        let tracks = scan(&storage, Path::new("/tracks"), &Config::default()).unwrap();
        let labels: Vec<(&str, &str, &str)> = tracks[0]
            .variants
            .iter()
            .map(|v| (v.id.as_str(), v.label.as_str(), v.path.as_str()))
            .collect();

        assert_eq!(
            labels,
            vec![
                ("default", "Default Layout", "data"),
                ("24h_layout", "24H LAYOUT", "24h_layout/data"),
                ("gp", "GP", "gp/data"),
            ]
        );
    }

    #[test]
    fn test_track_without_layouts_skipped() {
        let mut storage = MemoryStorage::new();
        storage.add_file("/mods/imola/data/surfaces.ini", INI);
        storage.add_file("/mods/broken/data/cameras.ini", "");
        storage.add_folder("/mods/empty");

        let tracks = scan(&storage, Path::new("/mods"), &Config::default()).unwrap();
        assert_eq!(names(&tracks), vec!["imola"]);
    }

    #[test]
    fn test_single_track_root() {
        let mut storage = MemoryStorage::new();
        storage.add_file("/downloads/rt_suzuka/data/surfaces.ini", INI);
        storage.add_file("/downloads/rt_suzuka/east/data/surfaces.ini", INI);

        let tracks = scan(&storage, Path::new("/downloads/rt_suzuka"), &Config::default()).unwrap();

        assert_eq!(names(&tracks), vec!["rt_suzuka"]);
        assert_eq!(tracks[0].variants.len(), 2);
    }

    #[test]
    fn test_single_track_root_with_parent_segment() {
        let mut storage = MemoryStorage::new();
        storage.add_file("/downloads/drift/data/surfaces.ini", INI);

        let tracks = scan(&storage, Path::new("/downloads/drift/data/.."), &Config::default()).unwrap();

        assert_eq!(names(&tracks), vec!["drift"]);
        assert_eq!(tracks[0].folder, PathBuf::from("/downloads/drift"));
    }

    #[test]
    fn test_metadata_name_and_tags() {
        let mut storage = MemoryStorage::new();
        storage.add_file("/t/ks_nurburgring/data/surfaces.ini", INI);
        storage.add_file(
            "/t/ks_nurburgring/ui/ui_track.json",
            r#"{ "name": "Nürburgring", "tags": ["germany", 7, "gp"] }"#,
        );

        let tracks = scan(&storage, Path::new("/t"), &Config::default()).unwrap();

        assert_eq!(tracks[0].name, "Nürburgring");
        assert_eq!(tracks[0].tags, vec!["germany", "gp"]);
    }

    #[test]
    fn test_metadata_tags_without_name() {
        let mut storage = MemoryStorage::new();
        storage.add_file("/t/ebisu_minami/data/surfaces.ini", INI);
        storage.add_file(
            "/t/ebisu_minami/ui/ui_track.json",
            r#"{ "name": " ", "tags": ["drift", "japan"] }"#,
        );

        let tracks = scan(&storage, Path::new("/t"), &Config::default()).unwrap();

        assert_eq!(tracks[0].name, "ebisu_minami");
        assert_eq!(tracks[0].tags, vec!["drift", "japan"]);
        assert!(tracks[0].matches("JAPAN"));
    }

    #[test]
    fn test_bad_metadata_falls_back() {
        let mut storage = MemoryStorage::new();
        storage.add_file("/t/a/data/surfaces.ini", INI);
        storage.add_file("/t/a/ui/ui_track.json", "{ not json");
        storage.add_file("/t/b/data/surfaces.ini", INI);
        storage.add_file("/t/b/ui/ui_track.json", r#"{ "name": 12 }"#);
        storage.add_file("/t/c/data/surfaces.ini", INI);
        storage.add_file("/t/c/ui/ui_track.json", "{}");
        storage.deny_read("/t/c/ui/ui_track.json");

        let tracks = scan(&storage, Path::new("/t"), &Config::default()).unwrap();

        for track in &tracks {
            assert_eq!(track.name, track.id);
            assert!(track.tags.is_empty());
        }
        assert_eq!(tracks.len(), 3);
    }

    #[test]
    fn test_unreadable_track_folder_keeps_default_layout() {
        let mut storage = MemoryStorage::new();
        storage.add_file("/t/a/data/surfaces.ini", INI);
        storage.deny_read("/t/a");

        let tracks = scan(&storage, Path::new("/t"), &Config::default()).unwrap();
        assert_eq!(tracks[0].variants.len(), 1);
    }

    #[test]
    fn test_unlistable_root_is_reported() {
        let storage = MemoryStorage::new();
        let err = scan(&storage, Path::new("/nowhere"), &Config::default()).unwrap_err();
        assert_eq!(err.error_code(), "FILE_NOT_FOUND");
    }

    #[test]
    fn test_custom_exclusions() {
        let mut storage = MemoryStorage::new();
        storage.add_file("/t/a/data/surfaces.ini", INI);
        storage.add_file("/t/a/skins/data/surfaces.ini", INI);
        let config = Config {
            excluded_folders: vec!["data".to_string()],
            ..Config::default()
        };

        let tracks = scan(&storage, Path::new("/t"), &config).unwrap();
        assert_eq!(tracks[0].variants[1].label, "SKINS");
    }
}
