//! Session Failure Tests
//!
//! Storage failures injected through `MemoryStorage`: the session must keep
//! its state whenever a load or a save does not go through.

use std::path::Path;

use pretty_assertions::assert_eq;

use surfmod::scan::{self, Variant};
use surfmod::{ini, preset, Config, EditSession, MemoryStorage, Storage};

const MONZA: &str = "/ac/content/tracks/monza/data/surfaces.ini";
const MONZA_BAK: &str = "/ac/content/tracks/monza/data/surfaces.ini.bak";
const SPA: &str = "/ac/content/tracks/spa/data/surfaces.ini";

const MONZA_INI: &str = "[SURFACE_0]\nKEY=ROAD\nFRICTION=0.98\nIS_VALID_TRACK=1\n[SURFACE_1]\nKEY=GRASS\nFRICTION=0.4\nIS_VALID_TRACK=0\n[SURFACE_2]\nKEY=KERB\nFRICTION=0.92\n";
const SPA_INI: &str = "[SURFACE_0]\nKEY=ROAD\nFRICTION=0.97\n";

fn storage() -> MemoryStorage {
    let mut storage = MemoryStorage::new();
    storage.add_file(MONZA, MONZA_INI);
    storage.add_file(SPA, SPA_INI);
    storage
}

fn loaded() -> EditSession<MemoryStorage> {
    let mut session = EditSession::new(storage(), Config::default());
    session.load_variant(Variant::standalone(Path::new(MONZA))).unwrap();
    session
}

#[test]
fn test_denied_load_keeps_previous_layout() {
    let mut session = loaded();
    session.toggle_selection("SURFACE_2").unwrap();
    session.apply_preset(preset::find("sand_loose").unwrap()).unwrap();
    session.storage_mut().deny_read(SPA);

    let err = session
        .load_variant(Variant::standalone(Path::new(SPA)))
        .unwrap_err();

    assert_eq!(err.error_code(), "ACCESS_DENIED");
    assert!(err.is_recoverable());
    assert_eq!(session.variant().unwrap().file, Path::new(MONZA));
    assert_eq!(session.sections().len(), 3);
    assert_eq!(session.modified_count(), 1);
    assert!(session.section("SURFACE_2").unwrap().is_selected());
}

#[test]
fn test_missing_file_load() {
    let mut session = loaded();

    let err = session
        .load_variant(Variant::standalone(Path::new("/ac/nowhere/surfaces.ini")))
        .unwrap_err();

    assert_eq!(err.error_code(), "FILE_NOT_FOUND");
    assert_eq!(session.sections().len(), 3);
}

#[test]
fn test_write_failure_after_backup() {
    let mut session = loaded();
    session.toggle_selection("SURFACE_1").unwrap();
    session.apply_preset(preset::find("ice").unwrap()).unwrap();
    session.storage_mut().deny_write(MONZA);

    let err = session.save().unwrap_err();

    assert_eq!(err.status_message(), "SAVE FAILED");
    assert_eq!(session.storage().file(MONZA_BAK), Some(MONZA_INI.as_bytes()));
    assert_eq!(session.storage().file(MONZA), Some(MONZA_INI.as_bytes()));
    assert_eq!(session.modified_count(), 1);
    assert_eq!(session.section("SURFACE_1").unwrap().friction(), "0.15");

    // Retrying once the file is writable keeps the first backup.
    session.storage_mut().allow_all();
    let report = session.save().unwrap();

    assert_eq!(report.backup_created, None);
    assert_eq!(report.sections_modified, 1);
    assert_eq!(session.storage().file(MONZA_BAK), Some(MONZA_INI.as_bytes()));
}

#[test]
fn test_backup_failure_leaves_file_untouched() {
    let mut session = loaded();
    session.select_all();
    session.apply_preset(preset::find("asphalt").unwrap()).unwrap();
    session.storage_mut().deny_write(MONZA_BAK);

    let err = session.save().unwrap_err();

    assert_eq!(err.error_code(), "ACCESS_DENIED");
    assert!(!session.storage().is_file(Path::new(MONZA_BAK)));
    assert_eq!(session.storage().file(MONZA), Some(MONZA_INI.as_bytes()));
    assert_eq!(session.modified_count(), 3);
}

#[test]
fn test_apply_without_selection_changes_nothing() {
    let mut session = loaded();
    let before = session.render();

    let err = session.apply_preset(preset::find("gravel_firm").unwrap()).unwrap_err();

    assert_eq!(err.status_message(), "SELECT SURFACES FIRST");
    assert_eq!(session.render(), before);
    assert_eq!(session.modified_count(), 0);
}

#[test]
fn test_unselected_sections_are_never_mutated() {
    let mut session = loaded();
    let fresh = ini::parse(MONZA_INI);

    session.toggle_selection("SURFACE_1").unwrap();
    for id in ["ice", "snow_loose", "gravel_med", "asphalt"] {
        session.apply_preset(preset::find(id).unwrap()).unwrap();
    }

    for index in [0, 2] {
        let section = &session.sections()[index];
        assert_eq!(section.current_lines(), fresh[index].current_lines());
        assert!(!section.is_modified());
    }
    assert_eq!(session.section("SURFACE_1").unwrap().friction(), "0.98");
}

#[test]
fn test_restore_all_renders_like_a_fresh_parse() {
    let mut session = loaded();
    session.select_all();
    session.apply_preset(preset::find("snow_regular").unwrap()).unwrap();

    for id in ["SURFACE_0", "SURFACE_1", "SURFACE_2"] {
        session.restore_section(id).unwrap();
    }

    let fresh = ini::render(&ini::parse(MONZA_INI), ini::RenderOptions::default());
    assert_eq!(session.render(), fresh);
    assert_eq!(session.modified_count(), 0);
}

#[test]
fn test_scan_then_edit_second_track() {
    let storage = storage();
    let tracks = scan::scan(&storage, Path::new("/ac"), &Config::default()).unwrap();
    let spa = scan::find_track(&tracks, "spa").unwrap();

    let mut session = EditSession::new(storage, Config::default());
    session.load_variant(spa.variant(None).unwrap().clone()).unwrap();
    session.toggle_selection("SURFACE_0").unwrap();
    session.apply_preset(preset::find("dirt_compact").unwrap()).unwrap();
    session.save().unwrap();

    let written = String::from_utf8_lossy(session.storage().file(SPA).unwrap()).into_owned();
    assert!(written.starts_with(";ORIGINAL: [SURFACE_0]\r\n"));
    assert!(written.contains("_EXT_SURFACE_TYPE=DIRT\r\nFRICTION=0.70\r\n"));
    assert_eq!(session.storage().file(MONZA), Some(MONZA_INI.as_bytes()));
}
