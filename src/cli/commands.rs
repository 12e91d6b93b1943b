//! CLI Command Implementations
//!
//! Each command opens its own session; nothing is kept between runs.

use std::path::Path;

use log::info;

use crate::cli::Target;
use crate::config::Config;
use crate::error::{Result, SurfaceError};
use crate::preset::{self, PRESETS};
use crate::scan::{self, filter_tracks, find_track, Variant};
use crate::session::EditSession;
use crate::storage::FsStorage;

/// List tracks and layouts under `root`, sorted by display name.
pub fn scan(root: &Path, filter: Option<&str>, json: bool, config: &Config) -> Result<()> {
    let storage = FsStorage::new();
    let mut tracks = scan::scan(&storage, root, config)?;
    tracks.sort_by_key(|track| track.name.to_lowercase());

    let shown = filter_tracks(&tracks, filter.unwrap_or_default());

    if json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    if shown.is_empty() {
        println!("No tracks found.");
        return Ok(());
    }

    for track in &shown {
        println!("{}", track.display_name());
        for variant in &track.variants {
            println!("    {:<12} {:<24} {}", variant.id, variant.label, variant.path);
        }
    }
    println!("{:-<60}", "");
    println!("{} TRACKS LOADED", shown.len());

    Ok(())
}

/// List the preset catalog.
pub fn presets() -> Result<()> {
    println!(
        "{:<14} {:<18} {:>8} {:>8}  {}",
        "ID", "NAME", "FRICTION", "DAMPING", "TYPE"
    );
    println!("{:-<60}", "");
    for preset in PRESETS {
        println!(
            "{:<14} {:<18} {:>8} {:>8}  {}",
            preset.id,
            preset.name,
            preset.friction,
            preset.damping,
            preset.surface_type.unwrap_or("-")
        );
    }
    Ok(())
}

/// Print the sections of a layout.
pub fn show(target: &Target, config: &Config) -> Result<()> {
    let storage = FsStorage::new();
    let variant = resolve_variant(&storage, target, config)?;

    let mut session = EditSession::new(storage, config.clone());
    session.load_variant(variant)?;

    if let Some(variant) = session.variant() {
        println!("{} ({})", variant.label, variant.file.display());
    }
    println!("{:<14} {:<12} {:<10} {}", "SURFACE", "KEY", "FRICTION", "VALID");
    println!("{:-<60}", "");
    for section in session.sections() {
        println!(
            "{:<14} {:<12} {:<10} {}",
            section.id(),
            or_dashes(section.key()),
            or_dashes(section.friction()),
            or_dashes(section.is_valid_track())
        );
    }
    println!("{:-<60}", "");
    println!("{}", session.status());

    Ok(())
}

fn or_dashes(value: &str) -> &str {
    if value.is_empty() {
        "---"
    } else {
        value
    }
}

/// Apply a preset to the chosen sections, then save or print.
pub fn apply(
    target: &Target,
    preset_id: &str,
    surfaces: &[String],
    all: bool,
    dry_run: bool,
    config: &Config,
) -> Result<()> {
    let preset = preset::get(preset_id)?;
    let storage = FsStorage::new();
    let variant = resolve_variant(&storage, target, config)?;

    let mut session = EditSession::new(storage, config.clone());
    session.load_variant(variant)?;

    if all {
        session.select_all();
    } else {
        for id in surfaces {
            if !session.toggle_selection(id)? {
                // Listed twice; keep it selected.
                session.toggle_selection(id)?;
            }
        }
    }

    let count = session.apply_preset(preset)?;
    println!("{} APPLIED TO {} SURFACES", preset.id.to_uppercase(), count);

    if dry_run {
        print!("{}", session.render());
        return Ok(());
    }

    let report = session.save()?;
    if let Some(backup) = &report.backup_created {
        println!("Backup created: {}", backup.display());
    }
    println!(
        "SAVED SUCCESSFULLY: {} ({} bytes, {} sections modified, {})",
        report.file.display(),
        report.bytes_written,
        report.sections_modified,
        report.saved_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    Ok(())
}

/// Turn CLI target arguments into a layout.
fn resolve_variant(storage: &FsStorage, target: &Target, config: &Config) -> Result<Variant> {
    if let Some(file) = &target.file {
        return Ok(Variant::standalone(file));
    }

    let root = target.root.as_deref().ok_or(SurfaceError::NoVariantLoaded)?;
    let tracks = scan::scan(storage, root, config)?;

    let track = match target.track.as_deref() {
        Some(id) => find_track(&tracks, id)?,
        None if tracks.len() == 1 => &tracks[0],
        None => return Err(SurfaceError::TrackRequired { count: tracks.len() }),
    };

    let variant = track.variant(target.layout.as_deref())?;
    info!("Selected {} / {}", track.display_name(), variant.label);
    Ok(variant.clone())
}
