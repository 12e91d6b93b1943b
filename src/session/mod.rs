//! Edit Session
//!
//! Holds the sections of the layout being edited. Front-ends read selection
//! and modified state from here instead of keeping their own copies.
//!
//! Loading replaces everything: unsaved edits of the previous layout are
//! dropped. Saving copies the on-disk file to a `.bak` sibling the first time
//! (the backup is never overwritten), writes the rendered text, then takes the
//! written content as the new baseline.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::config::Config;
use crate::error::{Result, SurfaceError};
use crate::ini::{self, RenderOptions, Section};
use crate::preset::{self, Preset};
use crate::scan::Variant;
use crate::storage::Storage;

/// Outcome of a successful [`EditSession::save`].
#[derive(Debug, Clone, Serialize)]
pub struct SaveReport {
    /// File that was written.
    pub file: PathBuf,
    /// Backup created by this save; `None` when one already existed.
    pub backup_created: Option<PathBuf>,
    pub bytes_written: usize,
    /// Sections that differed from the previous baseline.
    pub sections_modified: usize,
    pub saved_at: DateTime<Utc>,
}

/// In-memory editing state for one layout.
pub struct EditSession<S: Storage> {
    storage: S,
    config: Config,
    variant: Option<Variant>,
    sections: Vec<Section>,
}

impl<S: Storage> EditSession<S> {
    /// Create an empty session over a storage collaborator.
    pub fn new(storage: S, config: Config) -> Self {
        Self {
            storage,
            config,
            variant: None,
            sections: Vec::new(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Layout currently loaded.
    pub fn variant(&self) -> Option<&Variant> {
        self.variant.as_ref()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Section by id, ignoring case.
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id().eq_ignore_ascii_case(id))
    }

    fn section_mut(&mut self, id: &str) -> Result<&mut Section> {
        self.sections
            .iter_mut()
            .find(|s| s.id().eq_ignore_ascii_case(id))
            .ok_or_else(|| SurfaceError::UnknownSection { id: id.to_string() })
    }

    pub fn selected_count(&self) -> usize {
        self.sections.iter().filter(|s| s.is_selected()).count()
    }

    pub fn modified_count(&self) -> usize {
        self.sections.iter().filter(|s| s.is_modified()).count()
    }

    /// Status line for the loaded layout, e.g. `12 SURFACES`.
    pub fn status(&self) -> String {
        format!("{} SURFACES", self.sections.len())
    }

    /// Read and parse a layout, replacing the current one.
    ///
    /// On failure the previously loaded layout stays as it was.
    pub fn load_variant(&mut self, variant: Variant) -> Result<usize> {
        info!("Loading {} ({})", variant.label, variant.file.display());

        let text = self.storage.read_to_string(&variant.file)?;
        self.sections = ini::parse(&text);
        self.variant = Some(variant);

        debug!("Parsed {} sections", self.sections.len());
        Ok(self.sections.len())
    }

    /// Flip one section's selection. Returns the new state.
    pub fn toggle_selection(&mut self, id: &str) -> Result<bool> {
        let section = self.section_mut(id)?;
        section.toggle_selected();
        Ok(section.is_selected())
    }

    pub fn select_all(&mut self) {
        self.sections.iter_mut().for_each(|s| s.set_selected(true));
    }

    pub fn clear_selection(&mut self) {
        self.sections.iter_mut().for_each(|s| s.set_selected(false));
    }

    /// Rewrite every selected section with `preset`.
    pub fn apply_preset(&mut self, preset: &Preset) -> Result<usize> {
        if self.variant.is_none() {
            return Err(SurfaceError::NoVariantLoaded);
        }

        let count = preset::apply(&mut self.sections, preset)?;
        info!("{} applied to {} sections", preset.code, count);
        Ok(count)
    }

    /// Put one section back to its baseline content. Selection is kept.
    pub fn restore_section(&mut self, id: &str) -> Result<()> {
        self.section_mut(id)?.restore();
        Ok(())
    }

    /// Current file text, annotated according to the configuration.
    pub fn render(&self) -> String {
        ini::render(
            &self.sections,
            RenderOptions {
                annotate: self.config.annotate_modified,
            },
        )
    }

    /// Back up (once), write, then re-baseline.
    ///
    /// If the backup is written but the main write fails, the backup stays in
    /// place, the configuration file is unchanged and the sections keep their
    /// modified state.
    pub fn save(&mut self) -> Result<SaveReport> {
        let variant = self.variant.clone().ok_or(SurfaceError::NoVariantLoaded)?;
        let text = self.render();

        let backup_created = self.ensure_backup(&variant)?;

        if let Err(e) = self.storage.write(&variant.file, text.as_bytes()) {
            if let Some(backup) = &backup_created {
                warn!(
                    "Backup {} written but saving {} failed",
                    backup.display(),
                    variant.file.display()
                );
            }
            return Err(e);
        }

        let sections_modified = self.modified_count();
        for section in &mut self.sections {
            section.rebaseline();
        }

        info!(
            "Saved {} ({} modified sections)",
            variant.file.display(),
            sections_modified
        );

        Ok(SaveReport {
            file: variant.file,
            backup_created,
            bytes_written: text.len(),
            sections_modified,
            saved_at: Utc::now(),
        })
    }

    /// Copy the on-disk file to its backup sibling unless one exists.
    ///
    /// A copy that fails verification is removed again, so the next save
    /// retries the backup.
    fn ensure_backup(&mut self, variant: &Variant) -> Result<Option<PathBuf>> {
        let backup = variant.backup_path(&self.config);
        if self.storage.is_file(&backup) {
            debug!("Backup already present: {}", backup.display());
            return Ok(None);
        }

        let original = self.storage.read(&variant.file)?;
        self.storage.write(&backup, &original)?;

        let expected = Sha256::digest(&original);
        let written = Sha256::digest(self.storage.read(&backup)?);
        if written != expected {
            if let Err(e) = self.storage.remove(&backup) {
                warn!("Could not remove damaged backup {}: {}", backup.display(), e);
            }
            return Err(SurfaceError::BackupMismatch { path: backup });
        }

        info!("Backup created: {} (sha256 {:x})", backup.display(), expected);
        Ok(Some(backup))
    }
}
