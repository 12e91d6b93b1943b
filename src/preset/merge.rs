//! Preset Merge Engine
//!
//! Rewrites selected sections with a preset's fixed block. Unselected
//! sections are never touched, and the load-time snapshot is kept so the
//! rewritten sections report as modified.

use crate::error::{Result, SurfaceError};
use crate::ini::Section;
use crate::preset::catalog::Preset;

/// Replacement block for one section: header, then fields in fixed order.
///
/// `IS_VALID_TRACK` is always `1`, whatever the surface.
pub fn preset_lines(section_id: &str, preset: &Preset) -> Vec<String> {
    let mut lines = vec![format!("[{}]", section_id), "KEY=ROAD".to_string()];

    if let Some(surface_type) = preset.surface_type {
        lines.push(format!("_EXT_SURFACE_TYPE={}", surface_type));
        if let Some(modifier) = preset.modifier {
            lines.push(format!("_EXT_SURFACE_TYPE_MODIFIER={}", modifier));
        }
        if let Some(index) = preset.gravel_preset {
            lines.push(format!("GRAVEL_PRESET={}", index));
        }
    }

    lines.extend([
        format!("FRICTION={}", preset.friction),
        format!("DAMPING={}", preset.damping),
        format!("WAV={}", preset.wav),
        "WAV_PITCH=0".to_string(),
        "FF_EFFECT=NULL".to_string(),
        format!("DIRT_ADDITIVE={}", preset.dirt_additive),
        "IS_VALID_TRACK=1".to_string(),
        "BLACK_FLAG_TIME=0".to_string(),
        "SIN_HEIGHT=0".to_string(),
        "SIN_LENGTH=0".to_string(),
        "IS_PITLANE=0".to_string(),
        format!("VIBRATION_GAIN={}", preset.vibration_gain),
        format!("VIBRATION_LENGTH={}", preset.vibration_length),
    ]);

    lines
}

/// Apply `preset` to every selected section.
///
/// Returns the number of rewritten sections. Fails with
/// [`SurfaceError::NoSelection`] and changes nothing when no section is
/// selected.
pub fn apply(sections: &mut [Section], preset: &Preset) -> Result<usize> {
    if !sections.iter().any(Section::is_selected) {
        return Err(SurfaceError::NoSelection);
    }

    let mut rewritten = 0;
    for section in sections.iter_mut().filter(|s| s.is_selected()) {
        let lines = preset_lines(section.id(), preset);
        section.replace_lines(lines);
        rewritten += 1;
    }

    Ok(rewritten)
}
