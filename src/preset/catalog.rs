//! Preset Catalog
//!
//! Canonical surface physics values. Adding a surface is a table edit.

use serde::Serialize;

use crate::error::{Result, SurfaceError};

/// A named set of surface physics parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    /// Lookup identifier, e.g. `gravel_med`.
    pub id: &'static str,
    /// Upper-case code, e.g. `GRAVEL_REGULAR`.
    pub code: &'static str,
    /// Display name.
    pub name: &'static str,
    /// `_EXT_SURFACE_TYPE` value; `None` for plain asphalt.
    pub surface_type: Option<&'static str>,
    /// `_EXT_SURFACE_TYPE_MODIFIER` value.
    pub modifier: Option<&'static str>,
    /// `GRAVEL_PRESET` index.
    pub gravel_preset: Option<u8>,
    pub friction: &'static str,
    pub damping: &'static str,
    /// Rolling sound cue.
    pub wav: &'static str,
    pub dirt_additive: &'static str,
    pub vibration_gain: &'static str,
    pub vibration_length: &'static str,
}

/// Every preset, in menu order.
pub const PRESETS: &[Preset] = &[
    Preset {
        id: "asphalt",
        code: "ASPHALT",
        name: "Asphalt",
        surface_type: None,
        modifier: None,
        gravel_preset: None,
        friction: "0.98",
        damping: "0",
        wav: "",
        dirt_additive: "0",
        vibration_gain: "0",
        vibration_length: "0",
    },
    Preset {
        id: "dirt_compact",
        code: "DIRT_COMPACT",
        name: "Compact Dirt",
        surface_type: Some("DIRT"),
        modifier: None,
        gravel_preset: None,
        friction: "0.70",
        damping: "0",
        wav: "dirt.wav",
        dirt_additive: "0.5",
        vibration_gain: "0.05",
        vibration_length: "0.1",
    },
    Preset {
        id: "gravel_firm",
        code: "GRAVEL_FIRM",
        name: "Gravel (Firm)",
        surface_type: Some("GRAVEL"),
        modifier: Some("REGULAR"),
        gravel_preset: Some(1),
        friction: "0.75",
        damping: "0.01",
        wav: "gravel.wav",
        dirt_additive: "0.7",
        vibration_gain: "0.1",
        vibration_length: "0.2",
    },
    Preset {
        id: "gravel_med",
        code: "GRAVEL_REGULAR",
        name: "Gravel (Regular)",
        surface_type: Some("GRAVEL"),
        modifier: Some("REGULAR"),
        gravel_preset: Some(2),
        friction: "0.65",
        damping: "0.02",
        wav: "gravel.wav",
        dirt_additive: "0.7",
        vibration_gain: "0.15",
        vibration_length: "0.25",
    },
    Preset {
        id: "gravel_loose",
        code: "GRAVEL_LOOSE",
        name: "Gravel (Loose)",
        surface_type: Some("GRAVEL"),
        modifier: Some("REGULAR"),
        gravel_preset: Some(3),
        friction: "0.55",
        damping: "0.03",
        wav: "gravel.wav",
        dirt_additive: "0.7",
        vibration_gain: "0.2",
        vibration_length: "0.3",
    },
    Preset {
        id: "sand_regular",
        code: "SAND_REGULAR",
        name: "Sand (Regular)",
        surface_type: Some("SAND"),
        modifier: Some("REGULAR"),
        gravel_preset: None,
        friction: "0.50",
        damping: "0.02",
        wav: "sand.wav",
        dirt_additive: "0.7",
        vibration_gain: "0.1",
        vibration_length: "0.2",
    },
    Preset {
        id: "sand_loose",
        code: "SAND_LOOSE",
        name: "Sand (Loose)",
        surface_type: Some("SAND"),
        modifier: Some("LOOSE"),
        gravel_preset: None,
        friction: "0.45",
        damping: "0.03",
        wav: "sand.wav",
        dirt_additive: "0.7",
        vibration_gain: "0.15",
        vibration_length: "0.25",
    },
    Preset {
        id: "snow_regular",
        code: "SNOW_REGULAR",
        name: "Snow (Regular)",
        surface_type: Some("SNOW"),
        modifier: Some("REGULAR"),
        gravel_preset: None,
        friction: "0.35",
        damping: "0.02",
        wav: "snow.wav",
        dirt_additive: "0.1",
        vibration_gain: "0.05",
        vibration_length: "0.1",
    },
    Preset {
        id: "snow_loose",
        code: "SNOW_LOOSE",
        name: "Snow (Loose)",
        surface_type: Some("SNOW"),
        modifier: Some("LOOSE"),
        gravel_preset: None,
        friction: "0.25",
        damping: "0.03",
        wav: "snow.wav",
        dirt_additive: "0.2",
        vibration_gain: "0.08",
        vibration_length: "0.15",
    },
    Preset {
        id: "ice",
        code: "ICE",
        name: "Ice",
        surface_type: Some("ICE"),
        modifier: Some("REGULAR"),
        gravel_preset: None,
        friction: "0.15",
        damping: "0.01",
        wav: "",
        dirt_additive: "0",
        vibration_gain: "0.02",
        vibration_length: "0.05",
    },
];

/// Find a preset by id or code, ignoring case.
pub fn find(id: &str) -> Option<&'static Preset> {
    PRESETS
        .iter()
        .find(|p| p.id.eq_ignore_ascii_case(id) || p.code.eq_ignore_ascii_case(id))
}

/// Like [`find`], failing with [`SurfaceError::UnknownPreset`].
pub fn get(id: &str) -> Result<&'static Preset> {
    find(id).ok_or_else(|| SurfaceError::UnknownPreset { id: id.to_string() })
}
