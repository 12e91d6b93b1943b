//! Preset Module
//!
//! Static surface presets and the engine that writes them into sections.

pub mod catalog;
pub mod merge;

pub use catalog::{find, get, Preset, PRESETS};
pub use merge::{apply, preset_lines};
