//! surfmod - Track Surface Editor
//!
//! Finds the `surfaces.ini` files of a racing game's tracks, lets selected
//! `[SURFACE_n]` blocks be rewritten with physics presets, and writes the
//! result back next to a one-time `.bak` copy of the original.
//!
//! # Architecture
//!
//! - `scan`: track and layout discovery over a [`storage::Storage`]
//! - `ini`: section-preserving parser and serializer
//! - `preset`: preset catalog and merge engine
//! - `session`: selection, restore and save with backup

pub mod cli;
pub mod config;
pub mod error;
pub mod ini;
pub mod preset;
pub mod scan;
pub mod session;
pub mod storage;

pub use config::Config;
pub use error::{Result, SurfaceError};
pub use ini::Section;
pub use preset::Preset;
pub use scan::{Track, Variant};
pub use session::{EditSession, SaveReport};
pub use storage::{FsStorage, MemoryStorage, Storage};
