//! INI Module
//!
//! Section-preserving parsing and rendering of `surfaces.ini` files.

pub mod parser;
pub mod section;
pub mod serializer;

pub use parser::{parse, section_id};
pub use section::Section;
pub use serializer::{render, RenderOptions, LINE_ENDING, ORIGINAL_PREFIX};
