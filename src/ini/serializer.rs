//! Serializer
//!
//! Rebuilds `surfaces.ini` text from a section list. Modified sections can be
//! preceded by a commented copy of their original lines so nothing is lost
//! when the file is overwritten.

use crate::ini::section::Section;

/// Prefix of the commented copy of a modified section's original lines.
pub const ORIGINAL_PREFIX: &str = ";ORIGINAL: ";

/// Line terminator used for every written line.
pub const LINE_ENDING: &str = "\r\n";

/// Output options for [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit `;ORIGINAL: ` lines before each modified section.
    pub annotate: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { annotate: true }
    }
}

/// Render sections to file text.
///
/// Sections are separated by one blank line; a section already ending in a
/// blank line gets no extra one, so repeated saves do not grow the file.
/// Nor does a section ending in `;ORIGINAL: ` lines: after a reload those
/// belong to the next section's header.
pub fn render(sections: &[Section], options: RenderOptions) -> String {
    let mut lines: Vec<String> = Vec::new();

    for section in sections {
        if lines
            .last()
            .is_some_and(|last| !last.trim().is_empty() && !last.starts_with(ORIGINAL_PREFIX))
        {
            lines.push(String::new());
        }

        if options.annotate && section.is_modified() {
            lines.extend(
                section
                    .initial_lines()
                    .iter()
                    .map(|line| format!("{}{}", ORIGINAL_PREFIX, line)),
            );
        }
        lines.extend(section.current_lines().iter().cloned());
    }

    if lines.is_empty() {
        return String::new();
    }

    let mut text = lines.join(LINE_ENDING);
    text.push_str(LINE_ENDING);
    text
}
