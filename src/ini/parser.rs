//! Section Parser
//!
//! Turns `surfaces.ini` text into an ordered list of [`Section`]s. Every line
//! after the first header is kept verbatim, whether or not it is understood.

use std::sync::OnceLock;

use regex::Regex;

use crate::ini::section::Section;

fn header_pattern() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| Regex::new(r"(?i)^\[(SURFACE_\d+)\]").expect("valid header pattern"))
}

/// Normalized section id when `line` is a `[SURFACE_n]` header.
pub fn section_id(line: &str) -> Option<String> {
    header_pattern()
        .captures(line)
        .map(|caps| caps[1].to_uppercase())
}

/// Parse the full text of a `surfaces.ini` file.
///
/// Lines end at `\n` with an optional `\r`; a trailing newline terminates the
/// last line rather than starting an empty one. Content before the first
/// header is dropped.
pub fn parse(text: &str) -> Vec<Section> {
    let body = text.strip_suffix('\n').unwrap_or(text);
    let mut sections = Vec::new();
    let mut current: Option<Section> = None;

    for raw in body.split('\n') {
        let line = raw.strip_suffix('\r').unwrap_or(raw);

        if let Some(id) = section_id(line) {
            if let Some(done) = current.take() {
                sections.push(done);
            }
            current = Some(Section::new(line, id));
        } else if let Some(section) = current.as_mut() {
            section.push_line(line);
        }
    }

    sections.extend(current);
    sections
}
