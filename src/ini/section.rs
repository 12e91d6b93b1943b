//! Surface Section
//!
//! One `[SURFACE_n]` block. The line lists are the source of truth; the
//! scalar fields are display caches derived from them.

/// One `[SURFACE_n]` block of a `surfaces.ini` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    id: String,
    key: String,
    friction: String,
    is_valid_track: String,
    current_lines: Vec<String>,
    initial_lines: Vec<String>,
    selected: bool,
}

/// Well-known fields cached for display and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScalarField {
    Key,
    Friction,
    IsValidTrack,
}

/// Split a `KEY=VALUE` line on its first `=` and classify the key.
///
/// Key match is case-insensitive; the returned value is trimmed but keeps
/// its case.
fn scalar_field(line: &str) -> Option<(ScalarField, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }

    let field = match key.to_uppercase().as_str() {
        "KEY" => ScalarField::Key,
        "FRICTION" => ScalarField::Friction,
        "IS_VALID_TRACK" => ScalarField::IsValidTrack,
        _ => return None,
    };
    Some((field, value.trim()))
}

impl Section {
    /// Open a section from its header line. `id` is the normalized name.
    pub(crate) fn new(header: &str, id: String) -> Self {
        Self {
            id,
            key: String::new(),
            friction: String::new(),
            is_valid_track: String::new(),
            current_lines: vec![header.to_string()],
            initial_lines: vec![header.to_string()],
            selected: false,
        }
    }

    /// Append a body line read from the file to both snapshots.
    pub(crate) fn push_line(&mut self, line: &str) {
        self.cache_scalar(line);
        self.current_lines.push(line.to_string());
        self.initial_lines.push(line.to_string());
    }

    fn cache_scalar(&mut self, line: &str) {
        if let Some((field, value)) = scalar_field(line) {
            let slot = match field {
                ScalarField::Key => &mut self.key,
                ScalarField::Friction => &mut self.friction,
                ScalarField::IsValidTrack => &mut self.is_valid_track,
            };
            *slot = value.to_string();
        }
    }

    /// Recompute the scalar caches from the current lines.
    fn derive_scalars(&mut self) {
        self.key.clear();
        self.friction.clear();
        self.is_valid_track.clear();

        let lines = std::mem::take(&mut self.current_lines);
        for line in lines.iter().skip(1) {
            self.cache_scalar(line);
        }
        self.current_lines = lines;
    }

    /// Normalized identifier, e.g. `SURFACE_3`.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn friction(&self) -> &str {
        &self.friction
    }

    pub fn is_valid_track(&self) -> &str {
        &self.is_valid_track
    }

    /// Lines as they will be written, header first.
    pub fn current_lines(&self) -> &[String] {
        &self.current_lines
    }

    /// Lines as they were when the file was loaded or last saved.
    pub fn initial_lines(&self) -> &[String] {
        &self.initial_lines
    }

    /// Header line as it appears in the current content.
    pub fn header(&self) -> &str {
        &self.current_lines[0]
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn toggle_selected(&mut self) {
        self.selected = !self.selected;
    }

    /// Whether the current lines differ from the snapshot.
    pub fn is_modified(&self) -> bool {
        self.current_lines != self.initial_lines
    }

    /// Replace the whole block. `lines[0]` must be this section's header.
    pub(crate) fn replace_lines(&mut self, lines: Vec<String>) {
        debug_assert!(!lines.is_empty(), "section block needs a header line");
        self.current_lines = lines;
        self.derive_scalars();
    }

    /// Revert the current lines to the snapshot and re-derive the scalars.
    pub fn restore(&mut self) {
        self.current_lines = self.initial_lines.clone();
        self.derive_scalars();
    }

    /// Take the current lines as the new snapshot.
    pub(crate) fn rebaseline(&mut self) {
        self.initial_lines = self.current_lines.clone();
    }
}
