//! Media path collection for the ingest and version dialogs.
//!
//! The media field shows a placeholder until something is dropped or
//! browsed. Selected paths are shown one per line.

use crate::naming::normalize_path;

/// Placeholder of the media field in the ingest dialog.
pub const MEDIA_PLACEHOLDER: &str = "< Click or Drag & Drop media >";

/// Placeholder of the file field in the version dialog.
pub const FILES_PLACEHOLDER: &str = "< Click or Drag & Drop files >";

/// Paths picked in a media field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaSelection {
    paths: Vec<String>,
}

impl MediaSelection {
    /// Nothing selected.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Paths dropped onto the field, lexically normalised. Blank entries
    /// are ignored.
    pub fn from_drop<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paths = paths
            .into_iter()
            .filter(|p| !p.as_ref().trim().is_empty())
            .map(|p| normalize_path(p.as_ref().trim()))
            .collect();
        Self { paths }
    }

    /// A single path picked in a browse dialog.
    pub fn from_browse(path: &str) -> Self {
        if path.trim().is_empty() {
            return Self::empty();
        }
        Self {
            paths: vec![path.replace('\\', "/")],
        }
    }

    /// Parse the field text back. The placeholders and blank text mean
    /// nothing is selected.
    pub fn from_display_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == MEDIA_PLACEHOLDER || trimmed == FILES_PLACEHOLDER {
            return Self::empty();
        }
        Self {
            paths: trimmed
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn is_set(&self) -> bool {
        !self.paths.is_empty()
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn into_paths(self) -> Vec<String> {
        self.paths
    }

    /// Field text: the paths joined by newlines, or `placeholder` when
    /// nothing is selected.
    pub fn display_text(&self, placeholder: &str) -> String {
        if self.paths.is_empty() {
            placeholder.to_string()
        } else {
            self.paths.join("\n")
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
