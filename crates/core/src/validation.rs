//! Character allowlists for user-editable fields.
//!
//! Every field accepts ASCII letters, digits and `_`. Some fields accept a
//! few extra characters on top (spaces in names, separators in paths).
//! Text is sanitised while the user types and checked again on submit.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The kind of field being edited, which selects its allowlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    ProjectName,
    ProjectPath,
    PresetName,
    AssetPath,
    FolderName,
    Department,
    Task,
    Product,
    Identifier,
    Aov,
}

impl FieldKind {
    /// Characters accepted in addition to `[A-Za-z0-9_]`.
    pub fn extra_chars(self) -> &'static [char] {
        match self {
            Self::ProjectName | Self::FolderName => &[' '],
            Self::ProjectPath => &['/', '\\', ':', ' '],
            Self::AssetPath => &['/'],
            Self::PresetName
            | Self::Department
            | Self::Task
            | Self::Product
            | Self::Identifier
            | Self::Aov => &[],
        }
    }

    /// Human-readable label used in messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::ProjectName => "project name",
            Self::ProjectPath => "project path",
            Self::PresetName => "preset name",
            Self::AssetPath => "asset",
            Self::FolderName => "folder name",
            Self::Department => "department",
            Self::Task => "task",
            Self::Product => "product",
            Self::Identifier => "identifier",
            Self::Aov => "aov",
        }
    }

    pub fn allows(self, c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_' || self.extra_chars().contains(&c)
    }
}

/// Strip every character the field does not allow.
///
/// Called on each keystroke so disallowed input never reaches the form.
pub fn sanitize_field(kind: FieldKind, text: &str) -> String {
    text.chars().filter(|&c| kind.allows(c)).collect()
}

/// Characters of `text` the field rejects, in order of first appearance.
pub fn rejected_chars(kind: FieldKind, text: &str) -> Vec<char> {
    let mut rejected = Vec::new();
    for c in text.chars() {
        if !kind.allows(c) && !rejected.contains(&c) {
            rejected.push(c);
        }
    }
    rejected
}

/// `true` when `text` is non-empty and contains only allowed characters.
pub fn is_valid_field(kind: FieldKind, text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| kind.allows(c))
}

/// Validate a required field: non-empty and within the allowlist.
pub fn validate_field(kind: FieldKind, text: &str) -> Result<(), CoreError> {
    if text.is_empty() {
        return Err(CoreError::Validation(format!(
            "The {} must not be empty",
            kind.label()
        )));
    }

    let rejected = rejected_chars(kind, text);
    if !rejected.is_empty() {
        let listed: String = rejected.iter().map(|c| format!("'{c}'")).collect::<Vec<_>>().join(", ");
        return Err(CoreError::Validation(format!(
            "The {} contains invalid characters: {listed}",
            kind.label()
        )));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
