//! Project presets and preset management rules.
//!
//! A preset bundles a settings document with a folder structure on disk.
//! Names are unique among presets and the `Default` preset always exists.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::settings::{ProjectSettings, DEFAULT_PRESET_NAME};
use crate::validation::{validate_field, FieldKind};

/// Maximum length of a preset name.
pub const MAX_PRESET_NAME_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub path: PathBuf,
    #[serde(default)]
    pub settings: ProjectSettings,
}

/// Validate the name for a new preset against the allowlist, the length
/// limit and the names already taken.
pub fn validate_new_preset_name(name: &str, existing: &[Preset]) -> Result<(), CoreError> {
    validate_field(FieldKind::PresetName, name)?;
    if name.len() > MAX_PRESET_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Preset name too long: {} chars (max {MAX_PRESET_NAME_LEN})",
            name.len()
        )));
    }
    if existing.iter().any(|p| p.name == name) {
        return Err(CoreError::Conflict(format!(
            "A preset named '{name}' already exists"
        )));
    }
    Ok(())
}

/// Check that the preset may be deleted.
pub fn ensure_deletable(name: &str) -> Result<(), CoreError> {
    if name == DEFAULT_PRESET_NAME {
        return Err(CoreError::Validation(
            "Cannot delete the default project preset.".to_string(),
        ));
    }
    Ok(())
}

/// Preset names in presentation order.
pub fn preset_names(presets: &[Preset]) -> Vec<&str> {
    presets.iter().map(|p| p.name.as_str()).collect()
}

/// After the preset list was refreshed, keep the current selection if it
/// still exists. `None` means the selection is gone and settings must be
/// reloaded.
pub fn reselect_preset<'a>(current: &str, presets: &'a [Preset]) -> Option<&'a Preset> {
    presets.iter().find(|p| p.name == current)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn preset(name: &str) -> Preset {
        Preset {
            name: name.to_string(),
            path: PathBuf::from(format!("/presets/{name}")),
            settings: ProjectSettings::new(),
        }
    }

    #[test]
    fn new_preset_name_accepts_valid() {
        assert!(validate_new_preset_name("Feature_Film", &[preset("Default")]).is_ok());
    }

    #[test]
    fn new_preset_name_rejects_spaces() {
        assert_matches!(
            validate_new_preset_name("Feature Film", &[]),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn new_preset_name_rejects_empty() {
        assert!(validate_new_preset_name("", &[]).is_err());
    }

    #[test]
    fn new_preset_name_rejects_duplicate() {
        assert_matches!(
            validate_new_preset_name("Default", &[preset("Default")]),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn new_preset_name_rejects_too_long() {
        let long = "x".repeat(MAX_PRESET_NAME_LEN + 1);
        let err = validate_new_preset_name(&long, &[]).unwrap_err();
        assert!(err.to_string().contains("too long"));
    }

    #[test]
    fn default_preset_is_not_deletable() {
        let err = ensure_deletable("Default").unwrap_err();
        assert_eq!(err.message(), "Cannot delete the default project preset.");
        assert!(ensure_deletable("Feature").is_ok());
    }

    #[test]
    fn reselect_keeps_existing_selection() {
        let presets = vec![preset("Default"), preset("Feature")];
        assert_eq!(reselect_preset("Feature", &presets).map(|p| p.name.as_str()), Some("Feature"));
        assert!(reselect_preset("Commercial", &presets).is_none());
        assert_eq!(preset_names(&presets), vec!["Default", "Feature"]);
    }
}
