//! Project settings documents and the settings resolver.
//!
//! A settings document is a nested JSON mapping. New projects start from the
//! system defaults and take overrides from a preset, from an existing
//! project, or from explicit edits. Overrides are merged recursively:
//!
//! - mapping vs mapping: merged key by key, recursively
//! - anything else: the override value replaces the base value (scalars and
//!   sequences alike, sequences are never concatenated)
//!
//! Keys present only in the base document are always preserved.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::ProjectCatalog;
use crate::error::CoreError;
use crate::folder_structure::FolderStructure;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Name of the preset used for the `Default` settings source.
pub const DEFAULT_PRESET_NAME: &str = "Default";

/// Dotted key of the project name inside a settings document.
pub const PROJECT_NAME_KEY: &str = "globals.project_name";

/// Dotted key of the project path inside a settings document.
pub const PROJECT_PATH_KEY: &str = "globals.project_path";

// ---------------------------------------------------------------------------
// Deep merge
// ---------------------------------------------------------------------------

/// Merge `overlay` into `base` following the module-level conflict policy.
pub fn deep_merge(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            merge_maps(base_map, overlay_map);
        }
        (base, overlay) => *base = overlay.clone(),
    }
}

fn merge_maps(base: &mut Map<String, Value>, overlay: &Map<String, Value>) {
    for (key, value) in overlay {
        match base.get_mut(key) {
            Some(existing) => deep_merge(existing, value),
            None => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Merge one settings document into another.
pub fn merge_settings(base: &mut ProjectSettings, overlay: &ProjectSettings) {
    merge_maps(&mut base.0, &overlay.0);
}

// ---------------------------------------------------------------------------
// ProjectSettings
// ---------------------------------------------------------------------------

/// A nested settings document, always a JSON object at the top level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectSettings(Map<String, Value>);

impl ProjectSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value. Returns `None` unless the value is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a value by dotted key, e.g. `globals.project_name`.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.0.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Set a value by dotted key, creating intermediate mappings.
    ///
    /// A non-mapping value sitting on the way is replaced by a mapping.
    pub fn set_path(&mut self, path: &str, value: Value) {
        let (parents, last) = match path.rsplit_once('.') {
            Some((parents, last)) => (Some(parents), last),
            None => (None, path),
        };

        let mut current = &mut self.0;
        if let Some(parents) = parents {
            for segment in parents.split('.') {
                let entry = current
                    .entry(segment.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                if !entry.is_object() {
                    *entry = Value::Object(Map::new());
                }
                let Value::Object(map) = entry else {
                    return;
                };
                current = map;
            }
        }
        current.insert(last.to_string(), value);
    }

    /// Remove a value by dotted key, returning it if it existed.
    pub fn remove_path(&mut self, path: &str) -> Option<Value> {
        let (parents, last) = match path.rsplit_once('.') {
            Some((parents, last)) => (Some(parents), last),
            None => (None, path),
        };

        let mut current = &mut self.0;
        if let Some(parents) = parents {
            for segment in parents.split('.') {
                current = current.get_mut(segment)?.as_object_mut()?;
            }
        }
        current.remove(last)
    }

    /// Deep-merge `overlay` into this document.
    pub fn merge(&mut self, overlay: &ProjectSettings) {
        merge_settings(self, overlay);
    }
}

impl From<Map<String, Value>> for ProjectSettings {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

// ---------------------------------------------------------------------------
// Settings source
// ---------------------------------------------------------------------------

/// Where the settings for a new project come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SettingsSource {
    Default,
    FromPreset { name: String },
    FromProject { path: PathBuf },
}

impl SettingsSource {
    /// Label shown in the settings source picker.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::FromPreset { .. } => "From Preset",
            Self::FromProject { .. } => "From Project",
        }
    }

    /// Build a source from the picker label plus the preset and project
    /// fields of the dialog. Only the field matching the label is used.
    pub fn from_label(label: &str, preset: &str, project_path: &str) -> Result<Self, CoreError> {
        match label {
            "Default" => Ok(Self::Default),
            "From Preset" => Ok(Self::FromPreset {
                name: preset.to_string(),
            }),
            "From Project" => Ok(Self::FromProject {
                path: PathBuf::from(project_path),
            }),
            other => Err(CoreError::Validation(format!(
                "Unknown settings source '{other}'. Must be one of: Default, From Preset, From Project"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Settings document plus folder structure for a new project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSettings {
    pub settings: ProjectSettings,
    pub structure: FolderStructure,
}

/// Resolve settings for `source`, falling back to `Default` semantics when
/// the source yields no settings.
///
/// Resolving the same source against unchanged catalog data always produces
/// an equal result, which is what "Restore Settings" relies on.
pub fn resolve_settings<C>(catalog: &C, source: &SettingsSource) -> ResolvedSettings
where
    C: ProjectCatalog + ?Sized,
{
    if let Some(resolved) = try_resolve_settings(catalog, source) {
        return resolved;
    }

    tracing::warn!(
        source = source.label(),
        "Settings source yielded no settings, falling back to defaults"
    );
    resolve_default(catalog)
}

/// Resolve settings for `source` without falling back.
///
/// Returns `None` when a preset or project source yields no settings.
pub fn try_resolve_settings<C>(catalog: &C, source: &SettingsSource) -> Option<ResolvedSettings>
where
    C: ProjectCatalog + ?Sized,
{
    match source {
        SettingsSource::Default => Some(resolve_default(catalog)),
        SettingsSource::FromPreset { name } => resolve_from_preset(catalog, name),
        SettingsSource::FromProject { path } => resolve_from_project(catalog, path),
    }
}

fn resolve_default<C>(catalog: &C) -> ResolvedSettings
where
    C: ProjectCatalog + ?Sized,
{
    let settings = catalog.default_project_settings();
    let structure = match catalog.preset(DEFAULT_PRESET_NAME) {
        Ok(Some(preset)) => scan_structure(catalog, &preset.path, false),
        Ok(None) => {
            tracing::warn!(
                preset = DEFAULT_PRESET_NAME,
                "Default preset missing, using an empty folder structure"
            );
            FolderStructure::default()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load the default preset");
            FolderStructure::default()
        }
    };

    ResolvedSettings {
        settings,
        structure,
    }
}

fn resolve_from_preset<C>(catalog: &C, name: &str) -> Option<ResolvedSettings>
where
    C: ProjectCatalog + ?Sized,
{
    let preset = match catalog.preset(name) {
        Ok(Some(preset)) => preset,
        Ok(None) => {
            tracing::debug!(preset = name, "Preset not found");
            return None;
        }
        Err(e) => {
            tracing::warn!(preset = name, error = %e, "Failed to load preset");
            return None;
        }
    };

    let mut settings = catalog.default_project_settings();
    catalog.deep_merge_settings(&mut settings, &preset.settings);
    let structure = scan_structure(catalog, &preset.path, false);

    Some(ResolvedSettings {
        settings,
        structure,
    })
}

fn resolve_from_project<C>(catalog: &C, path: &Path) -> Option<ResolvedSettings>
where
    C: ProjectCatalog + ?Sized,
{
    if path.as_os_str().is_empty() {
        return None;
    }

    let config_path = catalog.project_config_path(path)?;
    let project_settings = match catalog.read_config(&config_path) {
        Ok(Some(settings)) => settings,
        Ok(None) => {
            tracing::debug!(path = %config_path.display(), "Project settings file holds no data");
            return None;
        }
        Err(e) => {
            tracing::warn!(path = %config_path.display(), error = %e, "Failed to read project settings");
            return None;
        }
    };

    let mut settings = catalog.default_project_settings();
    catalog.deep_merge_settings(&mut settings, &project_settings);
    let structure = scan_structure(catalog, path, true);

    Some(ResolvedSettings {
        settings,
        structure,
    })
}

fn scan_structure<C>(catalog: &C, path: &Path, simple: bool) -> FolderStructure
where
    C: ProjectCatalog + ?Sized,
{
    match catalog.folder_structure_from_path(path, simple) {
        Ok(structure) => structure,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Folder scan failed");
            FolderStructure::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Project creation helpers
// ---------------------------------------------------------------------------

/// Write the dialog's name and path into the settings before they are
/// opened in the settings editor.
pub fn prepare_for_customization(settings: &mut ProjectSettings, name: &str, path: &str) {
    settings.set_path(PROJECT_NAME_KEY, Value::String(name.to_string()));
    settings.set_path(PROJECT_PATH_KEY, Value::String(path.to_string()));
}

/// Final settings for project creation: the name is written, the path is
/// dropped because the project location is passed separately.
pub fn prepare_for_creation(settings: &mut ProjectSettings, name: &str) {
    settings.set_path(PROJECT_NAME_KEY, Value::String(name.to_string()));
    settings.remove_path(PROJECT_PATH_KEY);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
