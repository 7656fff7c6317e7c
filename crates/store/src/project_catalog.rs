//! Filesystem-backed [`ProjectCatalog`].
//!
//! Presets are directories under the presets root, each with its settings
//! in `00_Pipeline/pipeline.json`. Project settings live at the same place
//! inside the project.

use std::fs;
use std::path::{Component, Path, PathBuf};

use prism_core::naming::PIPELINE_FOLDER;
use prism_core::settings::{merge_settings, DEFAULT_PRESET_NAME};
use prism_core::{CoreError, FolderStructure, Preset, ProjectCatalog, ProjectSettings};
use serde_json::Value;

use crate::config::StoreConfig;
use crate::defaults::builtin_project_settings;
use crate::error::StoreError;

/// File name of a settings document inside the pipeline folder.
pub const SETTINGS_FILE: &str = "pipeline.json";

/// Settings file of the project or preset rooted at `dir`.
pub fn settings_file(dir: &Path) -> PathBuf {
    dir.join(PIPELINE_FOLDER).join(SETTINGS_FILE)
}

#[derive(Debug, Clone)]
pub struct FsProjectCatalog {
    presets_dir: PathBuf,
    defaults: ProjectSettings,
}

impl FsProjectCatalog {
    /// Build the catalog, merging the configured default settings file over
    /// the built-in defaults.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut defaults = builtin_project_settings();
        if let Some(path) = &config.default_settings {
            let overlay = read_settings_file(path)?.ok_or_else(|| {
                StoreError::Config(format!(
                    "PRISM_DEFAULT_SETTINGS points to {} which holds no settings",
                    path.display()
                ))
            })?;
            merge_settings(&mut defaults, &overlay);
        }

        Ok(Self {
            presets_dir: config.presets_dir.clone(),
            defaults,
        })
    }

    pub fn presets_dir(&self) -> &Path {
        &self.presets_dir
    }

    fn load_presets(&self) -> Result<Vec<Preset>, StoreError> {
        if !self.presets_dir.is_dir() {
            tracing::debug!(dir = %self.presets_dir.display(), "Presets directory does not exist");
            return Ok(Vec::new());
        }

        let mut presets = Vec::new();
        for (name, path) in sorted_subdirs(&self.presets_dir)? {
            match load_preset(name, path) {
                Ok(preset) => presets.push(preset),
                Err(e) => tracing::warn!(error = %e, "Skipping unreadable preset"),
            }
        }

        presets.sort_by(|a, b| {
            (a.name != DEFAULT_PRESET_NAME, &a.name).cmp(&(b.name != DEFAULT_PRESET_NAME, &b.name))
        });
        Ok(presets)
    }

    /// Load the single preset directory named `name`. Names that are not a
    /// plain folder name never match.
    fn load_named_preset(&self, name: &str) -> Result<Option<Preset>, StoreError> {
        let mut components = Path::new(name).components();
        let (Some(Component::Normal(_)), None) = (components.next(), components.next()) else {
            return Ok(None);
        };

        let path = self.presets_dir.join(name);
        if !path.is_dir() {
            return Ok(None);
        }
        load_preset(name.to_string(), path).map(Some)
    }
}

fn load_preset(name: String, path: PathBuf) -> Result<Preset, StoreError> {
    let settings = read_settings_file(&settings_file(&path))?.unwrap_or_default();
    Ok(Preset {
        name,
        path,
        settings,
    })
}

impl ProjectCatalog for FsProjectCatalog {
    fn default_project_settings(&self) -> ProjectSettings {
        self.defaults.clone()
    }

    fn presets(&self) -> Result<Vec<Preset>, CoreError> {
        Ok(self.load_presets()?)
    }

    fn preset(&self, name: &str) -> Result<Option<Preset>, CoreError> {
        Ok(self.load_named_preset(name)?)
    }

    fn folder_structure_from_path(
        &self,
        path: &Path,
        simple: bool,
    ) -> Result<FolderStructure, CoreError> {
        Ok(scan_folder_structure(path, simple)?)
    }

    fn project_config_path(&self, path: &Path) -> Option<PathBuf> {
        let file = settings_file(path);
        file.is_file().then_some(file)
    }

    fn read_config(&self, path: &Path) -> Result<Option<ProjectSettings>, CoreError> {
        Ok(read_settings_file(path)?)
    }
}

/// Read a settings document. A missing file or an empty object holds no
/// settings.
pub fn read_settings_file(path: &Path) -> Result<Option<ProjectSettings>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }

    let text = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let value: Value = serde_json::from_str(&text).map_err(|e| StoreError::json(path, e))?;
    match ProjectSettings::from_value(value) {
        Some(settings) if settings.is_empty() => Ok(None),
        Some(settings) => Ok(Some(settings)),
        None => Err(StoreError::Config(format!(
            "{} does not hold a settings object",
            path.display()
        ))),
    }
}

/// Scan the directories below `path` into a tree. `simple` lists only the
/// top-level folders. Files are ignored and siblings are sorted by name.
pub fn scan_folder_structure(path: &Path, simple: bool) -> Result<FolderStructure, StoreError> {
    if !path.is_dir() {
        return Err(StoreError::InvalidPath(format!(
            "{} is not a directory",
            path.display()
        )));
    }
    Ok(FolderStructure::root(scan_children(path, !simple)?))
}

fn scan_children(dir: &Path, recurse: bool) -> Result<Vec<FolderStructure>, StoreError> {
    let mut children = Vec::new();
    for (name, path) in sorted_subdirs(dir)? {
        let grandchildren = if recurse {
            scan_children(&path, true)?
        } else {
            Vec::new()
        };
        children.push(FolderStructure::with_children(name, grandchildren));
    }
    Ok(children)
}

/// Subdirectories of `dir` with UTF-8 names, sorted by name.
fn sorted_subdirs(dir: &Path) -> Result<Vec<(String, PathBuf)>, StoreError> {
    let entries = fs::read_dir(dir).map_err(|e| StoreError::io(dir, e))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| StoreError::io(dir, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => dirs.push((name, path)),
            Err(raw) => {
                tracing::warn!(name = ?raw, dir = %dir.display(), "Skipping folder with a non UTF-8 name");
            }
        }
    }
    dirs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(dirs)
}
