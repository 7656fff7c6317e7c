//! Capability traits for the external pipeline Core.
//!
//! The rules engine never reaches into a shared service object. Each
//! resolver receives the capability set it needs as an explicit argument:
//! [`ProjectCatalog`] for settings, presets and folder scans, and
//! [`EntityCatalog`] for department and media metadata.
//!
//! Implementations may block on I/O; every call happens synchronously on the
//! caller's thread. A failed lookup is reported as `Err` and the resolvers
//! degrade it to "no data".

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::entity::{Department, Entity, EntityType, MediaType};
use crate::error::CoreError;
use crate::folder_structure::FolderStructure;
use crate::preset::Preset;
use crate::settings::{self, ProjectSettings};
use crate::version;

/// Settings storage, presets and folder scans.
pub trait ProjectCatalog {
    /// The system default settings document. Always a fresh copy.
    fn default_project_settings(&self) -> ProjectSettings;

    /// All known presets in presentation order.
    fn presets(&self) -> Result<Vec<Preset>, CoreError>;

    /// Look up a single preset by its unique name.
    fn preset(&self, name: &str) -> Result<Option<Preset>, CoreError> {
        Ok(self.presets()?.into_iter().find(|p| p.name == name))
    }

    /// Scan a directory into a folder tree.
    ///
    /// `simple` restricts the scan to the top-level folders.
    fn folder_structure_from_path(
        &self,
        path: &Path,
        simple: bool,
    ) -> Result<FolderStructure, CoreError>;

    /// Location of the persisted settings file of the project at `path`,
    /// or `None` when `path` is not a project with a settings file.
    fn project_config_path(&self, path: &Path) -> Option<PathBuf>;

    /// Read a settings document. `Ok(None)` means the file holds no data.
    fn read_config(&self, path: &Path) -> Result<Option<ProjectSettings>, CoreError>;

    /// Recursive key-wise merge of `overlay` into `base`.
    fn deep_merge_settings(&self, base: &mut ProjectSettings, overlay: &ProjectSettings) {
        settings::merge_settings(base, overlay);
    }
}

/// Department, task and media metadata of entities.
pub trait EntityCatalog {
    /// Whether media products are organised under department/task.
    fn linked_to_tasks(&self) -> bool {
        true
    }

    fn asset_departments(&self) -> Vec<Department>;

    fn shot_departments(&self) -> Vec<Department>;

    /// Categories (tasks) already used on `entity` under `department`.
    fn categories(&self, entity: &Entity, department: &str) -> Result<Vec<String>, CoreError>;

    /// Task templates configured for a department of an entity type.
    fn default_tasks_for_department(&self, entity_type: EntityType, department: &str)
        -> Vec<String>;

    /// Existing identifiers of the scoped entity, grouped by media type.
    fn identifiers_by_type(
        &self,
        entity: &Entity,
    ) -> Result<BTreeMap<MediaType, Vec<String>>, CoreError>;

    /// Formatted version names (e.g. `v0003`) under the scoped identifier.
    fn versions_from_identifier(&self, entity: &Entity) -> Result<Vec<String>, CoreError>;

    /// Canonical version-name parser.
    fn parse_int_version(&self, name: &str) -> Option<u32> {
        version::parse_int_version(name)
    }

    /// Existing aov names under the scoped version.
    fn aovs_from_version(&self, entity: &Entity) -> Result<Vec<String>, CoreError>;
}
