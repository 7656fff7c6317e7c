//! In-memory catalogs shared by the integration tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use prism_core::{
    CoreError, Department, Entity, EntityCatalog, EntityType, FolderStructure, MediaType, Preset,
    ProjectCatalog, ProjectSettings,
};
use serde_json::{json, Value};

pub fn settings(value: Value) -> ProjectSettings {
    ProjectSettings::from_value(value).expect("test settings must be an object")
}

// ---------------------------------------------------------------------------
// Project catalog
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeProjectCatalog {
    pub defaults: ProjectSettings,
    pub presets: Vec<Preset>,
    /// Folder trees keyed by scanned path.
    pub trees: HashMap<PathBuf, FolderStructure>,
    /// Project settings keyed by project path.
    pub projects: HashMap<PathBuf, Option<ProjectSettings>>,
    pub fail_presets: bool,
    pub fail_reads: bool,
}

impl FakeProjectCatalog {
    /// Defaults `{"globals": {"fps": 30, "resolution": "1920x1080"}}` and a
    /// `Default` preset with two top-level folders.
    pub fn standard() -> Self {
        let mut catalog = Self {
            defaults: settings(json!({
                "globals": {"fps": 30, "resolution": "1920x1080"}
            })),
            ..Self::default()
        };
        catalog.add_preset(
            "Default",
            json!({}),
            FolderStructure::root(vec![
                FolderStructure::with_children(
                    "01_Assets",
                    vec![FolderStructure::folder("Characters")],
                ),
                FolderStructure::folder("02_Shots"),
            ]),
        );
        catalog
    }

    pub fn add_preset(&mut self, name: &str, preset_settings: Value, tree: FolderStructure) {
        let path = PathBuf::from(format!("/presets/{name}"));
        self.trees.insert(path.clone(), tree);
        self.presets.push(Preset {
            name: name.to_string(),
            path,
            settings: settings(preset_settings),
        });
    }

    pub fn add_project(&mut self, path: &str, project_settings: Option<Value>, tree: FolderStructure) {
        let path = PathBuf::from(path);
        self.trees.insert(path.clone(), tree);
        self.projects
            .insert(path, project_settings.map(settings));
    }
}

impl ProjectCatalog for FakeProjectCatalog {
    fn default_project_settings(&self) -> ProjectSettings {
        self.defaults.clone()
    }

    fn presets(&self) -> Result<Vec<Preset>, CoreError> {
        if self.fail_presets {
            return Err(CoreError::Internal("presets unavailable".into()));
        }
        Ok(self.presets.clone())
    }

    fn folder_structure_from_path(
        &self,
        path: &Path,
        simple: bool,
    ) -> Result<FolderStructure, CoreError> {
        let tree = self.trees.get(path).cloned().unwrap_or_default();
        if !simple {
            return Ok(tree);
        }
        let top_level = tree
            .children
            .into_iter()
            .map(|child| FolderStructure::folder(child.name))
            .collect();
        Ok(FolderStructure::root(top_level))
    }

    fn project_config_path(&self, path: &Path) -> Option<PathBuf> {
        self.projects
            .contains_key(path)
            .then(|| path.join("00_Pipeline").join("pipeline.json"))
    }

    fn read_config(&self, path: &Path) -> Result<Option<ProjectSettings>, CoreError> {
        if self.fail_reads {
            return Err(CoreError::Internal("disk on fire".into()));
        }
        let project = path
            .parent()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(self.projects.get(&project).cloned().flatten())
    }
}

// ---------------------------------------------------------------------------
// Entity catalog
// ---------------------------------------------------------------------------

pub struct FakeEntityCatalog {
    pub linked: bool,
    pub asset_departments: Vec<Department>,
    pub shot_departments: Vec<Department>,
    /// Existing categories keyed by department.
    pub categories: HashMap<String, Vec<String>>,
    pub identifiers: BTreeMap<MediaType, Vec<String>>,
    pub versions: Vec<String>,
    pub aovs: Vec<String>,
    pub fail_lookups: bool,
}

impl FakeEntityCatalog {
    pub fn standard() -> Self {
        let dep = |abbr: &str, tasks: &[&str]| Department {
            abbreviation: abbr.to_string(),
            name: None,
            default_tasks: tasks.iter().map(|t| t.to_string()).collect(),
        };
        Self {
            linked: true,
            asset_departments: vec![dep("mod", &["modeling"]), dep("Surf", &["surfacing"]), dep("rig", &["rigging"])],
            shot_departments: vec![dep("lgt", &["lighting", "comp"]), dep("anm", &["animation"])],
            categories: HashMap::new(),
            identifiers: BTreeMap::new(),
            versions: Vec::new(),
            aovs: Vec::new(),
            fail_lookups: false,
        }
    }

    fn lookup<T: Clone>(&self, value: &T) -> Result<T, CoreError> {
        if self.fail_lookups {
            return Err(CoreError::Internal("metadata unavailable".into()));
        }
        Ok(value.clone())
    }
}

impl EntityCatalog for FakeEntityCatalog {
    fn linked_to_tasks(&self) -> bool {
        self.linked
    }

    fn asset_departments(&self) -> Vec<Department> {
        self.asset_departments.clone()
    }

    fn shot_departments(&self) -> Vec<Department> {
        self.shot_departments.clone()
    }

    fn categories(&self, _entity: &Entity, department: &str) -> Result<Vec<String>, CoreError> {
        self.lookup(&self.categories.get(department).cloned().unwrap_or_default())
    }

    fn default_tasks_for_department(&self, entity_type: EntityType, department: &str) -> Vec<String> {
        let departments = match entity_type {
            EntityType::Asset => &self.asset_departments,
            EntityType::Shot => &self.shot_departments,
            EntityType::Other => return Vec::new(),
        };
        departments
            .iter()
            .find(|d| d.abbreviation == department)
            .map(|d| d.default_tasks.clone())
            .unwrap_or_default()
    }

    fn identifiers_by_type(
        &self,
        _entity: &Entity,
    ) -> Result<BTreeMap<MediaType, Vec<String>>, CoreError> {
        self.lookup(&self.identifiers)
    }

    fn versions_from_identifier(&self, _entity: &Entity) -> Result<Vec<String>, CoreError> {
        self.lookup(&self.versions)
    }

    fn aovs_from_version(&self, _entity: &Entity) -> Result<Vec<String>, CoreError> {
        self.lookup(&self.aovs)
    }
}
