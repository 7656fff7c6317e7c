//! JSON-backed [`EntityCatalog`].
//!
//! The catalog document lists departments and, per entity, the categories
//! in use and the media stored under it. Task-linked projects keep media
//! under `tasks`, one tree per department and task. Unlinked projects keep
//! it directly under `media`:
//!
//! ```json
//! {
//!   "linked_to_tasks": true,
//!   "entities": [{
//!     "type": "shot", "sequence": "sq010", "shot": "sh020",
//!     "categories": {"lgt": ["lighting"]},
//!     "tasks": [{
//!       "department": "lgt", "task": "lighting",
//!       "media": {"3drenders": {"lighting": {"v0001": ["beauty"]}}}
//!     }]
//!   }]
//! }
//! ```
//!
//! A lookup on an entity scoped to a department and task only sees the
//! media of that task. Department lists fall back to the built-in ones when
//! absent.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use prism_core::{CoreError, Department, Entity, EntityCatalog, EntityType, MediaType};
use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;
use crate::defaults::{builtin_asset_departments, builtin_shot_departments};
use crate::error::StoreError;

/// Versions of an identifier mapped to their aovs.
pub type VersionMap = BTreeMap<String, Vec<String>>;

/// Media type key to identifiers to versions.
pub type MediaTree = BTreeMap<String, BTreeMap<String, VersionMap>>;

/// Media stored under one department and task of an entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskMedia {
    pub department: String,
    pub task: String,
    #[serde(default)]
    pub media: MediaTree,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRecord {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    #[serde(default)]
    pub asset_path: Option<String>,
    #[serde(default)]
    pub sequence: Option<String>,
    #[serde(default)]
    pub shot: Option<String>,
    /// Department abbreviation to the categories in use.
    #[serde(default)]
    pub categories: BTreeMap<String, Vec<String>>,
    /// Media not linked to a task.
    #[serde(default)]
    pub media: MediaTree,
    /// Media linked to a department and task.
    #[serde(default)]
    pub tasks: Vec<TaskMedia>,
}

impl EntityRecord {
    fn matches(&self, entity: &Entity) -> bool {
        if self.entity_type != entity.entity_type {
            return false;
        }
        match entity.entity_type {
            EntityType::Asset => self.asset_path == entity.asset_path,
            _ => self.sequence == entity.sequence && self.shot == entity.shot,
        }
    }

    /// Media visible to `entity`. Scoping to a department and task narrows
    /// the lookup to that task; `None` when the task holds no media.
    fn media_for(&self, entity: &Entity) -> Option<&MediaTree> {
        match (&entity.department, &entity.task) {
            (Some(department), Some(task)) => self
                .tasks
                .iter()
                .find(|t| &t.department == department && &t.task == task)
                .map(|t| &t.media),
            _ => Some(&self.media),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default = "default_linked")]
    pub linked_to_tasks: bool,
    #[serde(default)]
    pub asset_departments: Option<Vec<Department>>,
    #[serde(default)]
    pub shot_departments: Option<Vec<Department>>,
    #[serde(default)]
    pub entities: Vec<EntityRecord>,
}

fn default_linked() -> bool {
    true
}

impl Default for CatalogDocument {
    fn default() -> Self {
        Self {
            linked_to_tasks: true,
            asset_departments: None,
            shot_departments: None,
            entities: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct JsonEntityCatalog {
    doc: CatalogDocument,
}

impl JsonEntityCatalog {
    pub fn new(doc: CatalogDocument) -> Self {
        Self { doc }
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let text = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        let doc = serde_json::from_str(&text).map_err(|e| StoreError::json(path, e))?;
        tracing::debug!(path = %path.display(), "Loaded entity catalog");
        Ok(Self::new(doc))
    }

    /// Load the configured catalog file, or built-in departments without
    /// entities when none is configured.
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut catalog = match &config.catalog {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(linked) = config.linked_to_tasks {
            catalog.doc.linked_to_tasks = linked;
        }
        Ok(catalog)
    }

    pub fn document(&self) -> &CatalogDocument {
        &self.doc
    }

    fn record(&self, entity: &Entity) -> Option<&EntityRecord> {
        let found = self.doc.entities.iter().find(|r| r.matches(entity));
        if found.is_none() {
            tracing::debug!(entity = %entity.display_name(), "Entity not in catalog");
        }
        found
    }

    fn media(&self, entity: &Entity) -> Option<&MediaTree> {
        self.record(entity).and_then(|r| r.media_for(entity))
    }

    fn identifier_versions(&self, entity: &Entity) -> Result<Option<&VersionMap>, CoreError> {
        let (Some(identifier), Some(media_type)) = (&entity.identifier, entity.media_type) else {
            return Err(CoreError::Validation(
                "The entity is not scoped to an identifier".into(),
            ));
        };
        Ok(self
            .media(entity)
            .and_then(|media| media.get(media_type.as_str()))
            .and_then(|ids| ids.get(identifier)))
    }
}

impl EntityCatalog for JsonEntityCatalog {
    fn linked_to_tasks(&self) -> bool {
        self.doc.linked_to_tasks
    }

    fn asset_departments(&self) -> Vec<Department> {
        self.doc
            .asset_departments
            .clone()
            .unwrap_or_else(builtin_asset_departments)
    }

    fn shot_departments(&self) -> Vec<Department> {
        self.doc
            .shot_departments
            .clone()
            .unwrap_or_else(builtin_shot_departments)
    }

    fn categories(&self, entity: &Entity, department: &str) -> Result<Vec<String>, CoreError> {
        Ok(self
            .record(entity)
            .and_then(|r| r.categories.get(department))
            .cloned()
            .unwrap_or_default())
    }

    fn default_tasks_for_department(&self, entity_type: EntityType, department: &str) -> Vec<String> {
        let departments = match entity_type {
            EntityType::Asset => self.asset_departments(),
            EntityType::Shot => self.shot_departments(),
            EntityType::Other => return Vec::new(),
        };
        departments
            .into_iter()
            .find(|d| d.abbreviation == department)
            .map(|d| d.default_tasks)
            .unwrap_or_default()
    }

    fn identifiers_by_type(
        &self,
        entity: &Entity,
    ) -> Result<BTreeMap<MediaType, Vec<String>>, CoreError> {
        let mut grouped = BTreeMap::new();
        let Some(media) = self.media(entity) else {
            return Ok(grouped);
        };
        for (key, identifiers) in media {
            match MediaType::from_name(key) {
                Ok(media_type) => {
                    grouped.insert(media_type, identifiers.keys().cloned().collect());
                }
                Err(_) => tracing::warn!(media_type = %key, "Skipping unknown media type in catalog"),
            }
        }
        Ok(grouped)
    }

    fn versions_from_identifier(&self, entity: &Entity) -> Result<Vec<String>, CoreError> {
        Ok(self
            .identifier_versions(entity)?
            .map(|versions| versions.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn aovs_from_version(&self, entity: &Entity) -> Result<Vec<String>, CoreError> {
        let Some(version) = &entity.version else {
            return Err(CoreError::Validation("The entity is not scoped to a version".into()));
        };
        Ok(self
            .identifier_versions(entity)?
            .and_then(|versions| versions.get(version))
            .cloned()
            .unwrap_or_default())
    }
}
