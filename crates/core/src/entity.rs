//! Entities, departments and media type enums.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Entity type
// ---------------------------------------------------------------------------

/// Kind of entity work is organised under.
///
/// Unknown kinds deserialize to `Other` and have no departments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Asset,
    Shot,
    #[serde(other)]
    Other,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Shot => "shot",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Media type
// ---------------------------------------------------------------------------

/// Kind of media stored under an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MediaType {
    #[serde(rename = "3drenders")]
    Renders3d,
    #[serde(rename = "2drenders")]
    Renders2d,
    #[serde(rename = "playblasts")]
    Playblasts,
    #[serde(rename = "externalMedia")]
    ExternalMedia,
}

impl MediaType {
    /// All media types in picker order.
    pub const ALL: [MediaType; 4] = [
        Self::Renders3d,
        Self::Renders2d,
        Self::Playblasts,
        Self::ExternalMedia,
    ];

    /// Storage key of the media type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Renders3d => "3drenders",
            Self::Renders2d => "2drenders",
            Self::Playblasts => "playblasts",
            Self::ExternalMedia => "externalMedia",
        }
    }

    /// Short label shown in the type picker.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Renders3d => "3D",
            Self::Renders2d => "2D",
            Self::Playblasts => "Playblast",
            Self::ExternalMedia => "External",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == name || t.label() == name)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown media type '{name}'. Must be one of: 3drenders, 2drenders, playblasts, externalMedia"
                ))
            })
    }

    /// Only 3D renders are split into aovs.
    pub fn requires_aov(&self) -> bool {
        matches!(self, Self::Renders3d)
    }

    /// Only external media is copied, moved or linked on ingest.
    pub fn supports_action(&self) -> bool {
        matches!(self, Self::ExternalMedia)
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Ingest action
// ---------------------------------------------------------------------------

/// What happens to external source files on ingest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestAction {
    #[default]
    Copy,
    Move,
    Link,
}

impl IngestAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Move => "move",
            Self::Link => "link",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "copy" => Ok(Self::Copy),
            "move" => Ok(Self::Move),
            "link" => Ok(Self::Link),
            other => Err(CoreError::Validation(format!(
                "Unknown ingest action '{other}'. Must be one of: copy, move, link"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Department
// ---------------------------------------------------------------------------

/// A department as configured for assets or shots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub abbreviation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_tasks: Vec<String>,
}

impl Department {
    pub fn new(abbreviation: impl Into<String>) -> Self {
        Self {
            abbreviation: abbreviation.into(),
            name: None,
            default_tasks: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// An asset or shot, optionally scoped down to a department, task,
/// identifier and version for metadata queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, rename = "mediaType", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Entity {
    fn bare(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            asset_path: None,
            sequence: None,
            shot: None,
            department: None,
            task: None,
            identifier: None,
            media_type: None,
            version: None,
        }
    }

    pub fn asset(asset_path: impl Into<String>) -> Self {
        Self {
            asset_path: Some(asset_path.into()),
            ..Self::bare(EntityType::Asset)
        }
    }

    pub fn shot(sequence: impl Into<String>, shot: impl Into<String>) -> Self {
        Self {
            sequence: Some(sequence.into()),
            shot: Some(shot.into()),
            ..Self::bare(EntityType::Shot)
        }
    }

    /// Display name: the asset path for assets, `sequence-shot` for shots.
    pub fn display_name(&self) -> String {
        match self.entity_type {
            EntityType::Asset => self.asset_path.clone().unwrap_or_default(),
            _ => match (&self.sequence, &self.shot) {
                (Some(seq), Some(shot)) => format!("{seq}-{shot}"),
                (Some(seq), None) => seq.clone(),
                (None, Some(shot)) => shot.clone(),
                (None, None) => String::new(),
            },
        }
    }

    /// Copy scoped to a department and task.
    pub fn with_task(&self, department: &str, task: &str) -> Self {
        Self {
            department: Some(department.to_string()),
            task: Some(task.to_string()),
            ..self.clone()
        }
    }

    /// Copy scoped to an identifier of a media type.
    pub fn with_identifier(&self, identifier: &str, media_type: MediaType) -> Self {
        Self {
            identifier: Some(identifier.to_string()),
            media_type: Some(media_type),
            ..self.clone()
        }
    }

    /// Copy scoped to a formatted version name.
    pub fn with_version(&self, version: &str) -> Self {
        Self {
            version: Some(version.to_string()),
            ..self.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entity_deserializes_from_mapping() {
        let entity: Entity =
            serde_json::from_value(json!({"type": "asset", "asset_path": "char/hero"})).unwrap();
        assert_eq!(entity, Entity::asset("char/hero"));
    }

    #[test]
    fn unknown_entity_type_is_other() {
        let entity: Entity = serde_json::from_value(json!({"type": "sequence"})).unwrap();
        assert_eq!(entity.entity_type, EntityType::Other);
    }

    #[test]
    fn scoping_keeps_identity_fields() {
        let scoped = Entity::shot("sq010", "sh020")
            .with_task("lgt", "lighting")
            .with_identifier("beauty", MediaType::Renders3d)
            .with_version("v0003");
        assert_eq!(scoped.sequence.as_deref(), Some("sq010"));
        assert_eq!(scoped.department.as_deref(), Some("lgt"));
        assert_eq!(scoped.media_type, Some(MediaType::Renders3d));
        assert_eq!(scoped.version.as_deref(), Some("v0003"));

        let json = serde_json::to_value(&scoped).unwrap();
        assert_eq!(json["mediaType"], "3drenders");
        assert_eq!(json["type"], "shot");
    }

    #[test]
    fn display_names() {
        assert_eq!(Entity::asset("char/hero").display_name(), "char/hero");
        assert_eq!(Entity::shot("sq010", "sh020").display_name(), "sq010-sh020");
    }

    #[test]
    fn media_type_names_and_labels() {
        assert_eq!(MediaType::from_name("3drenders").unwrap(), MediaType::Renders3d);
        assert_eq!(MediaType::from_name("External").unwrap(), MediaType::ExternalMedia);
        assert!(MediaType::from_name("4d").is_err());
        assert_eq!(
            serde_json::to_string(&MediaType::ExternalMedia).unwrap(),
            "\"externalMedia\""
        );
    }

    #[test]
    fn media_type_capabilities() {
        assert!(MediaType::Renders3d.requires_aov());
        assert!(!MediaType::Renders2d.requires_aov());
        assert!(MediaType::ExternalMedia.supports_action());
        assert!(!MediaType::Playblasts.supports_action());
    }

    #[test]
    fn ingest_action_defaults_to_copy() {
        assert_eq!(IngestAction::default(), IngestAction::Copy);
        assert_eq!(IngestAction::from_name("link").unwrap(), IngestAction::Link);
        assert!(IngestAction::from_name("symlink").is_err());
    }
}
