//! Media ingest request handed to the Core.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::{Entity, IngestAction, MediaType};
use crate::error::CoreError;
use crate::validation::{is_valid_field, FieldKind};

/// A validated request to ingest media under an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct MediaIngestRequest {
    pub entity: Entity,
    #[validate(length(min = 1))]
    pub identifier: String,
    #[serde(rename = "mediaType")]
    pub media_type: MediaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[validate(range(min = 1, max = 99999))]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aov: Option<String>,
    #[validate(length(min = 1))]
    pub sources: Vec<String>,
    #[serde(default)]
    pub action: IngestAction,
}

impl MediaIngestRequest {
    /// Check the request shape and the rules that depend on the media type
    /// and on whether the project links media to tasks.
    pub fn check(&self, linked_to_tasks: bool) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;

        if !is_valid_field(FieldKind::Identifier, &self.identifier) {
            return Err(CoreError::Validation("Invalid identifier.".into()));
        }

        if linked_to_tasks {
            if !valid_option(FieldKind::Department, &self.department) {
                return Err(CoreError::Validation("Invalid department.".into()));
            }
            if !valid_option(FieldKind::Task, &self.task) {
                return Err(CoreError::Validation("Invalid task.".into()));
            }
        }

        match (self.media_type.requires_aov(), &self.aov) {
            (true, aov) if !valid_option(FieldKind::Aov, aov) => {
                Err(CoreError::Validation("Invalid aov.".into()))
            }
            (false, Some(_)) => Err(CoreError::Validation(format!(
                "An aov is only valid for {} media",
                MediaType::Renders3d
            ))),
            _ => Ok(()),
        }
    }

    /// The action the Core should apply to the sources. Only external media
    /// is copied, moved or linked.
    pub fn effective_action(&self) -> Option<IngestAction> {
        self.media_type.supports_action().then_some(self.action)
    }
}

fn valid_option(kind: FieldKind, value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| is_valid_field(kind, v))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
