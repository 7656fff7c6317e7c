//! Prism project rules engine.
//!
//! Pure rules behind the project and entity creation dialogs:
//!
//! - [`naming`]: keeps the project path in step with the project name.
//! - [`settings`]: resolves the effective project settings and folder
//!   structure for a settings source, with deep merge over defaults.
//! - [`entity_defaults`]: department, task, identifier, version and aov
//!   candidates and the pre-filled values of a creation dialog.
//! - [`validation`]: per-field character allowlists.
//! - [`forms`]: form-state structs and the gate enabling their create action.
//!
//! The external data provider is injected through the [`ProjectCatalog`]
//! and [`EntityCatalog`] traits.

pub mod catalog;
pub mod entity;
pub mod entity_defaults;
pub mod error;
pub mod folder_structure;
pub mod forms;
pub mod ingest;
pub mod media;
pub mod naming;
pub mod preset;
pub mod settings;
pub mod validation;
pub mod version;

pub use catalog::{EntityCatalog, ProjectCatalog};
pub use entity::{Department, Entity, EntityType, IngestAction, MediaType};
pub use entity_defaults::{compute_entity_defaults, EntityDefaults, SceneContext};
pub use error::CoreError;
pub use folder_structure::FolderStructure;
pub use forms::{can_create, CreationForm, FormField, FormGate, GateState};
pub use ingest::MediaIngestRequest;
pub use naming::sync_path_to_name;
pub use preset::Preset;
pub use settings::{resolve_settings, ProjectSettings, ResolvedSettings, SettingsSource};
pub use validation::{validate_field, FieldKind};
