//! Filesystem and JSON implementation of the Prism catalogs.
//!
//! - [`FsProjectCatalog`]: default settings, presets and folder scans read
//!   from disk.
//! - [`JsonEntityCatalog`]: departments and entity media metadata from a
//!   JSON catalog document.
//! - [`StoreConfig`]: environment configuration for both.

pub mod config;
pub mod defaults;
pub mod entity_catalog;
pub mod error;
pub mod project_catalog;

pub use config::StoreConfig;
pub use entity_catalog::{CatalogDocument, EntityRecord, JsonEntityCatalog, TaskMedia};
pub use error::StoreError;
pub use project_catalog::FsProjectCatalog;
