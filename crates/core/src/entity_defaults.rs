//! Department, task, identifier, version and aov candidates for an entity.
//!
//! [`compute_entity_defaults`] pre-fills department and task once per dialog.
//! Identifier, version and aov candidates depend on picks made afterwards,
//! so they are queried on demand against an entity scoped with
//! [`Entity::with_task`], [`Entity::with_identifier`] and
//! [`Entity::with_version`].
//!
//! Ordering rules:
//!
//! - departments keep the configured order; the default pick is the first
//!   one alphabetically (case-insensitive)
//! - tasks are existing categories followed by department task templates,
//!   de-duplicated on first occurrence, then sorted case-insensitively
//! - identifiers are unique names sorted alphabetically
//! - versions are sorted by numeric value, most recent first
//! - aovs are sorted alphabetically

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::catalog::EntityCatalog;
use crate::entity::{Entity, EntityType, MediaType};
use crate::version::{sort_versions_desc, VersionCandidate};

/// Department and task of the scene file currently open, either possibly
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneContext {
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub task: String,
}

/// Pre-filled department and task for a creation dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntityDefaults {
    /// Department picker entries.
    pub departments: Vec<String>,
    /// Task picker entries for the selected department.
    pub tasks: Vec<String>,
    /// Pre-filled department, empty when none could be derived.
    pub department: String,
    /// Pre-filled task, empty when none could be derived.
    pub task: String,
}

// ---------------------------------------------------------------------------
// Departments and tasks
// ---------------------------------------------------------------------------

/// Department abbreviations for an entity type, in configured order.
pub fn department_candidates<C>(catalog: &C, entity_type: EntityType) -> Vec<String>
where
    C: EntityCatalog + ?Sized,
{
    let departments = match entity_type {
        EntityType::Asset => catalog.asset_departments(),
        EntityType::Shot => catalog.shot_departments(),
        EntityType::Other => Vec::new(),
    };
    departments.into_iter().map(|d| d.abbreviation).collect()
}

/// Task picker entries for `department` on `entity`.
pub fn task_candidates<C>(catalog: &C, entity: &Entity, department: &str) -> Vec<String>
where
    C: EntityCatalog + ?Sized,
{
    let existing = match catalog.categories(entity, department) {
        Ok(categories) => categories,
        Err(e) => {
            tracing::warn!(department, error = %e, "Failed to list categories");
            Vec::new()
        }
    };
    let templates = catalog.default_tasks_for_department(entity.entity_type, department);

    let mut tasks = merge_unique(existing, templates);
    sort_case_insensitive(&mut tasks);
    tasks
}

/// Derive the pre-filled department and task for a creation dialog.
///
/// Values from the scene context win. When the project does not link media
/// to tasks nothing is derived.
pub fn compute_entity_defaults<C>(catalog: &C, entity: &Entity, context: &SceneContext) -> EntityDefaults
where
    C: EntityCatalog + ?Sized,
{
    if !catalog.linked_to_tasks() {
        return EntityDefaults::default();
    }

    let departments = department_candidates(catalog, entity.entity_type);

    let department = if context.department.is_empty() {
        first_case_insensitive(&departments).unwrap_or_default()
    } else {
        context.department.clone()
    };

    let tasks = if department.is_empty() {
        Vec::new()
    } else {
        task_candidates(catalog, entity, &department)
    };

    let task = if context.task.is_empty() {
        tasks.first().cloned().unwrap_or_default()
    } else {
        context.task.clone()
    };

    tracing::debug!(
        entity = %entity.display_name(),
        department = %department,
        task = %task,
        "Derived entity defaults"
    );

    EntityDefaults {
        departments,
        tasks,
        department,
        task,
    }
}

// ---------------------------------------------------------------------------
// Identifiers, versions, aovs
// ---------------------------------------------------------------------------

/// Existing identifiers grouped by media type.
pub fn identifiers_by_type<C>(catalog: &C, entity: &Entity) -> BTreeMap<MediaType, Vec<String>>
where
    C: EntityCatalog + ?Sized,
{
    catalog.identifiers_by_type(entity).unwrap_or_else(|e| {
        tracing::warn!(entity = %entity.display_name(), error = %e, "Failed to list identifiers");
        BTreeMap::new()
    })
}

/// Unique identifier names across all media types, sorted.
pub fn identifier_candidates<C>(catalog: &C, entity: &Entity) -> Vec<String>
where
    C: EntityCatalog + ?Sized,
{
    identifiers_by_type(catalog, entity)
        .into_values()
        .flatten()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Existing versions of the scoped identifier, most recent first.
pub fn version_candidates<C>(catalog: &C, entity: &Entity) -> Vec<VersionCandidate>
where
    C: EntityCatalog + ?Sized,
{
    let names = catalog.versions_from_identifier(entity).unwrap_or_else(|e| {
        tracing::warn!(entity = %entity.display_name(), error = %e, "Failed to list versions");
        Vec::new()
    });
    sort_versions_desc(names, |name| catalog.parse_int_version(name))
}

/// Existing aovs of the scoped version, sorted.
pub fn aov_candidates<C>(catalog: &C, entity: &Entity) -> Vec<String>
where
    C: EntityCatalog + ?Sized,
{
    let mut aovs = catalog.aovs_from_version(entity).unwrap_or_else(|e| {
        tracing::warn!(entity = %entity.display_name(), error = %e, "Failed to list aovs");
        Vec::new()
    });
    aovs.sort();
    aovs.dedup();
    aovs
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Concatenate `first` and `second`, dropping repeats after their first
/// occurrence.
fn merge_unique(first: Vec<String>, second: Vec<String>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(first.len() + second.len());
    for item in first.into_iter().chain(second) {
        if !merged.contains(&item) {
            merged.push(item);
        }
    }
    merged
}

fn sort_case_insensitive(items: &mut [String]) {
    items.sort_by_cached_key(|s| s.to_lowercase());
}

fn first_case_insensitive(items: &[String]) -> Option<String> {
    items.iter().min_by_key(|s| s.to_lowercase()).cloned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_unique_keeps_first_occurrence() {
        let merged = merge_unique(
            vec!["comp".into(), "lighting".into(), "comp".into()],
            vec!["lighting".into(), "fx".into()],
        );
        assert_eq!(merged, vec!["comp", "lighting", "fx"]);
    }

    #[test]
    fn case_insensitive_sort_is_stable() {
        let mut items: Vec<String> = vec!["b".into(), "A".into(), "a".into(), "C".into()];
        sort_case_insensitive(&mut items);
        assert_eq!(items, vec!["A", "a", "b", "C"]);
    }

    #[test]
    fn first_case_insensitive_picks_alphabetical_minimum() {
        let items: Vec<String> = vec!["lgt".into(), "Anm".into(), "cmp".into()];
        assert_eq!(first_case_insensitive(&items).as_deref(), Some("Anm"));
        assert_eq!(first_case_insensitive(&[]), None);
    }
}
