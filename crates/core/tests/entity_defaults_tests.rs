//! Integration tests for entity defaults and picker candidates.
//!
//! Uses the in-memory entity catalog from `common`.

mod common;

use std::collections::BTreeMap;

use common::FakeEntityCatalog;
use prism_core::entity_defaults::{
    aov_candidates, department_candidates, identifier_candidates, task_candidates,
    version_candidates,
};
use prism_core::{compute_entity_defaults, Entity, EntityDefaults, EntityType, MediaType, SceneContext};

fn context(department: &str, task: &str) -> SceneContext {
    SceneContext {
        department: department.into(),
        task: task.into(),
    }
}

// ---------------------------------------------------------------------------
// Departments and tasks
// ---------------------------------------------------------------------------

#[test]
fn departments_keep_configured_order() {
    let catalog = FakeEntityCatalog::standard();
    assert_eq!(department_candidates(&catalog, EntityType::Asset), vec!["mod", "Surf", "rig"]);
    assert_eq!(department_candidates(&catalog, EntityType::Shot), vec!["lgt", "anm"]);
    assert!(department_candidates(&catalog, EntityType::Other).is_empty());
}

#[test]
fn default_department_is_first_alphabetically() {
    let catalog = FakeEntityCatalog::standard();
    let defaults = compute_entity_defaults(&catalog, &Entity::shot("sq010", "sh020"), &SceneContext::default());
    assert_eq!(defaults.department, "anm");
    assert_eq!(defaults.tasks, vec!["animation"]);
    assert_eq!(defaults.task, "animation");
}

#[test]
fn default_department_ignores_case() {
    let catalog = FakeEntityCatalog::standard();
    let defaults = compute_entity_defaults(&catalog, &Entity::asset("char/hero"), &SceneContext::default());
    // "mod" < "rig" < "Surf" case-insensitively.
    assert_eq!(defaults.department, "mod");
    assert_eq!(defaults.task, "modeling");
}

/// Without existing categories the first sorted template wins.
#[test]
fn templates_only_pick_first_sorted_task() {
    let catalog = FakeEntityCatalog::standard();
    let defaults = compute_entity_defaults(&catalog, &Entity::shot("sq010", "sh020"), &context("lgt", ""));
    assert_eq!(defaults.tasks, vec!["comp", "lighting"]);
    assert_eq!(defaults.task, "comp");
}

#[test]
fn existing_categories_merge_with_templates() {
    let mut catalog = FakeEntityCatalog::standard();
    catalog
        .categories
        .insert("lgt".into(), vec!["Keylight".into(), "lighting".into()]);
    let tasks = task_candidates(&catalog, &Entity::shot("sq010", "sh020"), "lgt");
    assert_eq!(tasks, vec!["comp", "Keylight", "lighting"]);
}

#[test]
fn scene_context_wins() {
    let catalog = FakeEntityCatalog::standard();
    let defaults = compute_entity_defaults(
        &catalog,
        &Entity::shot("sq010", "sh020"),
        &context("lgt", "relight"),
    );
    assert_eq!(defaults.department, "lgt");
    assert_eq!(defaults.task, "relight");
    assert_eq!(defaults.departments, vec!["lgt", "anm"]);
}

#[test]
fn unlinked_project_derives_nothing() {
    let mut catalog = FakeEntityCatalog::standard();
    catalog.linked = false;
    let defaults = compute_entity_defaults(&catalog, &Entity::shot("sq010", "sh020"), &context("lgt", "comp"));
    assert_eq!(defaults, EntityDefaults::default());
}

#[test]
fn unknown_entity_type_has_no_defaults() {
    let catalog = FakeEntityCatalog::standard();
    let entity: Entity = serde_json::from_value(serde_json::json!({"type": "sequence"})).unwrap();
    let defaults = compute_entity_defaults(&catalog, &entity, &SceneContext::default());
    assert!(defaults.departments.is_empty());
    assert!(defaults.department.is_empty());
    assert!(defaults.task.is_empty());
}

#[test]
fn category_lookup_failure_keeps_templates() {
    let mut catalog = FakeEntityCatalog::standard();
    catalog.fail_lookups = true;
    let tasks = task_candidates(&catalog, &Entity::shot("sq010", "sh020"), "lgt");
    assert_eq!(tasks, vec!["comp", "lighting"]);
}

// ---------------------------------------------------------------------------
// Identifiers, versions, aovs
// ---------------------------------------------------------------------------

#[test]
fn identifiers_are_unique_and_sorted() {
    let mut catalog = FakeEntityCatalog::standard();
    catalog.identifiers = BTreeMap::from([
        (MediaType::Renders3d, vec!["lighting".into(), "fx".into()]),
        (MediaType::Renders2d, vec!["comp".into(), "lighting".into()]),
    ]);
    let names = identifier_candidates(&catalog, &Entity::shot("sq010", "sh020"));
    assert_eq!(names, vec!["comp", "fx", "lighting"]);
}

#[test]
fn versions_sorted_numerically_most_recent_first() {
    let mut catalog = FakeEntityCatalog::standard();
    catalog.versions = vec!["v0003".into(), "v0010".into(), "vX".into(), "v0002".into()];
    let entity = Entity::shot("sq010", "sh020").with_identifier("lighting", MediaType::Renders3d);
    let names: Vec<String> = version_candidates(&catalog, &entity)
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["v0010", "v0003", "v0002"]);
}

#[test]
fn aovs_sorted_alphabetically() {
    let mut catalog = FakeEntityCatalog::standard();
    catalog.aovs = vec!["specular".into(), "beauty".into(), "diffuse".into()];
    let entity = Entity::shot("sq010", "sh020")
        .with_identifier("lighting", MediaType::Renders3d)
        .with_version("v0001");
    assert_eq!(aov_candidates(&catalog, &entity), vec!["beauty", "diffuse", "specular"]);
}

#[test]
fn metadata_failures_yield_empty_candidates() {
    let mut catalog = FakeEntityCatalog::standard();
    catalog.fail_lookups = true;
    let entity = Entity::asset("char/hero");
    assert!(identifier_candidates(&catalog, &entity).is_empty());
    assert!(version_candidates(&catalog, &entity).is_empty());
    assert!(aov_candidates(&catalog, &entity).is_empty());
}
