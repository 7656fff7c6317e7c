//! Subcommand handlers. Each returns the JSON document to print.

use anyhow::{bail, Context};
use prism_core::entity_defaults::{
    aov_candidates, identifier_candidates, identifiers_by_type, version_candidates,
};
use prism_core::forms::{FormField, FormGate, IngestMediaForm};
use prism_core::media::MediaSelection;
use prism_core::naming::{
    join_browsed_path, normalize_existing_project_path, split_asset_names, ProjectNameSync,
};
use prism_core::preset::validate_new_preset_name;
use prism_core::settings::{prepare_for_customization, PROJECT_NAME_KEY};
use prism_core::validation::{rejected_chars, sanitize_field};
use prism_core::{
    compute_entity_defaults, resolve_settings, validate_field, EntityCatalog, FieldKind,
    IngestAction, ProjectCatalog, SceneContext, SettingsSource,
};
use serde_json::{json, Value};

use crate::cli::{
    AovArgs, AssetNamesArgs, BrowsePathArgs, EntityDefaultsArgs, IdentifierArgs, IngestArgs,
    PresetNameArgs, ScopedEntityArgs, SettingsArgs, SourceArg, SyncPathArgs, ValidateArgs,
};

pub fn settings(catalog: &dyn ProjectCatalog, args: &SettingsArgs) -> anyhow::Result<Value> {
    let source = match args.source {
        SourceArg::Default => SettingsSource::Default,
        SourceArg::Preset => SettingsSource::FromPreset {
            name: args.preset.clone().context("--preset is required for a preset source")?,
        },
        SourceArg::Project => SettingsSource::FromProject {
            path: args.project.clone().context("--project is required for a project source")?,
        },
    };

    let mut resolved = resolve_settings(catalog, &source);
    match (&args.name, &args.path) {
        (Some(name), Some(path)) => prepare_for_customization(&mut resolved.settings, name, path),
        (Some(name), None) => resolved
            .settings
            .set_path(PROJECT_NAME_KEY, Value::String(name.clone())),
        _ => {}
    }

    let folders = resolved.structure.relative_paths();
    Ok(json!({
        "source": source,
        "settings": resolved.settings,
        "structure": resolved.structure,
        "folders": folders,
    }))
}

/// Replays one edit of the name field. The name is sanitised before the
/// path follows it.
pub fn sync_path(args: &SyncPathArgs) -> Value {
    let edit = ProjectNameSync::new(&args.prev).name_edited(&args.name, &args.path);
    json!({ "name": edit.name, "path": edit.path })
}

pub fn browse_path(args: &BrowsePathArgs) -> Value {
    let path = if args.existing {
        normalize_existing_project_path(&args.selected)
    } else {
        join_browsed_path(&args.selected, &args.name)
    };
    json!({ "path": path })
}

pub fn asset_names(args: &AssetNamesArgs) -> Value {
    json!({ "assets": split_asset_names(&args.text) })
}

pub fn entity_defaults(catalog: &dyn EntityCatalog, args: &EntityDefaultsArgs) -> anyhow::Result<Value> {
    let entity = args.entity.entity();
    let context = SceneContext {
        department: args.department.clone(),
        task: args.task.clone(),
    };
    let defaults = compute_entity_defaults(catalog, &entity, &context);
    Ok(serde_json::to_value(defaults)?)
}

pub fn identifiers(catalog: &dyn EntityCatalog, args: &ScopedEntityArgs) -> Value {
    let entity = args.entity(catalog.linked_to_tasks());
    json!({
        "by_type": identifiers_by_type(catalog, &entity),
        "names": identifier_candidates(catalog, &entity),
    })
}

pub fn versions(catalog: &dyn EntityCatalog, args: &IdentifierArgs) -> Value {
    let entity = args.scoped_entity(catalog.linked_to_tasks());
    json!({ "versions": version_candidates(catalog, &entity) })
}

pub fn aovs(catalog: &dyn EntityCatalog, args: &AovArgs) -> Value {
    let entity = args
        .identifier
        .scoped_entity(catalog.linked_to_tasks())
        .with_version(&args.version);
    json!({ "aovs": aov_candidates(catalog, &entity) })
}

/// Returns the report and whether the text is valid.
pub fn validate(args: &ValidateArgs) -> (Value, bool) {
    let kind = FieldKind::from(args.kind);
    let result = validate_field(kind, &args.text);
    let rejected: Vec<String> = rejected_chars(kind, &args.text)
        .into_iter()
        .map(String::from)
        .collect();
    let report = json!({
        "kind": kind,
        "valid": result.is_ok(),
        "sanitized": sanitize_field(kind, &args.text),
        "rejected": rejected,
        "error": result.as_ref().err().map(|e| e.message()),
    });
    (report, result.is_ok())
}

pub fn presets(catalog: &dyn ProjectCatalog) -> anyhow::Result<Value> {
    let presets = catalog.presets().context("Failed to list presets")?;
    Ok(json!({ "presets": presets }))
}

/// Returns the report and whether the name is free and valid.
pub fn preset_name(catalog: &dyn ProjectCatalog, args: &PresetNameArgs) -> anyhow::Result<(Value, bool)> {
    let presets = catalog.presets().context("Failed to list presets")?;
    let result = validate_new_preset_name(&args.name, &presets);
    let report = json!({
        "name": args.name,
        "valid": result.is_ok(),
        "error": result.as_ref().err().map(|e| e.message()),
    });
    Ok((report, result.is_ok()))
}

/// Replays the ingest dialog: every field goes through the form gate the
/// way keystrokes would, then the dialog is accepted.
pub fn ingest(catalog: &dyn EntityCatalog, args: &IngestArgs) -> anyhow::Result<Value> {
    let form = IngestMediaForm::new(
        args.entity.entity(),
        catalog.linked_to_tasks(),
        args.media_type.into(),
    );
    let mut gate = FormGate::new(form);

    gate.edit(FormField::Department, &args.department);
    gate.edit(FormField::Task, &args.task);
    gate.edit(FormField::Identifier, &args.identifier);
    gate.edit(FormField::Version, &args.version);
    gate.edit(FormField::Aov, &args.aov);
    let action: IngestAction = args.action.into();
    let sources = args.sources.clone();
    gate.update(|form| {
        form.action = action;
        form.media = MediaSelection::from_drop(sources);
    });

    if let Err(e) = gate.accept() {
        bail!("{}", e.message());
    }
    let request = gate
        .into_output()
        .context("Ingest dialog closed without a request")?;
    let effective_action = request.effective_action();
    Ok(json!({
        "request": request,
        "effective_action": effective_action,
    }))
}
