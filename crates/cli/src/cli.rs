use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use prism_core::{Entity, FieldKind, IngestAction, MediaType};

/// Query the Prism project rules from the command line. Results are
/// printed as JSON on stdout.
#[derive(Parser, Debug)]
#[command(name = "prism", version)]
pub struct Cli {
    /// Pipeline root. Overrides `PRISM_ROOT`.
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Project presets directory. Overrides `PRISM_PRESETS_DIR`.
    #[arg(long, global = true, value_name = "DIR")]
    pub presets_dir: Option<PathBuf>,

    /// Entity catalog JSON. Overrides `PRISM_CATALOG`.
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Treat the project as not linking media to tasks.
    #[arg(long, global = true, default_value_t = false)]
    pub unlinked: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve project settings and folder structure for a settings source.
    Settings(SettingsArgs),
    /// Derive the project path after the project name was edited.
    SyncPath(SyncPathArgs),
    /// Project path after a folder was picked in the browse dialog.
    BrowsePath(BrowsePathArgs),
    /// Split the asset field into asset names.
    AssetNames(AssetNamesArgs),
    /// Pre-filled department and task for an entity.
    EntityDefaults(EntityDefaultsArgs),
    /// Existing identifiers of an entity.
    Identifiers(ScopedEntityArgs),
    /// Existing versions of an identifier, most recent first.
    Versions(IdentifierArgs),
    /// Existing aovs of a version.
    Aovs(AovArgs),
    /// Validate text against a field allowlist.
    Validate(ValidateArgs),
    /// List project presets.
    Presets,
    /// Check a name for a new project preset.
    PresetName(PresetNameArgs),
    /// Build and validate a media ingest request.
    Ingest(IngestArgs),
}

// ---------------------------------------------------------------------------
// Value enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceArg {
    Default,
    Preset,
    Project,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FieldKindArg {
    ProjectName,
    ProjectPath,
    PresetName,
    AssetPath,
    FolderName,
    Department,
    Task,
    Product,
    Identifier,
    Aov,
}

impl From<FieldKindArg> for FieldKind {
    fn from(arg: FieldKindArg) -> Self {
        match arg {
            FieldKindArg::ProjectName => FieldKind::ProjectName,
            FieldKindArg::ProjectPath => FieldKind::ProjectPath,
            FieldKindArg::PresetName => FieldKind::PresetName,
            FieldKindArg::AssetPath => FieldKind::AssetPath,
            FieldKindArg::FolderName => FieldKind::FolderName,
            FieldKindArg::Department => FieldKind::Department,
            FieldKindArg::Task => FieldKind::Task,
            FieldKindArg::Product => FieldKind::Product,
            FieldKindArg::Identifier => FieldKind::Identifier,
            FieldKindArg::Aov => FieldKind::Aov,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MediaTypeArg {
    #[value(name = "3drenders")]
    Renders3d,
    #[value(name = "2drenders")]
    Renders2d,
    #[value(name = "playblasts")]
    Playblasts,
    #[value(name = "externalMedia")]
    ExternalMedia,
}

impl From<MediaTypeArg> for MediaType {
    fn from(arg: MediaTypeArg) -> Self {
        match arg {
            MediaTypeArg::Renders3d => MediaType::Renders3d,
            MediaTypeArg::Renders2d => MediaType::Renders2d,
            MediaTypeArg::Playblasts => MediaType::Playblasts,
            MediaTypeArg::ExternalMedia => MediaType::ExternalMedia,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ActionArg {
    Copy,
    Move,
    Link,
}

impl From<ActionArg> for IngestAction {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Copy => IngestAction::Copy,
            ActionArg::Move => IngestAction::Move,
            ActionArg::Link => IngestAction::Link,
        }
    }
}

// ---------------------------------------------------------------------------
// Subcommand arguments
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub struct SettingsArgs {
    #[arg(long, value_enum, default_value_t = SourceArg::Default)]
    pub source: SourceArg,

    /// Preset name for `--source preset`.
    #[arg(long, required_if_eq("source", "preset"))]
    pub preset: Option<String>,

    /// Project path for `--source project`.
    #[arg(long, required_if_eq("source", "project"))]
    pub project: Option<PathBuf>,

    /// Write the project name into the settings.
    #[arg(long)]
    pub name: Option<String>,

    /// Write the project path into the settings. Requires `--name`.
    #[arg(long, requires = "name")]
    pub path: Option<String>,
}

#[derive(Args, Debug)]
pub struct SyncPathArgs {
    /// Project name before the edit.
    #[arg(long, default_value = "")]
    pub prev: String,

    /// Project name after the edit.
    #[arg(long)]
    pub name: String,

    /// Current project path.
    #[arg(long)]
    pub path: String,
}

#[derive(Args, Debug)]
pub struct BrowsePathArgs {
    /// Folder picked in the dialog.
    #[arg(long)]
    pub selected: String,

    /// Project name to append.
    #[arg(long, default_value = "")]
    pub name: String,

    /// The folder is an existing project. A pipeline folder selection is
    /// lifted to the project root.
    #[arg(long, conflicts_with = "name")]
    pub existing: bool,
}

#[derive(Args, Debug)]
pub struct AssetNamesArgs {
    /// Comma separated asset names, e.g. `char/hero, prop/cup`.
    pub text: String,
}

#[derive(Args, Debug)]
pub struct PresetNameArgs {
    pub name: String,
}

#[derive(Args, Debug)]
pub struct EntityArgs {
    /// Asset path, e.g. `char/hero`.
    #[arg(long, conflicts_with_all = ["sequence", "shot"], required_unless_present = "sequence")]
    pub asset: Option<String>,

    #[arg(long, requires = "shot")]
    pub sequence: Option<String>,

    #[arg(long, requires = "sequence")]
    pub shot: Option<String>,
}

impl EntityArgs {
    pub fn entity(&self) -> Entity {
        match (&self.asset, &self.sequence, &self.shot) {
            (Some(asset), _, _) => Entity::asset(asset.as_str()),
            (None, sequence, shot) => Entity::shot(
                sequence.clone().unwrap_or_default(),
                shot.clone().unwrap_or_default(),
            ),
        }
    }
}

#[derive(Args, Debug)]
pub struct EntityDefaultsArgs {
    #[command(flatten)]
    pub entity: EntityArgs,

    /// Department of the open scene file.
    #[arg(long, default_value = "")]
    pub department: String,

    /// Task of the open scene file.
    #[arg(long, default_value = "")]
    pub task: String,
}

/// An entity narrowed to a department and task. The scope is ignored when
/// the project does not link media to tasks.
#[derive(Args, Debug)]
pub struct ScopedEntityArgs {
    #[command(flatten)]
    pub entity: EntityArgs,

    #[arg(long, requires = "task")]
    pub department: Option<String>,

    #[arg(long, requires = "department")]
    pub task: Option<String>,
}

impl ScopedEntityArgs {
    pub fn entity(&self, linked_to_tasks: bool) -> Entity {
        let entity = self.entity.entity();
        match (&self.department, &self.task) {
            (Some(department), Some(task)) if linked_to_tasks => entity.with_task(department, task),
            _ => entity,
        }
    }
}

#[derive(Args, Debug)]
pub struct IdentifierArgs {
    #[command(flatten)]
    pub scope: ScopedEntityArgs,

    #[arg(long)]
    pub identifier: String,

    #[arg(long, value_enum)]
    pub media_type: MediaTypeArg,
}

impl IdentifierArgs {
    pub fn scoped_entity(&self, linked_to_tasks: bool) -> Entity {
        self.scope
            .entity(linked_to_tasks)
            .with_identifier(&self.identifier, self.media_type.into())
    }
}

#[derive(Args, Debug)]
pub struct AovArgs {
    #[command(flatten)]
    pub identifier: IdentifierArgs,

    /// Formatted version name, e.g. `v0003`.
    #[arg(long)]
    pub version: String,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[arg(long, value_enum)]
    pub kind: FieldKindArg,

    pub text: String,
}

#[derive(Args, Debug)]
pub struct IngestArgs {
    #[command(flatten)]
    pub entity: EntityArgs,

    #[arg(long, value_enum)]
    pub media_type: MediaTypeArg,

    #[arg(long, default_value = "")]
    pub identifier: String,

    #[arg(long, default_value = "")]
    pub department: String,

    #[arg(long, default_value = "")]
    pub task: String,

    #[arg(long, default_value = "1")]
    pub version: String,

    #[arg(long, default_value = "")]
    pub aov: String,

    #[arg(long, value_enum, default_value_t = ActionArg::Copy)]
    pub action: ActionArg,

    /// Media files to ingest.
    #[arg(value_name = "FILE")]
    pub sources: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_settings_from_preset() {
        let cli = Cli::try_parse_from(["prism", "settings", "--source", "preset", "--preset", "Feature"]).unwrap();
        let Command::Settings(args) = cli.command else {
            panic!("expected settings command");
        };
        assert_eq!(args.source, SourceArg::Preset);
        assert_eq!(args.preset.as_deref(), Some("Feature"));
    }

    #[test]
    fn preset_source_requires_preset_name() {
        assert!(Cli::try_parse_from(["prism", "settings", "--source", "preset"]).is_err());
    }

    #[test]
    fn entity_args_build_shot() {
        let cli = Cli::try_parse_from([
            "prism", "entity-defaults", "--sequence", "sq010", "--shot", "sh020", "--department", "lgt",
        ])
        .unwrap();
        let Command::EntityDefaults(args) = cli.command else {
            panic!("expected entity-defaults command");
        };
        assert_eq!(args.entity.entity(), Entity::shot("sq010", "sh020"));
        assert_eq!(args.department, "lgt");
    }

    #[test]
    fn asset_conflicts_with_shot() {
        assert!(Cli::try_parse_from([
            "prism", "identifiers", "--asset", "char/hero", "--sequence", "sq010", "--shot", "sh020",
        ])
        .is_err());
    }

    #[test]
    fn media_type_uses_storage_names() {
        let cli = Cli::try_parse_from([
            "prism", "versions", "--asset", "char/hero", "--identifier", "turntable", "--media-type", "externalMedia",
        ])
        .unwrap();
        let Command::Versions(args) = cli.command else {
            panic!("expected versions command");
        };
        assert_eq!(args.scoped_entity(true).media_type, Some(MediaType::ExternalMedia));
    }

    #[test]
    fn task_scope_applies_only_when_linked() {
        let cli = Cli::try_parse_from([
            "prism", "aovs", "--sequence", "sq010", "--shot", "sh020", "--department", "fx", "--task",
            "Simulation", "--identifier", "smoke", "--media-type", "3drenders", "--version", "v0001",
        ])
        .unwrap();
        let Command::Aovs(args) = cli.command else {
            panic!("expected aovs command");
        };
        let linked = args.identifier.scoped_entity(true);
        assert_eq!(linked.department.as_deref(), Some("fx"));
        assert_eq!(linked.task.as_deref(), Some("Simulation"));

        let unlinked = args.identifier.scoped_entity(false);
        assert_eq!(unlinked.department, None);
        assert_eq!(unlinked.task, None);
    }

    #[test]
    fn department_requires_task() {
        assert!(Cli::try_parse_from([
            "prism", "identifiers", "--asset", "char/hero", "--department", "mod",
        ])
        .is_err());
    }

    #[test]
    fn browse_existing_conflicts_with_name() {
        assert!(Cli::try_parse_from([
            "prism", "browse-path", "--selected", "/projects", "--name", "Show", "--existing",
        ])
        .is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["prism", "presets", "--root", "/pipeline", "--unlinked"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/pipeline")));
        assert!(cli.unlinked);
    }
}
