//! `prism` -- command line shell over the Prism project rules.
//!
//! Loads the filesystem/JSON catalogs and prints the result of one rule
//! query as JSON on stdout. Logs go to stderr.
//!
//! # Environment variables
//!
//! | Variable                 | Default                   | Description                          |
//! |--------------------------|---------------------------|--------------------------------------|
//! | `PRISM_ROOT`             | `.`                       | Pipeline root                        |
//! | `PRISM_PRESETS_DIR`      | `<root>/Presets/Projects` | Project presets directory            |
//! | `PRISM_DEFAULT_SETTINGS` | --                        | JSON merged over built-in defaults   |
//! | `PRISM_CATALOG`          | --                        | Entity catalog JSON                  |
//! | `PRISM_LINKED_TO_TASKS`  | catalog value             | Link media to department/task        |
//! | `RUST_LOG`               | `prism=info,...`          | Log filter                           |

mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use prism_store::{FsProjectCatalog, JsonEntityCatalog, StoreConfig};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command};

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prism=info,prism_core=info,prism_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    tracing::debug!(
        root = %config.root.display(),
        presets_dir = %config.presets_dir.display(),
        "Loaded store configuration"
    );

    let mut status = ExitCode::SUCCESS;
    let output = match &cli.command {
        Command::Settings(args) => commands::settings(&project_catalog(&config)?, args)?,
        Command::SyncPath(args) => commands::sync_path(args),
        Command::BrowsePath(args) => commands::browse_path(args),
        Command::AssetNames(args) => commands::asset_names(args),
        Command::EntityDefaults(args) => commands::entity_defaults(&entity_catalog(&config)?, args)?,
        Command::Identifiers(args) => commands::identifiers(&entity_catalog(&config)?, args),
        Command::Versions(args) => commands::versions(&entity_catalog(&config)?, args),
        Command::Aovs(args) => commands::aovs(&entity_catalog(&config)?, args),
        Command::Validate(args) => {
            let (report, valid) = commands::validate(args);
            if !valid {
                status = ExitCode::FAILURE;
            }
            report
        }
        Command::Presets => commands::presets(&project_catalog(&config)?)?,
        Command::PresetName(args) => {
            let (report, valid) = commands::preset_name(&project_catalog(&config)?, args)?;
            if !valid {
                status = ExitCode::FAILURE;
            }
            report
        }
        Command::Ingest(args) => commands::ingest(&entity_catalog(&config)?, args)?,
    };

    print_json(&output)?;
    Ok(status)
}

/// Environment configuration with command line overrides applied.
fn load_config(cli: &Cli) -> anyhow::Result<StoreConfig> {
    let mut config = StoreConfig::from_env().context("Invalid store configuration")?;

    if let Some(root) = &cli.root {
        if cli.presets_dir.is_none() && std::env::var_os("PRISM_PRESETS_DIR").is_none() {
            config.presets_dir = root.join("Presets").join("Projects");
        }
        config.root = root.clone();
    }
    if let Some(dir) = &cli.presets_dir {
        config.presets_dir = dir.clone();
    }
    if let Some(catalog) = &cli.catalog {
        config.catalog = Some(catalog.clone());
    }
    if cli.unlinked {
        config.linked_to_tasks = Some(false);
    }
    Ok(config)
}

fn project_catalog(config: &StoreConfig) -> anyhow::Result<FsProjectCatalog> {
    FsProjectCatalog::new(config).context("Failed to load project catalog")
}

fn entity_catalog(config: &StoreConfig) -> anyhow::Result<JsonEntityCatalog> {
    JsonEntityCatalog::from_config(config).context("Failed to load entity catalog")
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{text}");
    Ok(())
}
