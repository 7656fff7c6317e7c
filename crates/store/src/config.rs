use std::path::PathBuf;

use crate::error::StoreError;

/// Store configuration loaded from environment variables.
///
/// All fields have defaults suitable for a local checkout. Command line
/// flags override individual fields after loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Pipeline root (default: `.`).
    pub root: PathBuf,
    /// Directory holding one folder per project preset
    /// (default: `<root>/Presets/Projects`).
    pub presets_dir: PathBuf,
    /// JSON file merged over the built-in default settings.
    pub default_settings: Option<PathBuf>,
    /// JSON entity catalog. Built-in departments are used without one.
    pub catalog: Option<PathBuf>,
    /// Overrides `linked_to_tasks` of the catalog when set.
    pub linked_to_tasks: Option<bool>,
}

impl StoreConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                   |
    /// |--------------------------|---------------------------|
    /// | `PRISM_ROOT`             | `.`                       |
    /// | `PRISM_PRESETS_DIR`      | `<root>/Presets/Projects` |
    /// | `PRISM_DEFAULT_SETTINGS` | unset                     |
    /// | `PRISM_CATALOG`          | unset                     |
    /// | `PRISM_LINKED_TO_TASKS`  | unset (catalog value)     |
    pub fn from_env() -> Result<Self, StoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let root = match lookup("PRISM_ROOT") {
            Some(value) if value.trim().is_empty() => {
                return Err(StoreError::Config("PRISM_ROOT must not be empty".into()));
            }
            Some(value) => PathBuf::from(value),
            None => PathBuf::from("."),
        };

        let presets_dir = non_empty(lookup("PRISM_PRESETS_DIR"))
            .map(PathBuf::from)
            .unwrap_or_else(|| root.join("Presets").join("Projects"));

        let default_settings = non_empty(lookup("PRISM_DEFAULT_SETTINGS")).map(PathBuf::from);
        let catalog = non_empty(lookup("PRISM_CATALOG")).map(PathBuf::from);

        let linked_to_tasks = match non_empty(lookup("PRISM_LINKED_TO_TASKS")) {
            Some(value) => Some(parse_bool(&value).ok_or_else(|| {
                StoreError::Config(format!(
                    "PRISM_LINKED_TO_TASKS must be a boolean, got '{value}'"
                ))
            })?),
            None => None,
        };

        Ok(Self {
            root,
            presets_dir,
            default_settings,
            catalog,
            linked_to_tasks,
        })
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            presets_dir: PathBuf::from(".").join("Presets").join("Projects"),
            default_settings: None,
            catalog: None,
            linked_to_tasks: None,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<StoreConfig, StoreError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StoreConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_env() {
        assert_eq!(load(&[]).unwrap(), StoreConfig::default());
    }

    #[test]
    fn presets_dir_follows_root() {
        let config = load(&[("PRISM_ROOT", "/pipeline")]).unwrap();
        assert_eq!(config.presets_dir, PathBuf::from("/pipeline/Presets/Projects"));
    }

    #[test]
    fn explicit_presets_dir_wins() {
        let config = load(&[("PRISM_ROOT", "/pipeline"), ("PRISM_PRESETS_DIR", "/shared/presets")]).unwrap();
        assert_eq!(config.presets_dir, PathBuf::from("/shared/presets"));
    }

    #[test]
    fn linked_to_tasks_parses_booleans() {
        assert_eq!(load(&[("PRISM_LINKED_TO_TASKS", "false")]).unwrap().linked_to_tasks, Some(false));
        assert_eq!(load(&[("PRISM_LINKED_TO_TASKS", "1")]).unwrap().linked_to_tasks, Some(true));
    }

    #[test]
    fn malformed_values_are_config_errors() {
        assert_matches!(load(&[("PRISM_LINKED_TO_TASKS", "maybe")]), Err(StoreError::Config(_)));
        assert_matches!(load(&[("PRISM_ROOT", "  ")]), Err(StoreError::Config(_)));
    }
}
