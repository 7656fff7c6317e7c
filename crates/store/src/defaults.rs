//! Built-in default settings and departments.

use prism_core::{Department, ProjectSettings};
use serde_json::json;

/// Settings every new project starts from.
pub fn builtin_project_settings() -> ProjectSettings {
    let value = json!({
        "globals": {
            "project_name": "",
            "project_path": "",
            "fps": 24,
            "resolution": [1920, 1080],
            "useLocalFiles": false,
            "track_dependencies": "publish"
        },
        "folder_structure": {
            "assets": "01_Assets",
            "shots": "02_Shots",
            "pipeline": "00_Pipeline"
        },
        "defaultPasses": {}
    });
    ProjectSettings::from_value(value).unwrap_or_default()
}

fn department(abbreviation: &str, name: &str, tasks: &[&str]) -> Department {
    Department {
        abbreviation: abbreviation.to_string(),
        name: Some(name.to_string()),
        default_tasks: tasks.iter().map(|t| t.to_string()).collect(),
    }
}

pub fn builtin_asset_departments() -> Vec<Department> {
    vec![
        department("mod", "Modeling", &["Modeling"]),
        department("surf", "Surfacing", &["Surfacing"]),
        department("rig", "Rigging", &["Rigging"]),
    ]
}

pub fn builtin_shot_departments() -> Vec<Department> {
    vec![
        department("lay", "Layout", &["Layout"]),
        department("anm", "Animation", &["Animation"]),
        department("cfx", "CharFX", &["Simulation"]),
        department("fx", "FX", &["Simulation"]),
        department("lgt", "Lighting", &["Lighting"]),
        department("cmp", "Compositing", &["Compositing"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_settings_are_populated() {
        let settings = builtin_project_settings();
        assert_eq!(settings.get_path("globals.fps"), Some(&json!(24)));
        assert_eq!(settings.get_path("globals.project_name"), Some(&json!("")));
    }

    #[test]
    fn builtin_departments() {
        let assets: Vec<String> = builtin_asset_departments().into_iter().map(|d| d.abbreviation).collect();
        assert_eq!(assets, vec!["mod", "surf", "rig"]);
        assert_eq!(builtin_shot_departments().len(), 6);
    }
}
