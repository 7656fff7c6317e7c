//! Folder structure trees for new projects.
//!
//! A tree node is `{name, children}` where sibling order is the creation
//! order. The root node is synthetic and carries an empty name.
//!
//! Nodes are addressed by index paths: `[]` is the root, `[1]` the second
//! top-level folder, `[1, 0]` its first child.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::validation::{validate_field, FieldKind};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderStructure {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub children: Vec<FolderStructure>,
}

impl FolderStructure {
    /// A synthetic root holding `children`.
    pub fn root(children: Vec<FolderStructure>) -> Self {
        Self {
            name: String::new(),
            children,
        }
    }

    /// A named folder without children.
    pub fn folder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// A named folder with children.
    pub fn with_children(name: impl Into<String>, children: Vec<FolderStructure>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Names of the top-level folders, in order.
    pub fn top_level_names(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn node(&self, at: &[usize]) -> Option<&FolderStructure> {
        let mut current = self;
        for &idx in at {
            current = current.children.get(idx)?;
        }
        Some(current)
    }

    fn node_mut(&mut self, at: &[usize]) -> Result<&mut FolderStructure, CoreError> {
        let mut current = self;
        for &idx in at {
            current = current.children.get_mut(idx).ok_or_else(|| {
                CoreError::Validation(format!("No folder at position {at:?}"))
            })?;
        }
        Ok(current)
    }

    /// Append a new folder under the node at `parent`.
    ///
    /// Returns the index path of the new folder.
    pub fn add_folder(&mut self, parent: &[usize], name: &str) -> Result<Vec<usize>, CoreError> {
        validate_folder_name(name)?;
        let node = self.node_mut(parent)?;
        if node.children.iter().any(|c| c.name == name) {
            return Err(CoreError::Conflict(format!(
                "A folder named '{name}' already exists here"
            )));
        }
        node.children.push(FolderStructure::folder(name));

        let mut path = parent.to_vec();
        path.push(node.children.len() - 1);
        Ok(path)
    }

    /// Rename the folder at `at`. The root cannot be renamed.
    pub fn rename(&mut self, at: &[usize], name: &str) -> Result<(), CoreError> {
        let Some((&last, parent)) = at.split_last() else {
            return Err(CoreError::Validation("The root folder cannot be renamed".to_string()));
        };
        validate_folder_name(name)?;
        let parent = self.node_mut(parent)?;
        if parent
            .children
            .iter()
            .enumerate()
            .any(|(idx, c)| idx != last && c.name == name)
        {
            return Err(CoreError::Conflict(format!(
                "A folder named '{name}' already exists here"
            )));
        }
        let node = parent.children.get_mut(last).ok_or_else(|| {
            CoreError::Validation(format!("No folder at position {at:?}"))
        })?;
        node.name = name.to_string();
        Ok(())
    }

    /// Remove the folder at `at` together with its children.
    pub fn remove(&mut self, at: &[usize]) -> Result<FolderStructure, CoreError> {
        let Some((&last, parent)) = at.split_last() else {
            return Err(CoreError::Validation("The root folder cannot be removed".to_string()));
        };
        let parent = self.node_mut(parent)?;
        if last >= parent.children.len() {
            return Err(CoreError::Validation(format!("No folder at position {at:?}")));
        }
        Ok(parent.children.remove(last))
    }

    /// Relative paths of every folder below the root, parents before
    /// children, siblings in order. Segments are joined with `/`.
    pub fn relative_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        for child in &self.children {
            child.collect_paths("", &mut paths);
        }
        paths
    }

    fn collect_paths(&self, prefix: &str, out: &mut Vec<String>) {
        let path = if prefix.is_empty() {
            self.name.clone()
        } else {
            format!("{prefix}/{}", self.name)
        };
        out.push(path.clone());
        for child in &self.children {
            child.collect_paths(&path, out);
        }
    }
}

fn validate_folder_name(name: &str) -> Result<(), CoreError> {
    validate_field(FieldKind::FolderName, name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn sample() -> FolderStructure {
        FolderStructure::root(vec![
            FolderStructure::with_children(
                "00_Pipeline",
                vec![FolderStructure::folder("Fallbacks")],
            ),
            FolderStructure::folder("01_Management"),
            FolderStructure::folder("03_Production"),
        ])
    }

    #[test]
    fn relative_paths_keep_creation_order() {
        assert_eq!(
            sample().relative_paths(),
            vec![
                "00_Pipeline",
                "00_Pipeline/Fallbacks",
                "01_Management",
                "03_Production",
            ]
        );
    }

    #[test]
    fn root_serializes_with_empty_name() {
        let json = serde_json::to_value(FolderStructure::root(vec![])).unwrap();
        assert_eq!(json, serde_json::json!({"name": "", "children": []}));
    }

    #[test]
    fn deserializes_without_children_key() {
        let node: FolderStructure = serde_json::from_str(r#"{"name": "Assets"}"#).unwrap();
        assert_eq!(node, FolderStructure::folder("Assets"));
    }

    #[test]
    fn add_folder_appends_at_the_end() {
        let mut tree = sample();
        let at = tree.add_folder(&[0], "Scripts").unwrap();
        assert_eq!(at, vec![0, 1]);
        assert_eq!(tree.node(&[0]).unwrap().children[1].name, "Scripts");
    }

    #[test]
    fn add_folder_rejects_duplicate_sibling() {
        let mut tree = sample();
        assert_matches!(tree.add_folder(&[], "01_Management"), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn add_folder_rejects_invalid_name() {
        let mut tree = sample();
        assert_matches!(tree.add_folder(&[], "bad*name"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn add_folder_rejects_missing_parent() {
        let mut tree = sample();
        assert_matches!(tree.add_folder(&[7], "x"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rename_changes_only_the_target() {
        let mut tree = sample();
        tree.rename(&[2], "02_Production").unwrap();
        assert_eq!(
            tree.top_level_names(),
            vec!["00_Pipeline", "01_Management", "02_Production"]
        );
    }

    #[test]
    fn rename_to_same_name_is_allowed() {
        let mut tree = sample();
        assert!(tree.rename(&[1], "01_Management").is_ok());
    }

    #[test]
    fn rename_root_rejects() {
        let mut tree = sample();
        assert_matches!(tree.rename(&[], "root"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn remove_takes_subtree() {
        let mut tree = sample();
        let removed = tree.remove(&[0]).unwrap();
        assert_eq!(removed.children.len(), 1);
        assert_eq!(tree.top_level_names(), vec!["01_Management", "03_Production"]);
    }

    #[test]
    fn remove_out_of_range_rejects() {
        let mut tree = sample();
        assert!(tree.remove(&[3]).is_err());
        assert!(tree.remove(&[]).is_err());
    }
}
