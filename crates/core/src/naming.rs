//! Project naming and path derivation.
//!
//! The project dialog keeps the project path in step with the project name:
//! while the user types a name, the last path segment follows it. Paths are
//! plain strings as typed by the user; both `/` and `\` count as separators
//! and new segments are joined with the separator the path already uses.

use crate::validation::{sanitize_field, FieldKind};

/// Folder inside every project holding its pipeline configuration.
pub const PIPELINE_FOLDER: &str = "00_Pipeline";

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Separator to use when extending `path`: the last one it contains, `/`
/// when it has none.
fn preferred_separator(path: &str) -> char {
    path.chars().rev().find(|&c| is_separator(c)).unwrap_or('/')
}

/// Split `path` into its directory part and last segment.
///
/// The directory of a root-level entry keeps its root (`/proj` -> `/`,
/// `C:\proj` -> `C:\`).
pub fn split_last_segment(path: &str) -> (&str, &str) {
    match path.rfind(is_separator) {
        Some(idx) => {
            let head = &path[..idx];
            let tail = &path[idx + 1..];
            if head.is_empty() || head.ends_with(':') {
                (&path[..=idx], tail)
            } else {
                (head, tail)
            }
        }
        None => ("", path),
    }
}

/// Join `segment` onto `dir`.
pub fn join_segment(dir: &str, segment: &str) -> String {
    if dir.is_empty() {
        return segment.to_string();
    }
    if dir.ends_with(is_separator) {
        return format!("{dir}{segment}");
    }
    format!("{dir}{}{segment}", preferred_separator(dir))
}

/// Keep the project path in step with an edited project name.
///
/// - an empty path stays empty
/// - a path already ending with `new_name` is kept
/// - otherwise, when the last segment is `prev_name` it is replaced by
///   `new_name`; when the user changed the tail by hand, `new_name` is
///   appended as a new segment
///
/// # Examples
///
/// ```
/// use prism_core::naming::sync_path_to_name;
///
/// assert_eq!(sync_path_to_name("Alph", "Alpha", "/projects/Alph"), "/projects/Alpha");
/// assert_eq!(sync_path_to_name("Alpha", "Beta", "/projects/custom"), "/projects/custom/Beta");
/// assert_eq!(sync_path_to_name("", "Alpha", ""), "");
/// ```
pub fn sync_path_to_name(prev_name: &str, new_name: &str, path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    if !new_name.is_empty() && path.ends_with(new_name) {
        return path.to_string();
    }

    let (dir, last) = split_last_segment(path);
    let base = if last == prev_name { dir } else { path };
    join_segment(base, new_name)
}

/// Name/path pair after a name edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEdit {
    pub name: String,
    pub path: String,
}

/// Tracks the previous project name across edits of the name field.
#[derive(Debug, Clone, Default)]
pub struct ProjectNameSync {
    prev_name: String,
}

impl ProjectNameSync {
    pub fn new(initial_name: &str) -> Self {
        Self {
            prev_name: initial_name.to_string(),
        }
    }

    pub fn prev_name(&self) -> &str {
        &self.prev_name
    }

    /// Apply a keystroke in the name field: sanitise the name, derive the
    /// new path and remember the name for the next edit.
    pub fn name_edited(&mut self, raw_name: &str, path: &str) -> NameEdit {
        let name = sanitize_field(FieldKind::ProjectName, raw_name);
        let path = sync_path_to_name(&self.prev_name, &name, path);
        self.prev_name = name.clone();
        NameEdit { name, path }
    }
}

/// Lexically normalise a path: repeated separators and `.` segments are
/// dropped and `..` segments collapse their parent. A drive prefix such as
/// `C:` is kept. UNC prefixes are not recognised.
pub fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let sep = preferred_separator(path);
    let (drive, rest) = split_drive(path);
    let rooted = rest.starts_with(is_separator);

    let mut parts: Vec<&str> = Vec::new();
    for segment in rest.split(is_separator) {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|p| *p != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let mut out = String::from(drive);
    if rooted {
        out.push(sep);
    }
    out.push_str(&parts.join(&sep.to_string()));
    if out.is_empty() {
        out.push('.');
    }
    out
}

pub(crate) fn split_drive(path: &str) -> (&str, &str) {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        path.split_at(2)
    } else {
        ("", path)
    }
}

/// Project path after the user picked a folder in a browse dialog: the
/// selection is normalised and the project name appended unless the
/// selection already ends with it.
pub fn join_browsed_path(selected: &str, name: &str) -> String {
    let path = normalize_path(selected);
    if path.ends_with(name) {
        path
    } else {
        join_segment(&path, name)
    }
}

/// A selection pointing at a project's pipeline folder is lifted to the
/// project root.
pub fn normalize_existing_project_path(path: &str) -> String {
    let (dir, last) = split_last_segment(path);
    if last == PIPELINE_FOLDER {
        dir.to_string()
    } else {
        path.to_string()
    }
}

/// Parse the asset field: a comma separated list of asset names, each of
/// which may include parent folders separated by `/`. Leading slashes and
/// empty entries are dropped.
pub fn split_asset_names(text: &str) -> Vec<String> {
    text.split(',')
        .map(|entry| {
            entry
                .trim()
                .split('/')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("/")
        })
        .filter(|entry| !entry.is_empty())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
