//! Version name formatting and parsing.
//!
//! Versions are stored as formatted names (`v0001`, `v0002`, ...). Pickers
//! show them most recent first, ordered by their numeric value.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Lowest version number a user can pick.
pub const MIN_VERSION: u32 = 1;

/// Highest version number a user can pick.
pub const MAX_VERSION: u32 = 99_999;

/// Prefix of every formatted version name.
pub const VERSION_PREFIX: &str = "v";

/// Zero padding of the numeric part.
pub const VERSION_PADDING: usize = 4;

static VERSION_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v?(\d+)$").expect("valid regex"));

/// Format a version number: `3` becomes `v0003`.
pub fn format_version(version: u32) -> String {
    format!("{VERSION_PREFIX}{version:0width$}", width = VERSION_PADDING)
}

/// Parse a version name back to its number.
///
/// Accepts `v0003` and bare `0003`. Anything else, including numbers that
/// overflow, yields `None`.
pub fn parse_int_version(name: &str) -> Option<u32> {
    let caps = VERSION_NAME_RE.captures(name.trim())?;
    caps.get(1)?.as_str().parse().ok()
}

/// `true` when `version` is inside the pickable range.
pub fn is_valid_version(version: u32) -> bool {
    (MIN_VERSION..=MAX_VERSION).contains(&version)
}

/// A version offered in a picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionCandidate {
    /// Backing name as stored by the Core.
    pub name: String,
    /// Parsed numeric value.
    pub number: u32,
}

/// Parse `names` with `parse` and order them most recent first.
///
/// Names that do not parse are skipped. Equal numbers keep their input order.
pub fn sort_versions_desc<I, S, F>(names: I, parse: F) -> Vec<VersionCandidate>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    F: Fn(&str) -> Option<u32>,
{
    let mut candidates: Vec<VersionCandidate> = names
        .into_iter()
        .filter_map(|name| {
            let name = name.into();
            match parse(&name) {
                Some(number) => Some(VersionCandidate { name, number }),
                None => {
                    tracing::debug!(version = %name, "Skipping unparsable version name");
                    None
                }
            }
        })
        .collect();

    candidates.sort_by(|a, b| b.number.cmp(&a.number));
    candidates
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
