//! Test items, markers, and the post-collection `remote` filter.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{TestkitError, TestkitResult};

/// Marks a test that needs network access to GitHub.
pub const REMOTE_MARKER: &str = "remote";

/// Description registered for [`REMOTE_MARKER`].
pub const REMOTE_MARKER_DESCRIPTION: &str = "a test that requires remote access";

/// Built-in marker that makes the runner skip an item.
pub const SKIP_MARKER: &str = "skip";

/// Reason attached to `remote` tests when `--remote` was not passed.
pub const REMOTE_SKIP_REASON: &str = "need --remote option to run";

/// A tag on a test item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Marker {
    /// A plain marker with no arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: None,
        }
    }

    /// A `skip` marker carrying `reason`.
    pub fn skip(reason: impl Into<String>) -> Self {
        Self {
            name: SKIP_MARKER.to_string(),
            reason: Some(reason.into()),
        }
    }

    #[must_use]
    pub fn is_skip(&self) -> bool {
        self.name == SKIP_MARKER
    }
}

impl From<&str> for Marker {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A single collected test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestItem {
    /// Node id, e.g. `tests/integration/test_default.py::test_build`.
    pub name: String,
    #[serde(default)]
    pub markers: Vec<Marker>,
}

impl TestItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            markers: Vec::new(),
        }
    }

    /// Builder-style [`add_marker`](TestItem::add_marker).
    #[must_use]
    pub fn with_marker(mut self, marker: impl Into<Marker>) -> Self {
        self.add_marker(marker);
        self
    }

    pub fn add_marker(&mut self, marker: impl Into<Marker>) {
        self.markers.push(marker.into());
    }

    #[must_use]
    pub fn has_marker(&self, name: &str) -> bool {
        self.markers.iter().any(|m| m.name == name)
    }

    /// Reason of the first `skip` marker, if the item is skipped.
    #[must_use]
    pub fn skip_reason(&self) -> Option<&str> {
        self.markers
            .iter()
            .find(|m| m.is_skip())
            .map(|m| m.reason.as_deref().unwrap_or(""))
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.markers.iter().any(Marker::is_skip)
    }
}

/// Loads a JSON array of test items.
///
/// # Errors
///
/// Returns [`TestkitError::Items`] if the file cannot be read or is not a
/// JSON array of items.
pub fn load_items(path: &Path) -> TestkitResult<Vec<TestItem>> {
    let raw = std::fs::read_to_string(path).map_err(|e| TestkitError::items(path, e.to_string()))?;
    serde_json::from_str(&raw).map_err(|e| TestkitError::items(path, e.to_string()))
}

/// Markers known to the session.
///
/// `skip` is always known. Anything else must be declared before collection or
/// it shows up in [`undeclared`](MarkerRegistry::undeclared).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRegistry {
    declared: BTreeMap<String, String>,
}

impl MarkerRegistry {
    #[must_use]
    pub fn new() -> Self {
        let mut declared = BTreeMap::new();
        declared.insert(
            SKIP_MARKER.to_string(),
            "skip the given test function with an optional reason".to_string(),
        );
        Self { declared }
    }

    /// Declares `name`; a repeat declaration replaces the description.
    pub fn declare(&mut self, name: &str, description: &str) {
        self.declared
            .insert(name.to_string(), description.to_string());
    }

    #[must_use]
    pub fn is_declared(&self, name: &str) -> bool {
        self.declared.contains_key(name)
    }

    #[must_use]
    pub fn description(&self, name: &str) -> Option<&str> {
        self.declared.get(name).map(String::as_str)
    }

    /// Declared markers as `name: description` lines, sorted by name.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.declared
            .iter()
            .map(|(name, description)| format!("{name}: {description}"))
            .collect()
    }

    /// Distinct marker names used by `items` that were never declared.
    #[must_use]
    pub fn undeclared(&self, items: &[TestItem]) -> Vec<String> {
        let mut unknown: Vec<String> = items
            .iter()
            .flat_map(|item| item.markers.iter())
            .filter(|m| !self.is_declared(&m.name))
            .map(|m| m.name.clone())
            .collect();
        unknown.sort();
        unknown.dedup();
        unknown
    }
}

impl Default for MarkerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Skips every item marked `remote` unless `remote` is enabled.
///
/// Returns how many items were given a skip marker. Items without the
/// `remote` marker are never touched.
pub fn skip_remote(remote: bool, items: &mut [TestItem]) -> usize {
    if remote {
        return 0;
    }

    let mut skipped = 0;
    for item in items.iter_mut().filter(|item| item.has_marker(REMOTE_MARKER)) {
        item.add_marker(Marker::skip(REMOTE_SKIP_REASON));
        skipped += 1;
    }
    skipped
}
