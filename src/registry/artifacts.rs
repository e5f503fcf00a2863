//! Configuration artifacts keyed by target path.
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::FormatError;
use crate::format::Pipeline;

/// One generated configuration file.
#[derive(Debug, Clone)]
pub struct ArtifactEntry {
    /// Path of the file, relative to the project root.
    pub target: PathBuf,
    /// Structured content to render.
    pub value: Value,
    /// Formatters that turn `value` into the file's text.
    pub pipeline: Pipeline,
}

impl ArtifactEntry {
    /// Create a new artifact entry.
    #[must_use]
    pub fn new(target: impl Into<PathBuf>, value: Value, pipeline: Pipeline) -> Self {
        Self {
            target: target.into(),
            value,
            pipeline,
        }
    }

    /// Render the entry's value through its pipeline.
    ///
    /// # Errors
    ///
    /// Returns the pipeline's [`FormatError`].
    pub fn render(&self) -> Result<String, FormatError> {
        self.pipeline.render(&self.value)
    }
}

/// Ordered set of artifacts, unique by target path.
#[derive(Debug, Clone, Default)]
pub struct ArtifactRegistry {
    entries: Vec<ArtifactEntry>,
}

impl ArtifactRegistry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert `entry`, replacing (in place) any entry with the same target.
    ///
    /// Returns the replaced entry, if any.
    pub fn insert(&mut self, entry: ArtifactEntry) -> Option<ArtifactEntry> {
        match self.entries.iter_mut().find(|e| e.target == entry.target) {
            Some(slot) => Some(std::mem::replace(slot, entry)),
            None => {
                self.entries.push(entry);
                None
            }
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, entry: ArtifactEntry) -> Self {
        self.insert(entry);
        self
    }

    /// Remove the entry targeting `target`.
    pub fn remove(&mut self, target: impl AsRef<Path>) -> Option<ArtifactEntry> {
        let target = target.as_ref();
        let index = self.entries.iter().position(|e| e.target == target)?;
        Some(self.entries.remove(index))
    }

    /// Look up the entry targeting `target`.
    #[must_use]
    pub fn get(&self, target: impl AsRef<Path>) -> Option<&ArtifactEntry> {
        let target = target.as_ref();
        self.entries.iter().find(|e| e.target == target)
    }

    /// Mutable lookup of the entry targeting `target`.
    pub fn get_mut(&mut self, target: impl AsRef<Path>) -> Option<&mut ArtifactEntry> {
        let target = target.as_ref();
        self.entries.iter_mut().find(|e| e.target == target)
    }

    /// Iterate over entries in deployment order.
    pub fn iter(&self) -> std::slice::Iter<'_, ArtifactEntry> {
        self.entries.iter()
    }

    /// Target paths in deployment order.
    #[must_use]
    pub fn targets(&self) -> Vec<&Path> {
        self.entries.iter().map(|e| e.target.as_path()).collect()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for ArtifactRegistry {
    type Item = ArtifactEntry;
    type IntoIter = std::vec::IntoIter<ArtifactEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ArtifactRegistry {
    type Item = &'a ArtifactEntry;
    type IntoIter = std::slice::Iter<'a, ArtifactEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<ArtifactEntry> for ArtifactRegistry {
    fn from_iter<I: IntoIterator<Item = ArtifactEntry>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::with)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::format::Lines;
    use serde_json::json;

    fn entry(target: &str, lines: &[&str]) -> ArtifactEntry {
        ArtifactEntry::new(target, json!(lines), Pipeline::new().then(Lines))
    }

    #[test]
    fn insertion_order_is_preserved() {
        let registry: ArtifactRegistry = [entry("b", &[]), entry("a", &[]), entry("c", &[])]
            .into_iter()
            .collect();
        assert_eq!(
            registry.targets(),
            vec![Path::new("b"), Path::new("a"), Path::new("c")]
        );
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut registry = ArtifactRegistry::new()
            .with(entry("a", &["old"]))
            .with(entry("b", &[]));
        let replaced = registry.insert(entry("a", &["new"]));
        assert_eq!(replaced.unwrap().value, json!(["old"]));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.targets(), vec![Path::new("a"), Path::new("b")]);
        assert_eq!(registry.get("a").unwrap().render().unwrap(), "new\n");
    }

    #[test]
    fn remove_returns_entry_and_shrinks() {
        let mut registry = ArtifactRegistry::new().with(entry("a", &[])).with(entry("b", &[]));
        assert!(registry.remove("a").is_some());
        assert!(registry.remove("a").is_none());
        assert_eq!(registry.targets(), vec![Path::new("b")]);
    }

    #[test]
    fn get_mut_allows_value_replacement() {
        let mut registry = ArtifactRegistry::new().with(entry("ignore", &["x"]));
        registry.get_mut("ignore").unwrap().value = json!(["x", "y"]);
        assert_eq!(registry.get("ignore").unwrap().render().unwrap(), "x\ny\n");
    }

    #[test]
    fn empty_registry() {
        let registry = ArtifactRegistry::default();
        assert!(registry.is_empty());
        assert_eq!(registry.iter().count(), 0);
    }
}
