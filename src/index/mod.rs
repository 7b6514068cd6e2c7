//! Static document index.
//!
//! The index is hand-authored JSON, embedded in the binary and validated once
//! at startup. A replacement index can be loaded from a file with the same
//! format (see [`DocIndex::from_path`]).

pub mod types;

pub use types::{IndexEntry, ScoredResult};

use ahash::AHashSet;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

const BUILTIN_INDEX: &str = include_str!("search_index.json");

/// Immutable collection of validated index entries
#[derive(Debug, Clone)]
pub struct DocIndex {
    entries: Vec<IndexEntry>,
}

impl DocIndex {
    /// Validate entries and build the index.
    ///
    /// Every entry needs a non-empty title and at least one keyword, and ids
    /// must be unique across the index.
    pub fn new(entries: Vec<IndexEntry>) -> Result<Self> {
        let mut seen = AHashSet::with_capacity(entries.len());

        for entry in &entries {
            if entry.title.trim().is_empty() {
                bail!("index entry '{}' has an empty title", entry.id);
            }
            if entry.keywords.is_empty() {
                bail!("index entry '{}' has no keywords", entry.id);
            }
            if !seen.insert(entry.id.as_str()) {
                bail!("duplicate index entry id '{}'", entry.id);
            }
        }

        Ok(Self { entries })
    }

    /// The index shipped with the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_INDEX).context("Built-in search index is invalid")
    }

    /// Parse an index from its JSON representation
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<IndexEntry> =
            serde_json::from_str(json).context("Failed to parse search index")?;
        Self::new(entries)
    }

    /// Load an index file from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read index file {}", path.display()))?;
        let index = Self::from_json(&content)
            .with_context(|| format!("Invalid index file {}", path.display()))?;
        tracing::debug!(path = %path.display(), entries = index.len(), "loaded search index");
        Ok(index)
    }

    /// Load `path` if given, otherwise the built-in index
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::builtin(),
        }
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&IndexEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn entry(id: &str, title: &str, keywords: &[&str]) -> IndexEntry {
        IndexEntry {
            id: id.to_string(),
            title: title.to_string(),
            section: None,
            path: "/".to_string(),
            anchor: String::new(),
            category: "Test".to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            searchable_text: String::new(),
        }
    }

    #[test]
    fn test_builtin_index_is_valid() {
        let index = DocIndex::builtin().unwrap();
        assert!(!index.is_empty());
        assert!(index.get("crawl-tool").is_some());
        assert_eq!(index.get("crawl-tool").unwrap().anchor, "#crawl");
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = DocIndex::new(vec![entry("a", "A", &["a"]), entry("a", "B", &["b"])])
            .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_rejects_empty_title() {
        assert!(DocIndex::new(vec![entry("a", "  ", &["a"])]).is_err());
    }

    #[test]
    fn test_rejects_missing_keywords() {
        assert!(DocIndex::new(vec![entry("a", "A", &[])]).is_err());
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"x","title":"X","path":"/x","category":"C","keywords":["x"]}}]"#
        )
        .unwrap();

        let index = DocIndex::load(Some(file.path())).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.entries()[0].path, "/x");
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = DocIndex::from_path(Path::new("/nonexistent/index.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read index file"));
    }
}
