//! Durable manifest bookkeeping for incremental runs.
//!
//! Two kinds of TOML document outlive a run:
//!
//! - **[`CategoryManifest`]** — one per category, mapping the slug of each
//!   source filename to the fingerprint and run id it was last processed
//!   under. This is the change-detection ledger: a photo whose current
//!   fingerprint equals the stored one is skipped entirely.
//! - **[`PhotoIndex`]** — one shared document mapping each category to the
//!   ordered list of artifact paths it currently publishes. The site layer
//!   reads this to find derivatives without globbing run-id directories.
//!
//! Both documents are loaded fully before processing and written back fully
//! (single overwrite) at the end of a run. A missing or malformed document
//! loads as empty state, which simply causes a full reprocess — the manifest
//! is a cache of work already done, never the source of truth.
//!
//! There is no partial-write protection: a crash mid-persist can truncate a
//! document, and the next run heals it by reprocessing. This trade is
//! acceptable because every artifact is reproducible from the sources.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize manifest: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// What the manifest remembers about one processed photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Content fingerprint of the most recently processed version.
    pub sha: String,
    /// Run id the current derivative set was produced under.
    pub id: String,
}

/// Per-category ledger: photo slug → [`ManifestEntry`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryManifest {
    entries: BTreeMap<String, ManifestEntry>,
}

impl CategoryManifest {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load from `path`. A missing or unparseable document yields empty
    /// state — the run proceeds as if no prior run existed.
    pub fn load(path: &Path) -> Self {
        load_or_empty(path)
    }

    /// Write the full document, overwriting any previous version.
    pub fn persist(&self, path: &Path) -> Result<(), ManifestError> {
        persist_document(self, path)
    }

    pub fn get(&self, slug: &str) -> Option<&ManifestEntry> {
        self.entries.get(slug)
    }

    /// True when `sha` matches the stored fingerprint for `slug`; such a
    /// photo is skipped without touching its entry.
    pub fn is_unchanged(&self, slug: &str, sha: &str) -> bool {
        self.get(slug).is_some_and(|entry| entry.sha == sha)
    }

    pub fn record(&mut self, slug: String, entry: ManifestEntry) {
        self.entries.insert(slug, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Shared index: category slug → ordered artifact paths.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoIndex {
    categories: BTreeMap<String, Vec<String>>,
}

impl PhotoIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load from `path`, falling back to empty state like
    /// [`CategoryManifest::load`].
    pub fn load(path: &Path) -> Self {
        load_or_empty(path)
    }

    pub fn persist(&self, path: &Path) -> Result<(), ManifestError> {
        persist_document(self, path)
    }

    pub fn paths_for(&self, category_slug: &str) -> &[String] {
        self.categories
            .get(category_slug)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Replace the full path list for one category. Other categories are
    /// untouched.
    pub fn set(&mut self, category_slug: String, paths: Vec<String>) {
        self.categories.insert(category_slug, paths);
    }
}

fn load_or_empty<T>(path: &Path) -> T
where
    T: Default + for<'de> Deserialize<'de>,
{
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return T::default(),
    };
    match toml::from_str(&content) {
        Ok(doc) => doc,
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "malformed manifest document, starting from empty state"
            );
            T::default()
        }
    }
}

fn persist_document<T: Serialize>(doc: &T, path: &Path) -> Result<(), ManifestError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let toml = toml::to_string_pretty(doc)?;
    std::fs::write(path, toml)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn entry(sha: &str, id: &str) -> ManifestEntry {
        ManifestEntry {
            sha: sha.into(),
            id: id.into(),
        }
    }

    // =========================================================================
    // CategoryManifest
    // =========================================================================

    #[test]
    fn empty_manifest_has_no_entries() {
        let m = CategoryManifest::empty();
        assert!(m.is_empty());
        assert_eq!(m.get("anything"), None);
    }

    #[test]
    fn record_then_get() {
        let mut m = CategoryManifest::empty();
        m.record("dawn-jpg".into(), entry("abc", "run1"));

        assert_eq!(m.get("dawn-jpg"), Some(&entry("abc", "run1")));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn record_overwrites_previous_entry() {
        let mut m = CategoryManifest::empty();
        m.record("dawn-jpg".into(), entry("old", "run1"));
        m.record("dawn-jpg".into(), entry("new", "run2"));

        assert_eq!(m.get("dawn-jpg"), Some(&entry("new", "run2")));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn is_unchanged_matches_only_same_sha() {
        let mut m = CategoryManifest::empty();
        m.record("dawn-jpg".into(), entry("abc", "run1"));

        assert!(m.is_unchanged("dawn-jpg", "abc"));
        assert!(!m.is_unchanged("dawn-jpg", "def"));
        assert!(!m.is_unchanged("unknown-jpg", "abc"));
    }

    #[test]
    fn manifest_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("blog.toml");

        let mut m = CategoryManifest::empty();
        m.record("dawn-jpg".into(), entry("abc123", "run1"));
        m.record("dusk-png".into(), entry("def456", "run2"));
        m.persist(&path).unwrap();

        let loaded = CategoryManifest::load(&path);
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get("dawn-jpg"), Some(&entry("abc123", "run1")));
        assert_eq!(loaded.get("dusk-png"), Some(&entry("def456", "run2")));
    }

    #[test]
    fn manifest_document_is_human_readable_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("blog.toml");

        let mut m = CategoryManifest::empty();
        m.record("dawn-jpg".into(), entry("abc123", "run1"));
        m.persist(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("[dawn-jpg]"));
        assert!(text.contains("sha = \"abc123\""));
        assert!(text.contains("id = \"run1\""));
    }

    #[test]
    fn load_missing_manifest_is_empty() {
        let tmp = TempDir::new().unwrap();
        let m = CategoryManifest::load(&tmp.path().join("absent.toml"));
        assert!(m.is_empty());
    }

    #[test]
    fn load_malformed_manifest_is_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("blog.toml");
        fs::write(&path, "not ; valid [ toml").unwrap();

        let m = CategoryManifest::load(&path);
        assert!(m.is_empty());
    }

    #[test]
    fn persist_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("deep").join("nested").join("blog.toml");

        CategoryManifest::empty().persist(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn persist_overwrites_whole_document() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("blog.toml");

        let mut m = CategoryManifest::empty();
        m.record("dawn-jpg".into(), entry("abc", "run1"));
        m.record("dusk-jpg".into(), entry("def", "run1"));
        m.persist(&path).unwrap();

        // Persisting a smaller manifest must not leave stale entries behind.
        let mut smaller = CategoryManifest::empty();
        smaller.record("dawn-jpg".into(), entry("abc", "run1"));
        smaller.persist(&path).unwrap();

        let loaded = CategoryManifest::load(&path);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get("dusk-jpg"), None);
    }

    // =========================================================================
    // PhotoIndex
    // =========================================================================

    #[test]
    fn index_roundtrip_preserves_order() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("photos.toml");

        let mut index = PhotoIndex::empty();
        index.set(
            "blog".into(),
            vec!["b/2560/x.jpg".into(), "b/1280/x.jpg".into(), "b/sqip/x.svg".into()],
        );
        index.persist(&path).unwrap();

        let loaded = PhotoIndex::load(&path);
        assert_eq!(
            loaded.paths_for("blog"),
            &["b/2560/x.jpg", "b/1280/x.jpg", "b/sqip/x.svg"]
        );
    }

    #[test]
    fn index_categories_are_independent() {
        let mut index = PhotoIndex::empty();
        index.set("blog".into(), vec!["a.jpg".into()]);
        index.set("portfolio".into(), vec!["b.jpg".into()]);

        index.set("blog".into(), vec!["c.jpg".into()]);

        assert_eq!(index.paths_for("blog"), &["c.jpg"]);
        assert_eq!(index.paths_for("portfolio"), &["b.jpg"]);
    }

    #[test]
    fn index_unknown_category_is_empty() {
        assert!(PhotoIndex::empty().paths_for("nope").is_empty());
    }

    #[test]
    fn load_malformed_index_is_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("photos.toml");
        fs::write(&path, "][").unwrap();

        let index = PhotoIndex::load(&path);
        assert!(index.paths_for("blog").is_empty());
    }
}
