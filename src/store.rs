//! On-disk layout of the artifact store.
//!
//! Everything the pipeline writes lives under one store root (default
//! `.darkroom`), passed in explicitly — no ambient working-directory state:
//!
//! ```text
//! .darkroom/
//! ├── photos.toml                      # category → ordered artifact paths
//! ├── blog.toml                        # per-category manifest (slug → sha/id)
//! └── photos/
//!     └── {run-id}/
//!         └── blog/                    # category slug
//!             ├── 2560/
//!             │   └── dawn-by-jane.jpg # watermark-eligible (first size)
//!             ├── 1280/
//!             │   └── dawn-by-jane.jpg
//!             └── sqip/
//!                 └── dawn-by-jane.svg # placeholder
//! ```
//!
//! Derivative paths are keyed by {run id, category, size, artifact stem}, so
//! a reprocessed photo lands in a fresh run-id directory instead of
//! overwriting the previous derivative set.

use crate::run_id::RunId;
use std::path::{Path, PathBuf};

/// Subdirectory of the store root holding generated artifacts.
const PHOTOS_DIR: &str = "photos";

/// Subdirectory of a category holding vector placeholders.
const PLACEHOLDER_DIR: &str = "sqip";

/// Filename of the shared category index document.
const INDEX_DOC: &str = "photos.toml";

/// Resolves every path the pipeline reads or writes under its root.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn category_dir(&self, run: &RunId, category_slug: &str) -> PathBuf {
        self.root
            .join(PHOTOS_DIR)
            .join(run.as_str())
            .join(category_slug)
    }

    /// `{root}/photos/{run}/{category}/{size}/{stem}.jpg`
    pub fn derivative_path(
        &self,
        run: &RunId,
        category_slug: &str,
        size: u32,
        stem: &str,
    ) -> PathBuf {
        self.category_dir(run, category_slug)
            .join(size.to_string())
            .join(format!("{stem}.jpg"))
    }

    /// `{root}/photos/{run}/{category}/sqip/{stem}.svg`
    pub fn placeholder_path(&self, run: &RunId, category_slug: &str, stem: &str) -> PathBuf {
        self.category_dir(run, category_slug)
            .join(PLACEHOLDER_DIR)
            .join(format!("{stem}.svg"))
    }

    /// Per-category manifest document: `{root}/{category}.toml`.
    pub fn category_manifest_path(&self, category_slug: &str) -> PathBuf {
        self.root.join(format!("{category_slug}.toml"))
    }

    /// Shared category index document: `{root}/photos.toml`.
    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_DOC)
    }
}
