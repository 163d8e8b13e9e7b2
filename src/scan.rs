//! Source photo discovery.
//!
//! Walks an input directory tree and collects every file with a recognized
//! image extension. Traversal order is whatever the filesystem reports — the
//! pipeline derives no meaning from it, and callers must not either.
//!
//! Unreadable entries (permission-denied subtrees, dangling symlinks, a root
//! that does not exist) are logged and skipped rather than aborting the run:
//! discovery problems cost you the affected photos, not the whole batch.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions recognized as source photos, compared case-insensitively.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Recursively list every image file under `root`.
///
/// Directories are never yielded. A missing or unreadable `root` produces an
/// empty list (with a warning), not an error.
pub fn scan_photos(root: &Path) -> Vec<PathBuf> {
    let mut photos = Vec::new();
    for entry in WalkDir::new(root) {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && is_photo(entry.path()) {
                    photos.push(entry.into_path());
                }
            }
            Err(err) => {
                tracing::warn!(root = %root.display(), error = %err, "skipping unreadable entry");
            }
        }
    }
    photos
}

fn is_photo(path: &Path) -> bool {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}
