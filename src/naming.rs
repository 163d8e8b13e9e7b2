//! Centralized filename conventions for manifest keys and artifact names.
//!
//! Two derived names exist for every source photo, and both go through the
//! same slug transform:
//!
//! - **Manifest key**: slug of the *full* filename, extension included
//!   (`DSC_1001.JPG` → `dsc-1001-jpg`). Keeping the extension in the key means
//!   `shot.jpg` and `shot.png` in the same directory track independently.
//! - **Artifact stem**: slug of the filename stem joined with the author slug
//!   (`DSC_1001.JPG` + `Jane Doe` → `dsc-1001-by-jane-doe`). Every derivative
//!   and placeholder for the photo shares this stem.

use std::path::Path;

/// Lowercase ASCII slug: alphanumerics kept, every other run of characters
/// collapsed to a single dash, no leading or trailing dash.
///
/// - `"My Photo.jpg"` → `"my-photo-jpg"`
/// - `"DSC_1001"` → `"dsc-1001"`
/// - `"--weird--"` → `"weird"`
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Manifest key for a source photo: slug of its full filename.
pub fn photo_slug(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    slugify(&name)
}

/// Shared basename for all artifacts derived from one photo:
/// `{slug(stem)}-by-{slug(author)}`.
pub fn artifact_stem(path: &Path, author: &str) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    format!("{}-by-{}", slugify(&stem), slugify(author))
}
