//! The incremental resize pipeline.
//!
//! One [`Pipeline::run`] call processes one category: it scans the input
//! directory, fingerprints every photo, skips the ones whose fingerprint
//! matches the category manifest, and for the rest generates a derivative per
//! configured size (watermarking the first size when requested) plus one
//! placeholder. The manifest and the category index are persisted exactly
//! once, at the very end of the run.
//!
//! ## Per-photo lifecycle
//!
//! ```text
//! Discovered → fingerprint compared → Skipped            (unchanged)
//!                                   → Processed          (all sizes + placeholder written)
//!                                   → Failed             (unreadable/undecodable/unwritable)
//! ```
//!
//! A failed photo is isolated: it is logged, reported in the [`RunReport`],
//! and its manifest entry is left untouched so the next run retries it. Only
//! run-level problems (unreadable watermark, manifest persist failure) abort
//! the whole run.
//!
//! ## Concurrency
//!
//! Photos are processed on the rayon pool. Three rules keep this safe:
//! each photo is owned by exactly one worker (its sizes are generated
//! sequentially inside that worker), the manifest is read-only during the
//! parallel phase, and `collect()` is a barrier — all mutation and the final
//! persist happen strictly after every worker has finished. The watermark is
//! decoded once per run and shared read-only.

use crate::fingerprint::fingerprint;
use crate::imaging::{self, ImagingError, Quality};
use crate::manifest::{CategoryManifest, ManifestEntry, ManifestError, PhotoIndex};
use crate::naming::{artifact_stem, photo_slug, slugify};
use crate::placeholder::PlaceholderGenerator;
use crate::run_id::RunId;
use crate::scan::scan_photos;
use crate::store::Store;
use image::DynamicImage;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("no sizes configured for category '{0}'")]
    NoSizes(String),
    #[error("failed to load watermark {path}: {source}")]
    Watermark {
        path: PathBuf,
        #[source]
        source: ImagingError,
    },
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Everything one resize invocation needs, supplied by the caller.
#[derive(Debug, Clone)]
pub struct ResizeRequest {
    /// Directory tree of source photos.
    pub input_dir: PathBuf,
    /// Author name, slugged into every artifact filename.
    pub author: String,
    /// Output category ("prefix"); manifest and artifacts are keyed by its slug.
    pub category: String,
    /// Target widths, in order. The first entry is the only one eligible for
    /// watermarking.
    pub sizes: Vec<u32>,
    /// Watermark image to composite onto the first size, or `None` to disable.
    pub watermark: Option<PathBuf>,
}

/// Terminal state of one photo in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoStatus {
    /// All derivatives written and the manifest entry refreshed.
    Processed,
    /// Fingerprint matched the manifest; nothing generated, nothing recorded.
    Skipped,
    /// Photo abandoned after an error; manifest entry untouched.
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct PhotoOutcome {
    pub source: PathBuf,
    pub slug: String,
    pub status: PhotoStatus,
}

/// Summary of one pipeline run, in scan order.
#[derive(Debug)]
pub struct RunReport {
    pub run_id: RunId,
    pub category_slug: String,
    pub outcomes: Vec<PhotoOutcome>,
}

impl RunReport {
    pub fn processed(&self) -> usize {
        self.count(|s| matches!(s, PhotoStatus::Processed))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, PhotoStatus::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, PhotoStatus::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&PhotoStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}

struct PhotoResult {
    outcome: PhotoOutcome,
    /// `Some` only for processed photos; folded into the manifest after the
    /// parallel phase.
    entry: Option<ManifestEntry>,
}

impl PhotoResult {
    fn new(photo: &Path, slug: String, status: PhotoStatus) -> Self {
        Self {
            outcome: PhotoOutcome {
                source: photo.to_path_buf(),
                slug,
                status,
            },
            entry: None,
        }
    }

    fn failed(photo: &Path, slug: String, reason: String) -> Self {
        Self::new(photo, slug, PhotoStatus::Failed(reason))
    }
}

pub struct Pipeline<'a> {
    store: Store,
    placeholder: &'a dyn PlaceholderGenerator,
    quality: Quality,
}

impl<'a> Pipeline<'a> {
    pub fn new(store: Store, placeholder: &'a dyn PlaceholderGenerator) -> Self {
        Self {
            store,
            placeholder,
            quality: Quality::default(),
        }
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    /// Run the full pipeline for one category.
    pub fn run(&self, request: &ResizeRequest) -> Result<RunReport, PipelineError> {
        if request.sizes.is_empty() {
            return Err(PipelineError::NoSizes(request.category.clone()));
        }

        let run_id = RunId::generate();
        let category_slug = slugify(&request.category);

        let manifest_path = self.store.category_manifest_path(&category_slug);
        let index_path = self.store.index_path();
        let mut manifest = CategoryManifest::load(&manifest_path);
        let mut index = PhotoIndex::load(&index_path);

        // Decoded once, shared read-only by every worker. A missing watermark
        // invalidates the whole run, not one photo.
        let watermark = match &request.watermark {
            Some(path) => {
                Some(
                    imaging::load_image(path).map_err(|source| PipelineError::Watermark {
                        path: path.clone(),
                        source,
                    })?,
                )
            }
            None => None,
        };

        let photos = scan_photos(&request.input_dir);
        tracing::info!(
            category = %category_slug,
            run = %run_id,
            photos = photos.len(),
            "starting resize run"
        );

        let results: Vec<PhotoResult> = photos
            .par_iter()
            .map(|photo| {
                self.process_photo(
                    photo,
                    request,
                    &run_id,
                    &category_slug,
                    watermark.as_ref(),
                    &manifest,
                )
            })
            .collect();

        // collect() above is the barrier: every derivative is on disk before
        // the manifest is touched or persisted.
        for result in &results {
            if let Some(entry) = &result.entry {
                manifest.record(result.outcome.slug.clone(), entry.clone());
            }
        }

        let paths = self.published_paths(&results, &manifest, &category_slug, request);
        index.set(category_slug.clone(), paths);

        manifest.persist(&manifest_path)?;
        index.persist(&index_path)?;

        Ok(RunReport {
            run_id,
            category_slug,
            outcomes: results.into_iter().map(|r| r.outcome).collect(),
        })
    }

    fn process_photo(
        &self,
        photo: &Path,
        request: &ResizeRequest,
        run_id: &RunId,
        category_slug: &str,
        watermark: Option<&DynamicImage>,
        manifest: &CategoryManifest,
    ) -> PhotoResult {
        let slug = photo_slug(photo);

        let sha = match fingerprint(photo) {
            Ok(sha) => sha,
            Err(err) => {
                tracing::warn!(photo = %photo.display(), error = %err, "cannot fingerprint photo");
                return PhotoResult::failed(photo, slug, format!("failed to read: {err}"));
            }
        };

        if manifest.is_unchanged(&slug, &sha) {
            return PhotoResult::new(photo, slug, PhotoStatus::Skipped);
        }

        let source = match imaging::load_image(photo) {
            Ok(img) => img,
            Err(err) => {
                tracing::warn!(photo = %photo.display(), error = %err, "skipping undecodable photo");
                return PhotoResult::failed(photo, slug, err.to_string());
            }
        };

        let stem = artifact_stem(photo, &request.author);
        for (idx, &size) in request.sizes.iter().enumerate() {
            let mut derived = imaging::resize_to_width(&source, size);
            if idx == 0
                && let Some(mark) = watermark
            {
                imaging::composite_watermark(&mut derived, mark);
            }
            let dest = self
                .store
                .derivative_path(run_id, category_slug, size, &stem);
            if let Err(err) = imaging::write_jpeg(&derived, &dest, self.quality) {
                tracing::warn!(
                    photo = %photo.display(),
                    error = %err,
                    "abandoning photo after write failure"
                );
                return PhotoResult::failed(photo, slug, err.to_string());
            }
        }

        // Best-effort: the generator writes the file or leaves none, and the
        // expected path is published either way.
        let placeholder_dest = self.store.placeholder_path(run_id, category_slug, &stem);
        if let Err(err) = self.placeholder.generate(photo, &placeholder_dest) {
            tracing::warn!(photo = %photo.display(), error = %err, "placeholder generation failed");
        }

        PhotoResult {
            outcome: PhotoOutcome {
                source: photo.to_path_buf(),
                slug,
                status: PhotoStatus::Processed,
            },
            entry: Some(ManifestEntry {
                sha,
                id: run_id.to_string(),
            }),
        }
    }

    /// Rebuild the category's published path list from post-run manifest
    /// state.
    ///
    /// Each scanned photo contributes its derivative and placeholder paths
    /// under the run id recorded in its manifest entry: freshly processed
    /// photos under this run's id, skipped photos under the id of the run
    /// that last processed them, never-processed photos nothing. Rebuilding
    /// (instead of appending on every run) keeps the index duplicate-free
    /// across repeated invocations.
    fn published_paths(
        &self,
        results: &[PhotoResult],
        manifest: &CategoryManifest,
        category_slug: &str,
        request: &ResizeRequest,
    ) -> Vec<String> {
        let mut paths = Vec::new();
        for result in results {
            let Some(entry) = manifest.get(&result.outcome.slug) else {
                continue;
            };
            let run = RunId::from_stored(entry.id.clone());
            let stem = artifact_stem(&result.outcome.source, &request.author);
            for &size in &request.sizes {
                paths.push(
                    self.store
                        .derivative_path(&run, category_slug, size, &stem)
                        .to_string_lossy()
                        .into_owned(),
                );
            }
            paths.push(
                self.store
                    .placeholder_path(&run, category_slug, &stem)
                    .to_string_lossy()
                    .into_owned(),
            );
        }
        paths
    }
}
