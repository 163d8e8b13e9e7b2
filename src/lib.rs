//! # Darkroom
//!
//! An incremental derivative-image pipeline for static photo galleries.
//! Point it at a directory of source photographs and it produces, for a named
//! output category, resized JPEG derivatives at multiple widths, an optional
//! watermark composite on the largest size, and a compact SVG placeholder per
//! photo. Re-running is safe and cheap: photos whose content hash matches the
//! last processed version are skipped entirely.
//!
//! # Architecture
//!
//! ```text
//! scan          input dir            →  photo paths
//! fingerprint   photo bytes          →  SHA-256 change-detection key
//! imaging       decode/resize/mark   →  JPEG derivatives
//! placeholder   photo                →  blurred SVG preview
//! manifest      durable TOML state   →  skip decisions + published paths
//! pipeline      all of the above     →  one category, one run
//! ```
//!
//! The only state that outlives a run are two TOML documents under the store
//! root: a per-category manifest (`{slug: {sha, id}}`) and a shared category
//! index (`{category: [paths…]}`). Both are loaded fully before processing
//! and written back fully at the end, never incrementally.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Recursive photo discovery with extension filtering |
//! | [`fingerprint`] | Content hashing for change detection |
//! | [`naming`] | Slug transform and artifact filename conventions |
//! | [`run_id`] | Per-invocation identity embedded in artifact paths |
//! | [`store`] | On-disk layout: artifact and document path resolution |
//! | [`imaging`] | Resize, watermark compositing, JPEG encoding |
//! | [`placeholder`] | Pluggable low-quality preview generation |
//! | [`manifest`] | Durable category manifest and photo index documents |
//! | [`pipeline`] | Orchestrator: scan → skip/process → persist |
//! | [`output`] | CLI display of run results |
//!
//! # Design Decisions
//!
//! ## Content Hashing Over Mtimes
//!
//! Change detection hashes full file bytes (SHA-256) instead of consulting
//! timestamps or sizes. This costs one read per photo per run and buys
//! correctness against `touch`, `git checkout`, and clock skew — all common
//! in the static-site workflows this feeds.
//!
//! ## Run-Id Directories, Never Overwrites
//!
//! A reprocessed photo lands under a fresh run-id directory rather than
//! overwriting the previous derivative set. Deployed sites keep working
//! mid-build, and a crashed run leaves nothing half-overwritten; the manifest
//! simply still points at the old set.
//!
//! ## Per-Photo Failure Isolation
//!
//! A corrupt source costs you that photo, not the batch. Failed photos are
//! logged, reported, and keep their old manifest entry so the next run
//! retries them. Only run-level problems (unreadable watermark, manifest
//! persist failure) abort a run.
//!
//! ## Pure-Rust Imaging
//!
//! All pixel work goes through the `image` crate (Lanczos3 resampling, JPEG
//! encoding) — no ImageMagick, no system dependencies, one static binary.

pub mod fingerprint;
pub mod imaging;
pub mod manifest;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod placeholder;
pub mod run_id;
pub mod scan;
pub mod store;

#[cfg(test)]
pub(crate) mod test_helpers;
