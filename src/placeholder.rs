//! Low-quality placeholder generation.
//!
//! Placeholders are a pluggable capability: the pipeline only knows the
//! [`PlaceholderGenerator`] contract — *best-effort, produce exactly one file
//! at the requested path or leave none*. The pipeline records the expected
//! path in the category index without verifying the file was written, and a
//! generator failure never fails the photo.
//!
//! The built-in [`BlurPreview`] implementation embeds a tiny JPEG rendition
//! of the photo inside an SVG with a Gaussian blur filter. The SVG viewport
//! matches the source dimensions, so the placeholder reserves the same layout
//! box as the real image while weighing a few hundred bytes.

use crate::imaging::{self, ImagingError};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaceholderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Imaging(#[from] ImagingError),
}

/// Produces one compact preview file per source photo.
///
/// Implementations must be `Sync`: the pipeline invokes the generator from
/// its worker threads, one call per photo.
pub trait PlaceholderGenerator: Sync {
    fn generate(&self, source: &Path, dest: &Path) -> Result<(), PlaceholderError>;
}

/// Default generator: blurred micro-JPEG wrapped in an SVG.
#[derive(Debug, Clone)]
pub struct BlurPreview {
    /// Width of the embedded raster; 32px keeps placeholders under ~1 KiB.
    preview_width: u32,
}

impl BlurPreview {
    pub fn new(preview_width: u32) -> Self {
        Self {
            preview_width: preview_width.max(1),
        }
    }
}

impl Default for BlurPreview {
    fn default() -> Self {
        Self::new(32)
    }
}

impl PlaceholderGenerator for BlurPreview {
    fn generate(&self, source: &Path, dest: &Path) -> Result<(), PlaceholderError> {
        // Header-only read: the viewport must match the source, not the
        // shrunken preview.
        let (width, height) = imaging::photo_dimensions(source)?;

        let img = imaging::load_image(source)?;
        let tiny = imaging::resize_to_width(&img, self.preview_width.min(width));

        let mut jpeg = Vec::new();
        let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut jpeg), 60);
        DynamicImage::ImageRgb8(tiny.to_rgb8())
            .write_with_encoder(encoder)
            .map_err(|source_err| ImagingError::Encode {
                path: dest.to_path_buf(),
                source: source_err,
            })?;

        let svg = render_svg(width, height, &BASE64.encode(&jpeg));
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(dest, svg)?;
        Ok(())
    }
}

fn render_svg(width: u32, height: u32, payload: &str) -> String {
    format!(
        concat!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" ",
            "xmlns:xlink=\"http://www.w3.org/1999/xlink\" ",
            "viewBox=\"0 0 {w} {h}\">",
            "<filter id=\"b\"><feGaussianBlur stdDeviation=\"12\"/></filter>",
            "<image filter=\"url(#b)\" x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" ",
            "xlink:href=\"data:image/jpeg;base64,{payload}\"/>",
            "</svg>"
        ),
        w = width,
        h = height,
        payload = payload,
    )
}
