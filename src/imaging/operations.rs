//! Pixel work: decode, resize, watermark compositing, JPEG encode.
//!
//! Resizing always derives the output height from the source aspect ratio —
//! there is no cropping anywhere in the pipeline, only uniform scaling.
//! Lanczos3 is used throughout; downscaling to gallery sizes is the dominant
//! case and cheaper filters alias visibly.

use super::calculations::{mark_anchor, scaled_height};
use super::params::Quality;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader, imageops};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Load and decode an image from disk.
pub fn load_image(path: &Path) -> Result<DynamicImage, ImagingError> {
    ImageReader::open(path)
        .map_err(ImagingError::Io)?
        .decode()
        .map_err(|source| ImagingError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

/// Read image dimensions from the file header without a full decode.
pub fn photo_dimensions(path: &Path) -> Result<(u32, u32), ImagingError> {
    image::image_dimensions(path).map_err(|source| ImagingError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Scale to `target_width`, height derived from the source aspect ratio.
pub fn resize_to_width(img: &DynamicImage, target_width: u32) -> DynamicImage {
    let height = scaled_height(img.dimensions(), target_width);
    img.resize_exact(target_width, height, FilterType::Lanczos3)
}

/// Alpha-over `mark` onto `base`, anchored bottom-left. The mark is never
/// scaled to fit; a mark larger than the base is clipped.
pub fn composite_watermark(base: &mut DynamicImage, mark: &DynamicImage) {
    let (x, y) = mark_anchor(base.dimensions(), mark.dimensions());
    imageops::overlay(base, mark, x, y);
}

/// Encode `img` as JPEG at `dest`, creating parent directories first.
pub fn write_jpeg(img: &DynamicImage, dest: &Path, quality: Quality) -> Result<(), ImagingError> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(dest)?;
    let writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(writer, quality.value() as u8);

    // JPEG carries no alpha channel; flatten anything else to RGB8 first.
    let result = match img {
        DynamicImage::ImageRgb8(_) => img.write_with_encoder(encoder),
        _ => DynamicImage::ImageRgb8(img.to_rgb8()).write_with_encoder(encoder),
    };
    result.map_err(|source| ImagingError::Encode {
        path: dest.to_path_buf(),
        source,
    })
}
