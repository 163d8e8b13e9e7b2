//! Shared test utilities: synthetic image fixtures.
//!
//! Real (tiny) encoded images, not stand-in bytes — the pipeline tests
//! exercise actual decode/resize/encode paths, so fixtures must decode.

use crate::imaging::{Quality, write_jpeg};
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

/// Gradient JPEG; content varies per pixel so crops of different dimensions
/// never collide on fingerprint.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }));
    write_jpeg(&img, path, Quality::default()).unwrap();
}

/// Gradient PNG, for exercising the `.png` source path.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 64])
    });
    img.save(path).unwrap();
}

/// Solid-color JPEG; useful when a test samples pixel values after a lossy
/// round trip.
pub fn create_solid_jpeg(path: &Path, width: u32, height: u32, color: [u8; 3]) {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)));
    write_jpeg(&img, path, Quality::default()).unwrap();
}

/// Solid-color RGBA PNG, used as a watermark fixture.
pub fn create_solid_png_rgba(path: &Path, width: u32, height: u32, color: [u8; 4]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let img = RgbaImage::from_pixel(width, height, Rgba(color));
    img.save(path).unwrap();
}
