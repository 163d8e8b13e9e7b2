//! Raster image operations — pure Rust via the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Resize** | `imageops::resize` with `Lanczos3` |
//! | **Watermark** | `imageops::overlay` (alpha-over, bottom-left anchor) |
//! | **Encode → JPEG** | `image::codecs::jpeg::JpegEncoder` |
//!
//! The module is split into:
//! - **Calculations**: pure dimension math (unit testable without pixels)
//! - **Parameters**: operation descriptors ([`Quality`])
//! - **Operations**: the pixel work itself

mod calculations;
pub mod operations;
mod params;

pub use calculations::{mark_anchor, scaled_height};
pub use operations::{
    ImagingError, composite_watermark, load_image, photo_dimensions, resize_to_width, write_jpeg,
};
pub use params::Quality;
