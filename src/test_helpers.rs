//! Shared test utilities for the darkslide test suite.
//!
//! Provides synthetic buffers and on-disk fixture writers so effect and
//! pipeline tests never depend on checked-in photos.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! let input = tmp.path().join("capture.jpg");
//! write_jpeg(&input, 320, 240);
//!
//! let buffer = gradient_buffer(32, 24);
//! assert_all_samples(&buffer, |px| px[0] <= 255);
//! ```

use image::{ImageEncoder, Rgb, RgbImage, RgbaImage};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;

// =========================================================================
// Buffers
// =========================================================================

/// Horizontal red ramp, vertical green ramp, constant blue.
pub fn gradient_buffer(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / (width - 1).max(1)) as u8,
            (y * 255 / (height - 1).max(1)) as u8,
            128,
        ])
    })
}

/// Every pixel set to `color`.
pub fn solid_buffer(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(color))
}

/// Deterministic RNG for randomized effects.
pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed)
}

/// Assert `check` holds for every pixel. Panics with the first offender.
pub fn assert_all_samples(buffer: &RgbImage, check: impl Fn(&Rgb<u8>) -> bool) {
    for (x, y, px) in buffer.enumerate_pixels() {
        assert!(check(px), "pixel ({x}, {y}) = {:?} failed check", px.0);
    }
}

// =========================================================================
// Fixture files
// =========================================================================

/// Write a gradient JPEG of the given size.
pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    let img = gradient_buffer(width, height);
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write a half-transparent RGBA PNG of the given size.
pub fn write_png_rgba(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 200, 128])
    });
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}
