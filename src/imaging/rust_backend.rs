//! Pure Rust image backend over the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP, BMP, GIF) | `image::ImageReader` with content sniffing |
//! | Normalize to RGB8 | `DynamicImage::to_rgb8` (alpha dropped, palette/grey expanded) |
//! | Downscale | `image::imageops::resize` with `Lanczos3` filter |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder::new_with_quality` |

use super::backend::{BackendError, ImageBackend};
use super::calculations::fit_within;
use super::params::{MaxDimensions, Quality};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ImageReader, RgbImage};
use std::io::Write;
use std::path::Path;

/// Output extensions the encoder writes. Everything is JPEG.
const OUTPUT_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// Whether `path` names a file the encoder can produce.
pub fn is_supported_output(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| OUTPUT_EXTENSIONS.iter().any(|ok| e.eq_ignore_ascii_case(ok)))
}

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode an image from disk into an owned RGB8 buffer.
///
/// The format is sniffed from the file contents, so a capture saved with the
/// wrong extension still decodes. The reader is dropped before returning.
fn decode_rgb(path: &Path) -> Result<RgbImage, BackendError> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let decoded = reader.decode().map_err(|e| BackendError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(decoded.to_rgb8())
}

impl ImageBackend for RustBackend {
    fn load(&self, path: &Path, max: MaxDimensions) -> Result<RgbImage, BackendError> {
        let rgb = decode_rgb(path)?;
        let (width, height) = fit_within(rgb.dimensions(), max);
        if (width, height) == rgb.dimensions() {
            return Ok(rgb);
        }
        tracing::debug!(
            from = ?rgb.dimensions(),
            to = ?(width, height),
            "downscaling with Lanczos3"
        );
        Ok(image::imageops::resize(
            &rgb,
            width,
            height,
            FilterType::Lanczos3,
        ))
    }

    fn encode(
        &self,
        buffer: &RgbImage,
        path: &Path,
        quality: Quality,
    ) -> Result<(), BackendError> {
        if !is_supported_output(path) {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_lowercase();
            return Err(BackendError::UnsupportedFormat(ext));
        }

        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        let encoder = JpegEncoder::new_with_quality(&mut writer, quality.value());
        buffer
            .write_with_encoder(encoder)
            .map_err(|e| BackendError::Encode {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        writer.flush()?;
        Ok(())
    }
}
