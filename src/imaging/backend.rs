//! Image I/O backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations that touch files:
//! `load` (decode + normalize) and `encode`. Everything between them is pure
//! pixel work on an owned [`RgbImage`], so the effects never see a file.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image` crate.

use super::params::{MaxDimensions, Quality};
use image::RgbImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("Failed to encode {path}: {message}")]
    Encode { path: PathBuf, message: String },
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

/// Trait for image I/O backends.
///
/// `load` must return a private 3-channel copy no larger than `max`, with no
/// file handle kept open. `encode` must either write a complete file at
/// `path` or return an error.
pub trait ImageBackend {
    /// Decode `path`, drop alpha/palette/grey modes to RGB8, and shrink to fit `max`.
    fn load(&self, path: &Path, max: MaxDimensions) -> Result<RgbImage, BackendError>;

    /// Compress `buffer` to `path` at `quality`.
    fn encode(&self, buffer: &RgbImage, path: &Path, quality: Quality)
    -> Result<(), BackendError>;
}
