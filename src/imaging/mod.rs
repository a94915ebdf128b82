//! Image I/O and pixel math.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Load + normalize** | `image::ImageReader` → `to_rgb8` → Lanczos3 downscale |
//! | **Encode** | `image::codecs::jpeg::JpegEncoder` |
//! | **Pixel math** | pure functions in `calculations` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension and pixel math (unit testable)
//! - **Parameters**: [`Quality`] and [`MaxDimensions`]
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::{
    SpiralMapping, clamp_f32, clamp_i32, fit_within, luma, mean_brightness,
};
pub use params::{MaxDimensions, Quality};
pub use rust_backend::RustBackend;
