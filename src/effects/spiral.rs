//! Spiral warp around the image center.
//!
//! Inverse mapping: every destination pixel looks up its source through
//! [`SpiralMapping`], so there are no holes. Samples that fall outside the
//! frame become black.

use super::TransformError;
use crate::imaging::SpiralMapping;
use image::RgbImage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpiralParams {
    /// Rotation in radians at the corners; 2.0 is gentle, 5.0 is extreme.
    pub intensity: f64,
}

impl SpiralParams {
    pub fn validate(&self) -> Result<(), TransformError> {
        if !self.intensity.is_finite() {
            return Err(TransformError::InvalidParameter {
                name: "spiral.intensity",
                reason: format!("must be finite, got {}", self.intensity),
            });
        }
        Ok(())
    }
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self { intensity: 5.0 }
    }
}

pub fn spiral(buffer: &RgbImage, params: SpiralParams) -> RgbImage {
    let (width, height) = buffer.dimensions();
    let mapping = SpiralMapping::new(width, height, params.intensity);
    let mut out = RgbImage::new(width, height);
    for (x, y, px) in out.enumerate_pixels_mut() {
        if let Some((sx, sy)) = mapping.source(x, y) {
            *px = *buffer.get_pixel(sx, sy);
        }
    }
    out
}
