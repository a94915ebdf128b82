//! Film grain.
//!
//! One uniform integer noise value per pixel, added identically to all three
//! channels. The noise is scaled by `0.5 + 0.5 * brightness`, where
//! brightness is the unweighted channel mean in `0..=1`.

use crate::imaging::{clamp_i32, mean_brightness};
use image::RgbImage;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GrainParams {
    /// Noise is drawn from `-intensity..=intensity`. 10–30 looks like film.
    pub intensity: u8,
}

impl Default for GrainParams {
    fn default() -> Self {
        Self { intensity: 20 }
    }
}

pub fn grain<R: Rng + ?Sized>(buffer: &RgbImage, params: GrainParams, rng: &mut R) -> RgbImage {
    let intensity = params.intensity as i32;
    let mut out = buffer.clone();
    for px in out.pixels_mut() {
        let [r, g, b] = px.0;
        let noise = rng.gen_range(-intensity..=intensity);
        let scale = 0.5 + 0.5 * mean_brightness(r, g, b);
        let scaled = (noise as f32 * scale) as i32;
        px.0 = [
            clamp_i32(r as i32 + scaled),
            clamp_i32(g as i32 + scaled),
            clamp_i32(b as i32 + scaled),
        ];
    }
    out
}
