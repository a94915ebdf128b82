//! Pastel palette grading.
//!
//! Soft contrast, lifted brightness, a warm per-channel gain, a 25% wash of
//! pale pink, and finally a 10% pull toward grey.

use crate::imaging::{clamp_f32, luma};
use image::{Rgb, RgbImage};

const CONTRAST: f32 = 0.85;
const BRIGHTNESS: f32 = 1.15;
const CHANNEL_GAIN: [f32; 3] = [1.08, 1.05, 0.95];
const PINK: [f32; 3] = [1.0, 0.92, 0.92];
const PINK_STRENGTH: f32 = 0.25;
/// Fraction of the original chroma kept after the final desaturation.
const SATURATION: f32 = 0.9;

/// Grade a single sample in `0..=1` space, before desaturation.
fn grade_channel(value: u8, channel: usize) -> f32 {
    let v = value as f32 / 255.0;
    let contrasted = v * CONTRAST + (1.0 - CONTRAST) * 0.5;
    let bright = (contrasted * BRIGHTNESS).clamp(0.0, 1.0);
    let warm = (bright * CHANNEL_GAIN[channel]).clamp(0.0, 1.0);
    warm * (1.0 - PINK_STRENGTH) + PINK[channel] * PINK_STRENGTH
}

pub fn pastel(buffer: &RgbImage) -> RgbImage {
    let mut out = buffer.clone();
    for px in out.pixels_mut() {
        let graded: [u8; 3] = std::array::from_fn(|c| clamp_f32(grade_channel(px[c], c) * 255.0));
        let grey = luma(graded[0], graded[1], graded[2]) as f32;
        *px = Rgb(graded.map(|v| clamp_f32(grey + SATURATION * (v as f32 - grey))));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{assert_all_samples, gradient_buffer, solid_buffer};

    #[test]
    fn black_is_lifted_to_pink_grey() {
        let out = pastel(&solid_buffer(2, 2, [0, 0, 0]));
        let [r, g, b] = out.get_pixel(0, 0).0;
        assert!(r > 70 && g > 70 && b > 70, "got {r},{g},{b}");
        assert!(r > g && g >= b);
    }

    #[test]
    fn white_loses_blue() {
        let out = pastel(&solid_buffer(2, 2, [255, 255, 255]));
        let [r, g, b] = out.get_pixel(0, 0).0;
        assert!(r >= 250);
        assert!(b < g && g < r);
    }

    #[test]
    fn greys_turn_warm() {
        for v in (0..=255).step_by(15) {
            let out = pastel(&solid_buffer(1, 1, [v as u8; 3]));
            let [r, g, b] = out.get_pixel(0, 0).0;
            assert!(r >= g && g >= b, "grey {v} → {r},{g},{b}");
        }
    }

    #[test]
    fn output_never_reaches_black() {
        let out = pastel(&gradient_buffer(32, 32));
        assert_all_samples(&out, |px| px[0] > 50 && px[1] > 50 && px[2] > 50);
    }

    #[test]
    fn desaturates_pure_red() {
        let out = pastel(&solid_buffer(1, 1, [255, 0, 0]));
        let [r, g, b] = out.get_pixel(0, 0).0;
        // Still red-dominant, but the pink wash and grey pull fill in G and B.
        assert!(r > g && r > b);
        assert!(g > 50 && b > 50);
    }
}
