//! Monochrome tints driven by ITU-R 601 luma: red, blue and sepia.

use crate::imaging::{clamp_f32, luma};
use image::{Rgb, RgbImage};

/// Channel gains for sepia, applied to luma.
const SEPIA: [f32; 3] = [1.0, 0.8, 0.5];

fn map_luma(buffer: &RgbImage, f: impl Fn(u8) -> [u8; 3]) -> RgbImage {
    RgbImage::from_fn(buffer.width(), buffer.height(), |x, y| {
        let [r, g, b] = buffer.get_pixel(x, y).0;
        Rgb(f(luma(r, g, b)))
    })
}

/// Luma in the red channel, black elsewhere.
pub fn red(buffer: &RgbImage) -> RgbImage {
    map_luma(buffer, |l| [l, 0, 0])
}

/// Luma in the blue channel, black elsewhere.
pub fn blue(buffer: &RgbImage) -> RgbImage {
    map_luma(buffer, |l| [0, 0, l])
}

/// Warm brown monochrome. Always `B <= G <= R`.
pub fn sepia(buffer: &RgbImage) -> RgbImage {
    map_luma(buffer, |l| {
        let l = l as f32;
        [
            clamp_f32(l * SEPIA[0]),
            clamp_f32(l * SEPIA[1]),
            clamp_f32(l * SEPIA[2]),
        ]
    })
}
