//! Photographic negative.

use image::RgbImage;

/// `255 - v` on every sample. Its own inverse.
pub fn negative(buffer: &RgbImage) -> RgbImage {
    let mut out = buffer.clone();
    image::imageops::invert(&mut out);
    out
}
