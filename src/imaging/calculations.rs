//! Pure calculation functions shared by the loader and the effects.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::MaxDimensions;

/// Calculate the dimensions an image must be shrunk to so it fits `max`.
///
/// Aspect ratio is preserved and images are never enlarged: a source that
/// already fits is returned unchanged. Neither output edge is ever zero.
///
/// # Examples
/// ```
/// # use darkslide::imaging::{MaxDimensions, fit_within};
/// // 4000x3000 landscape into 800x600 → 800x600
/// assert_eq!(fit_within((4000, 3000), MaxDimensions::new(800, 600)), (800, 600));
///
/// // 3000x4000 portrait into 800x600 → 450x600
/// assert_eq!(fit_within((3000, 4000), MaxDimensions::new(800, 600)), (450, 600));
/// ```
pub fn fit_within(source: (u32, u32), max: MaxDimensions) -> (u32, u32) {
    let (src_w, src_h) = source;
    if max.contains(src_w, src_h) {
        return source;
    }

    let scale = (max.width as f64 / src_w as f64).min(max.height as f64 / src_h as f64);
    let w = ((src_w as f64 * scale).round() as u32).clamp(1, max.width.max(1));
    let h = ((src_h as f64 * scale).round() as u32).clamp(1, max.height.max(1));
    (w, h)
}

/// ITU-R 601-2 luma of an RGB sample, in fixed point.
///
/// `L = R * 299/1000 + G * 587/1000 + B * 114/1000`, rounded.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

/// Unweighted channel mean scaled to `0.0..=1.0`.
#[inline]
pub fn mean_brightness(r: u8, g: u8, b: u8) -> f32 {
    (r as f32 + g as f32 + b as f32) / 3.0 / 255.0
}

/// Clamp a signed intermediate into a sample.
#[inline]
pub fn clamp_i32(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

/// Clamp a float intermediate into a sample, truncating the fraction.
#[inline]
pub fn clamp_f32(value: f32) -> u8 {
    if value.is_nan() {
        0
    } else {
        value.clamp(0.0, 255.0) as u8
    }
}

/// Destination-to-source mapping for the spiral warp.
///
/// Built once per image; [`SpiralMapping::source`] is then evaluated for
/// every destination pixel.
#[derive(Debug, Clone, Copy)]
pub struct SpiralMapping {
    width: u32,
    height: u32,
    center_x: i64,
    center_y: i64,
    max_radius: f64,
    intensity: f64,
}

impl SpiralMapping {
    pub fn new(width: u32, height: u32, intensity: f64) -> Self {
        let center_x = (width / 2) as i64;
        let center_y = (height / 2) as i64;
        let max_radius = ((center_x * center_x + center_y * center_y) as f64).sqrt();
        Self {
            width,
            height,
            center_x,
            center_y,
            max_radius,
            intensity,
        }
    }

    /// Source coordinate sampled by destination pixel `(x, y)`.
    ///
    /// The polar angle around the center is rotated by
    /// `distance / max_radius * intensity` radians and the result rounded to
    /// the nearest pixel. Returns `None` when the sample lands outside the
    /// image. The center pixel always maps to itself.
    pub fn source(&self, x: u32, y: u32) -> Option<(u32, u32)> {
        let dx = x as i64 - self.center_x;
        let dy = y as i64 - self.center_y;
        if dx == 0 && dy == 0 {
            return Some((x, y));
        }

        let distance = ((dx * dx + dy * dy) as f64).sqrt();
        let angle = (dy as f64).atan2(dx as f64);
        let rotated = angle + (distance / self.max_radius) * self.intensity;

        let sx = (self.center_x as f64 + distance * rotated.cos()).round() as i64;
        let sy = (self.center_y as f64 + distance * rotated.sin()).round() as i64;

        if (0..self.width as i64).contains(&sx) && (0..self.height as i64).contains(&sy) {
            Some((sx as u32, sy as u32))
        } else {
            None
        }
    }
}
