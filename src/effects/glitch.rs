//! Digital glitch: a red channel offset plus displaced horizontal bands.
//!
//! All shifts are circular, so pixels pushed off one edge reappear on the
//! other and nothing is lost or invented.

use image::RgbImage;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Upper bound on displaced bands, whatever `lines` asks for.
pub const MAX_GLITCH_LINES: u32 = 15;

/// Band heights are drawn from this range.
const BAND_HEIGHT: std::ops::Range<u32> = 2..8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlitchParams {
    /// Largest horizontal displacement in pixels, either direction.
    pub shift: u32,
    /// Requested band count, capped at [`MAX_GLITCH_LINES`].
    pub lines: u32,
}

impl GlitchParams {
    pub fn effective_lines(self) -> u32 {
        self.lines.min(MAX_GLITCH_LINES)
    }
}

impl Default for GlitchParams {
    fn default() -> Self {
        Self {
            shift: 15,
            lines: 20,
        }
    }
}

pub fn glitch<R: Rng + ?Sized>(buffer: &RgbImage, params: GlitchParams, rng: &mut R) -> RgbImage {
    let (width, height) = buffer.dimensions();
    let shift = params.shift as i64;
    let mut out = buffer.clone();

    let red_offset = rng.gen_range(-shift..=shift);
    roll_red_channel(&mut out, red_offset);

    for _ in 0..params.effective_lines() {
        let y = rng.gen_range(0..height.saturating_sub(10).max(1));
        let band = rng.gen_range(BAND_HEIGHT);
        let offset = rng.gen_range(-shift..=shift);
        let y_end = (y + band).min(height);
        for row in y..y_end {
            roll_row(&mut out, row, offset);
        }
    }

    debug_assert_eq!(out.dimensions(), (width, height));
    out
}

/// Rotation amount for a signed offset on a row of `width` pixels.
/// Positive offsets move content to the right.
fn normalize(offset: i64, width: u32) -> usize {
    offset.rem_euclid(width as i64) as usize
}

fn roll_red_channel(img: &mut RgbImage, offset: i64) {
    let width = img.width();
    let k = normalize(offset, width);
    if k == 0 {
        return;
    }
    let mut reds = Vec::with_capacity(width as usize);
    for row in img.chunks_exact_mut(width as usize * 3) {
        reds.clear();
        reds.extend(row.chunks_exact(3).map(|px| px[0]));
        reds.rotate_right(k);
        for (px, red) in row.chunks_exact_mut(3).zip(&reds) {
            px[0] = *red;
        }
    }
}

fn roll_row(img: &mut RgbImage, y: u32, offset: i64) {
    let width = img.width();
    let k = normalize(offset, width);
    let stride = width as usize * 3;
    let start = y as usize * stride;
    let raw: &mut [u8] = img;
    raw[start..start + stride].rotate_right(k * 3);
}
