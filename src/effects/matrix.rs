//! Green "terminal" looks.
//!
//! - [`matrix_simple`]: green-dominant recolor plus ~1% of random pixels
//!   flashed to bright green.
//! - [`matrix_terminal`]: dim green base with tiny glyphs stamped into dark
//!   cells and vertical rain streaks.
//!
//! Both only ever brighten the green channel after building the base, so
//! red and blue always carry the base tint.

use crate::imaging::{clamp_f32, luma};
use image::{GrayImage, Rgb, RgbImage};
use rand::Rng;

/// Pixels flashed by [`matrix_simple`]: one per this many pixels.
const FLASH_DENSITY: u32 = 100;
/// Only pixels with green below this can flash.
const FLASH_GREEN_BELOW: u8 = 200;
const FLASH_COLOR: [u8; 3] = [100, 255, 100];

/// Glyph cell size, rows × columns.
const CELL_H: u32 = 3;
const CELL_W: u32 = 2;
const GLYPH_PROBABILITY: f64 = 0.15;
/// Cells with mean luma at or above this stay blank.
const DARK_THRESHOLD: f64 = 100.0;
/// One rain streak per this many rows.
const RAIN_SPACING: u32 = 25;
const RAIN_MIN_LEN: u32 = 20;
const RAIN_MAX_LEN: u32 = 60;

pub fn matrix_simple<R: Rng + ?Sized>(buffer: &RgbImage, rng: &mut R) -> RgbImage {
    let (width, height) = buffer.dimensions();
    let mut out = RgbImage::from_fn(width, height, |x, y| {
        let g = buffer.get_pixel(x, y)[1];
        Rgb([g / 3, g, g / 6])
    });

    for _ in 0..(width * height / FLASH_DENSITY) {
        let x = rng.gen_range(0..width);
        let y = rng.gen_range(0..height);
        let px = out.get_pixel_mut(x, y);
        if px[1] < FLASH_GREEN_BELOW {
            *px = Rgb(FLASH_COLOR);
        }
    }
    out
}

/// A tiny mark stamped into one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Glyph {
    Dot,
    VerticalTick,
    HorizontalTick,
    Diagonal,
    AntiDiagonal,
}

impl Glyph {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.gen_range(0..4) {
            0 => Glyph::Dot,
            1 => Glyph::VerticalTick,
            2 => Glyph::HorizontalTick,
            _ if rng.gen_bool(0.5) => Glyph::Diagonal,
            _ => Glyph::AntiDiagonal,
        }
    }

    /// Pixels lit in the cell whose top-left corner is `(x, y)`, clipped to the image.
    fn pixels(self, x: u32, y: u32, width: u32, height: u32) -> Vec<(u32, u32)> {
        let y_end = (y + CELL_H).min(height);
        let x_end = (x + CELL_W).min(width);
        let mid_x = x + CELL_W / 2;
        let mid_y = y + CELL_H / 2;
        let steps = CELL_H.min(CELL_W);

        let candidates: Vec<(u32, u32)> = match self {
            Glyph::Dot => vec![(mid_x, mid_y)],
            Glyph::VerticalTick => (y..y_end).map(|row| (mid_x, row)).collect(),
            Glyph::HorizontalTick => (x..x_end).map(|col| (col, mid_y)).collect(),
            Glyph::Diagonal => (0..steps).map(|i| (x + i, y + i)).collect(),
            Glyph::AntiDiagonal => (0..steps).map(|i| (x + CELL_W - 1 - i, y + i)).collect(),
        };
        candidates
            .into_iter()
            .filter(|&(px, py)| px < width && py < height)
            .collect()
    }
}

fn mean_cell_luma(gray: &GrayImage, x: u32, y: u32) -> f64 {
    let y_end = (y + CELL_H).min(gray.height());
    let x_end = (x + CELL_W).min(gray.width());
    let mut sum = 0u32;
    let mut count = 0u32;
    for row in y..y_end {
        for col in x..x_end {
            sum += gray.get_pixel(col, row)[0] as u32;
            count += 1;
        }
    }
    sum as f64 / count as f64
}

/// Length of one rain streak on an image `height` rows tall.
fn streak_length<R: Rng + ?Sized>(height: u32, rng: &mut R) -> u32 {
    let upper = RAIN_MAX_LEN.min(height * 2 / 3);
    if upper > RAIN_MIN_LEN {
        rng.gen_range(RAIN_MIN_LEN..upper)
    } else {
        upper.max(1)
    }
}

pub fn matrix_terminal<R: Rng + ?Sized>(buffer: &RgbImage, rng: &mut R) -> RgbImage {
    let (width, height) = buffer.dimensions();
    let gray = GrayImage::from_fn(width, height, |x, y| {
        let [r, g, b] = buffer.get_pixel(x, y).0;
        image::Luma([luma(r, g, b)])
    });
    let mut out = RgbImage::from_fn(width, height, |x, y| {
        let l = gray.get_pixel(x, y)[0];
        Rgb([l / 8, clamp_f32(l as f32 * 0.8), l / 16])
    });

    let mut glyphs = 0usize;
    for y in (0..height).step_by(CELL_H as usize) {
        for x in (0..width).step_by(CELL_W as usize) {
            if rng.gen_bool(GLYPH_PROBABILITY) && mean_cell_luma(&gray, x, y) < DARK_THRESHOLD {
                for (px, py) in Glyph::random(rng).pixels(x, y, width, height) {
                    out.get_pixel_mut(px, py)[1] = 255;
                }
                glyphs += 1;
            }
        }
    }

    let streaks = height / RAIN_SPACING;
    for _ in 0..streaks {
        let x = rng.gen_range(0..width);
        let length = streak_length(height, rng);
        let start = rng.gen_range(0..height.saturating_sub(length).max(1));
        for y in start..(start + length).min(height) {
            out.get_pixel_mut(x, y)[1] = 255;
        }
    }

    tracing::trace!(glyphs, streaks, "terminal overlay");
    out
}
