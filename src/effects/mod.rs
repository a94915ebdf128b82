//! The effect catalog.
//!
//! Every effect is a pure function from a normalized [`RgbImage`] to a new
//! buffer of the same dimensions. Randomized effects draw from a caller
//! supplied [`Rng`], so production uses a fresh thread RNG per call while
//! tests pass a seeded one.
//!
//! | Id | Module | Quality | Random |
//! |---|---|---|---|
//! | `normal` | (file copy, no buffer) | - | no |
//! | `grain` | [`grain`] | 85 | yes |
//! | `glitch` | [`glitch`] | 85 | yes |
//! | `red` / `blue` / `sepia` | [`tint`] | 85 | no |
//! | `spiral` | [`spiral`] | 85 | no |
//! | `pastel` | [`pastel`] | 90 | no |
//! | `matrix-simple` | [`matrix`] | 90 | yes |
//! | `matrix-terminal` | [`matrix`] | 95 | yes |
//! | `negative` | [`negative`] | 85 | no |
//!
//! The terminal overlay uses the highest quality because its 1-pixel glyphs
//! are the first thing JPEG quantization destroys.

pub mod glitch;
pub mod grain;
pub mod matrix;
pub mod negative;
pub mod pastel;
pub mod spiral;
pub mod tint;

use crate::imaging::Quality;
use image::RgbImage;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use glitch::{GlitchParams, MAX_GLITCH_LINES};
pub use grain::GrainParams;
pub use spiral::SpiralParams;

#[derive(Error, Debug, PartialEq)]
pub enum TransformError {
    #[error("Cannot transform an empty {width}x{height} buffer")]
    EmptyBuffer { width: u32, height: u32 },
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("Effect changed dimensions from {expected:?} to {actual:?}")]
    ShapeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

/// One selectable entry of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Effect {
    /// Byte-for-byte copy of the capture.
    Normal,
    Grain,
    Glitch,
    Red,
    Blue,
    Sepia,
    Spiral,
    Pastel,
    MatrixSimple,
    MatrixTerminal,
    Negative,
}

impl Effect {
    /// The catalog in menu order.
    pub const ALL: [Effect; 11] = [
        Effect::Normal,
        Effect::Grain,
        Effect::Glitch,
        Effect::Red,
        Effect::Blue,
        Effect::Sepia,
        Effect::Spiral,
        Effect::Pastel,
        Effect::MatrixSimple,
        Effect::MatrixTerminal,
        Effect::Negative,
    ];

    /// Stable identifier used on the command line and in config files.
    pub fn id(self) -> &'static str {
        match self {
            Effect::Normal => "normal",
            Effect::Grain => "grain",
            Effect::Glitch => "glitch",
            Effect::Red => "red",
            Effect::Blue => "blue",
            Effect::Sepia => "sepia",
            Effect::Spiral => "spiral",
            Effect::Pastel => "pastel",
            Effect::MatrixSimple => "matrix-simple",
            Effect::MatrixTerminal => "matrix-terminal",
            Effect::Negative => "negative",
        }
    }

    /// Human-readable name for menus.
    pub fn label(self) -> &'static str {
        match self {
            Effect::Normal => "Normal",
            Effect::Grain => "Film Grain",
            Effect::Glitch => "Digital Glitch",
            Effect::Red => "Red Contrast",
            Effect::Blue => "Blue Contrast",
            Effect::Sepia => "Sepia",
            Effect::Spiral => "Spiral",
            Effect::Pastel => "Pastel",
            Effect::MatrixSimple => "Matrix",
            Effect::MatrixTerminal => "Matrix Terminal",
            Effect::Negative => "Negative",
        }
    }

    /// Suffix appended to the capture's base name, `None` for pass-through.
    pub fn suffix(self) -> Option<&'static str> {
        match self {
            Effect::Normal => None,
            Effect::MatrixSimple => Some("matrix"),
            Effect::MatrixTerminal => Some("terminal"),
            other => Some(other.id()),
        }
    }

    /// Fixed JPEG quality for this effect.
    pub fn quality(self) -> Quality {
        match self {
            Effect::Pastel | Effect::MatrixSimple => Quality::new(90),
            Effect::MatrixTerminal => Quality::new(95),
            _ => Quality::new(85),
        }
    }

    /// Whether this effect skips the buffer pipeline entirely.
    pub fn is_pass_through(self) -> bool {
        self == Effect::Normal
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Effect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Effect::ALL
            .into_iter()
            .find(|e| e.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let ids: Vec<&str> = Effect::ALL.iter().map(|e| e.id()).collect();
                format!("unknown effect '{s}' (expected one of: {})", ids.join(", "))
            })
    }
}

/// Tunable parameters for the effects that take any.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EffectParams {
    pub grain: GrainParams,
    pub glitch: GlitchParams,
    pub spiral: SpiralParams,
}

impl EffectParams {
    /// Check only the parameters `effect` reads.
    pub fn validate_for(&self, effect: Effect) -> Result<(), TransformError> {
        match effect {
            Effect::Spiral => self.spiral.validate(),
            _ => Ok(()),
        }
    }
}

/// Run `effect` over `buffer`.
///
/// Fails on an empty buffer, on invalid parameters for `effect`, or if the result does
/// not have the input's dimensions. [`Effect::Normal`] returns a copy; callers
/// that want the file-level pass-through handle it before decoding.
pub fn apply<R: Rng + ?Sized>(
    effect: Effect,
    buffer: &RgbImage,
    params: &EffectParams,
    rng: &mut R,
) -> Result<RgbImage, TransformError> {
    let (width, height) = buffer.dimensions();
    if width == 0 || height == 0 {
        return Err(TransformError::EmptyBuffer { width, height });
    }
    params.validate_for(effect)?;

    let out = match effect {
        Effect::Normal => buffer.clone(),
        Effect::Grain => grain::grain(buffer, params.grain, rng),
        Effect::Glitch => glitch::glitch(buffer, params.glitch, rng),
        Effect::Red => tint::red(buffer),
        Effect::Blue => tint::blue(buffer),
        Effect::Sepia => tint::sepia(buffer),
        Effect::Spiral => spiral::spiral(buffer, params.spiral),
        Effect::Pastel => pastel::pastel(buffer),
        Effect::MatrixSimple => matrix::matrix_simple(buffer, rng),
        Effect::MatrixTerminal => matrix::matrix_terminal(buffer, rng),
        Effect::Negative => negative::negative(buffer),
    };

    if out.dimensions() != (width, height) {
        return Err(TransformError::ShapeMismatch {
            expected: (width, height),
            actual: out.dimensions(),
        });
    }
    Ok(out)
}
