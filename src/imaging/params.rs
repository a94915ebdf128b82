//! Value types shared by the loader, the encoder, and the effect catalog.
//!
//! - [`Quality`]: JPEG encoding quality (1–100, default 85). Clamped on construction.
//! - [`MaxDimensions`]: bounding box for the working resolution (default 800×600).
//!   Images are shrunk to fit inside it, never enlarged.

use serde::{Deserialize, Serialize};

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// Largest width and height a normalized buffer may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxDimensions {
    pub width: u32,
    pub height: u32,
}

impl MaxDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether a `width`×`height` image already fits inside the box.
    pub fn contains(self, width: u32, height: u32) -> bool {
        width <= self.width && height <= self.height
    }
}

impl Default for MaxDimensions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_85() {
        assert_eq!(Quality::default().value(), 85);
    }

    #[test]
    fn max_dimensions_default_is_800x600() {
        assert_eq!(MaxDimensions::default(), MaxDimensions::new(800, 600));
    }

    #[test]
    fn max_dimensions_contains_is_inclusive() {
        let max = MaxDimensions::new(800, 600);
        assert!(max.contains(800, 600));
        assert!(max.contains(10, 10));
        assert!(!max.contains(801, 600));
        assert!(!max.contains(800, 601));
    }
}
