//! # Darkslide
//!
//! The effect engine of a single-board camera: one capture in, one stylized
//! JPEG out, always. Something ends up at the output path even when the
//! capture is corrupt or an effect fails, because a photo booth that shows a
//! blank screen is worse than one that shows the unfiltered picture.
//!
//! # Architecture: Load → Transform → Encode
//!
//! ```text
//! 1. Load       file    →  RgbImage     (decode, downscale to the working box)
//! 2. Transform  RgbImage →  RgbImage    (one effect, same dimensions)
//! 3. Encode     RgbImage →  file        (JPEG at the effect's fixed quality)
//! ```
//!
//! Any stage error turns into a verbatim copy of the capture. Effects are pure
//! functions over an owned buffer plus an injected RNG, so they can be tested
//! without touching the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Decoding, resizing, JPEG encoding, and the pixel math shared by effects |
//! | [`effects`] | The effect catalog and the eleven transforms |
//! | [`pipeline`] | `apply_filter`: the stages plus the copy-on-failure wrapper |
//! | [`disk`] | Free-space pre-flight check and buffer release hook |
//! | [`naming`] | Capture and output file names |
//! | [`config`] | `darkslide.toml` loading, validation, and merging over defaults |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Fixed Working Resolution
//!
//! Every capture is shrunk to fit 800×600 (configurable) before any effect
//! runs. The camera's full resolution would blow the memory and time budget
//! of a small board, and the result is shown on a small screen anyway.
//!
//! ## Fallback Is Not an Error
//!
//! [`pipeline::apply_filter`] returns `Ok` whenever a file was written, and
//! tells the caller which of applied, passed-through, or fallback-copied
//! happened through [`pipeline::FilterOutcome`]. Only a failed copy is an
//! `Err`.
//!
//! ## Injected Randomness
//!
//! Grain, glitch, and both matrix looks take `&mut impl Rng`. Production uses
//! a fresh thread RNG per call; tests pass a seeded `StdRng`.

pub mod config;
pub mod disk;
pub mod effects;
pub mod imaging;
pub mod logging;
pub mod naming;
pub mod output;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod test_helpers;
