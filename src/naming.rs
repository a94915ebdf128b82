//! File naming for captures and their filtered copies.
//!
//! A capture is named `{prefix}_{DDMMYYYY_HHMMSS}.{ext}`; each filtered copy
//! keeps that base name and appends the effect suffix:
//!
//! - `foto_16102026_142501.jpg` → capture
//! - `foto_16102026_142501_grain.jpg` → film grain
//! - `foto_16102026_142501_terminal.jpg` → matrix terminal
//!
//! Pass-through output has no suffix.

use crate::effects::Effect;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// `strftime` pattern for the timestamp part of a capture name.
pub const TIMESTAMP_FORMAT: &str = "%d%m%Y_%H%M%S";

/// Extension of every file the encoder writes.
pub const OUTPUT_EXTENSION: &str = "jpg";

/// Timestamped capture file name.
pub fn capture_filename(prefix: &str, ext: &str, at: NaiveDateTime) -> String {
    format!("{prefix}_{}.{ext}", at.format(TIMESTAMP_FORMAT))
}

/// [`capture_filename`] stamped with the local time.
pub fn capture_filename_now(prefix: &str, ext: &str) -> String {
    capture_filename(prefix, ext, chrono::Local::now().naive_local())
}

/// Output file name for `effect` applied to a capture with base name `base`.
pub fn effect_output_name(base: &str, effect: Effect) -> String {
    match effect.suffix() {
        Some(suffix) => format!("{base}_{suffix}.{OUTPUT_EXTENSION}"),
        None => format!("{base}.{OUTPUT_EXTENSION}"),
    }
}

/// Output path next to `input` for `effect`.
///
/// Pass-through of a file that is already a `.jpg` would name the input
/// itself, so it gets a `_normal` suffix instead.
pub fn effect_output_path(input: &Path, effect: Effect) -> PathBuf {
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    let base = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let candidate = dir.join(effect_output_name(&base, effect));
    if candidate == input {
        dir.join(format!("{base}_{}.{OUTPUT_EXTENSION}", effect.id()))
    } else {
        candidate
    }
}
