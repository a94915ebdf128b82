//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Apply
//!
//! ```text
//! Sepia → fotos/foto_16102026_142501_sepia.jpg
//!     Applied: 800x600
//! ```
//!
//! ```text
//! Digital Glitch → fotos/foto_16102026_142501_glitch.jpg
//!     Fallback: original copied (decode failed)
//!     Reason: Decode failed: ...
//! ```
//!
//! ## Effects
//!
//! ```text
//! 001 normal          Normal (no suffix, copy)
//! 002 grain           Film Grain (_grain, q85)
//! ```
//!
//! ## Check disk
//!
//! ```text
//! /home/fotos: ok (more than 50 MiB free)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::effects::Effect;
use crate::pipeline::FilterOutcome;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

// ============================================================================
// apply
// ============================================================================

/// Format the result of one filter call.
pub fn format_outcome(outcome: &FilterOutcome) -> Vec<String> {
    let output = outcome.output().display();
    match outcome {
        FilterOutcome::Applied {
            effect,
            width,
            height,
            ..
        } => vec![
            format!("{} → {}", effect.label(), output),
            format!("{}Applied: {}x{}", indent(1), width, height),
        ],
        FilterOutcome::PassedThrough { bytes, .. } => vec![
            format!("{} → {}", Effect::Normal.label(), output),
            format!("{}Copied: {} bytes", indent(1), bytes),
        ],
        FilterOutcome::FallbackCopied {
            effect,
            stage,
            reason,
            ..
        } => vec![
            format!("{} → {}", effect.label(), output),
            format!("{}Fallback: original copied ({} failed)", indent(1), stage),
            format!("{}Reason: {}", indent(1), reason),
        ],
    }
}

pub fn print_outcome(outcome: &FilterOutcome) {
    for line in format_outcome(outcome) {
        println!("{}", line);
    }
}

// ============================================================================
// effects
// ============================================================================

fn catalog_detail(effect: Effect) -> String {
    match effect.suffix() {
        Some(suffix) => format!("_{}, q{}", suffix, effect.quality().value()),
        None => "no suffix, copy".to_string(),
    }
}

/// Format the effect catalog in selection order.
pub fn format_catalog() -> Vec<String> {
    Effect::ALL
        .iter()
        .enumerate()
        .map(|(i, effect)| {
            format!(
                "{} {:<15} {} ({})",
                format_index(i + 1),
                effect.id(),
                effect.label(),
                catalog_detail(*effect)
            )
        })
        .collect()
}

pub fn print_catalog() {
    for line in format_catalog() {
        println!("{}", line);
    }
}

// ============================================================================
// check-disk
// ============================================================================

pub fn format_disk_check(path: &Path, min_free_mb: u64, sufficient: bool) -> Vec<String> {
    let verdict = if sufficient {
        format!("ok (more than {} MiB free)", min_free_mb)
    } else {
        format!("low ({} MiB or less free)", min_free_mb)
    };
    vec![format!("{}: {}", path.display(), verdict)]
}

pub fn print_disk_check(path: &Path, min_free_mb: u64, sufficient: bool) {
    for line in format_disk_check(path, min_free_mb, sufficient) {
        println!("{}", line);
    }
}
