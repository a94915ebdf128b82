//! The filter pipeline and its resilience wrapper.
//!
//! One call takes one capture through three stages and always leaves a file
//! at the output path:
//!
//! ```text
//!   input ──► load ──► transform ──► encode ──► output      (Applied)
//!     │         ╲          │           ╱
//!     │          ╰─────────┴──────────╯ any stage error
//!     │                    │
//!     └──────── verbatim byte copy ──────────► output      (FallbackCopied)
//! ```
//!
//! [`Effect::Normal`] skips the stages entirely and copies the file
//! ([`FilterOutcome::PassedThrough`]).
//!
//! Stage errors never reach the caller. They are logged and reported through
//! the returned [`FilterOutcome`], so the orchestrator can still tell an
//! applied effect from a silent fallback if it cares. The only `Err` is
//! [`PipelineError::Copy`]: the fallback copy itself failed and no output
//! file could be produced at all.
//!
//! The encoder writes to a hidden sibling of the output path, which is renamed
//! into place only once encoding succeeded. A failed encode therefore never
//! leaves a truncated file behind, even when the output path is the capture.

use crate::config::EngineConfig;
use crate::disk;
use crate::effects::{self, Effect, EffectParams, TransformError};
use crate::imaging::{BackendError, ImageBackend, MaxDimensions, RustBackend};
use rand::Rng;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Could not copy {} to {}: {source}", input.display(), output.display())]
    Copy {
        input: PathBuf,
        output: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A failure inside load, transform, or encode. Always answered with a copy.
#[derive(Error, Debug)]
pub enum StageError {
    #[error("Decode failed: {0}")]
    Decode(#[source] BackendError),
    #[error("Transform failed: {0}")]
    Transform(#[from] TransformError),
    #[error("Encode failed: {0}")]
    Encode(#[source] BackendError),
}

impl StageError {
    pub fn stage(&self) -> Stage {
        match self {
            StageError::Decode(_) => Stage::Decode,
            StageError::Transform(_) => Stage::Transform,
            StageError::Encode(_) => Stage::Encode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Decode,
    Transform,
    Encode,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Decode => "decode",
            Stage::Transform => "transform",
            Stage::Encode => "encode",
        })
    }
}

/// What actually ended up at the output path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FilterOutcome {
    /// The effect ran and the encoded result was written.
    Applied {
        effect: Effect,
        output: PathBuf,
        width: u32,
        height: u32,
    },
    /// Pass-through requested; the capture was copied unchanged.
    PassedThrough { output: PathBuf, bytes: u64 },
    /// A stage failed; the capture was copied unchanged instead.
    FallbackCopied {
        effect: Effect,
        output: PathBuf,
        stage: Stage,
        reason: String,
    },
}

impl FilterOutcome {
    pub fn output(&self) -> &Path {
        match self {
            FilterOutcome::Applied { output, .. }
            | FilterOutcome::PassedThrough { output, .. }
            | FilterOutcome::FallbackCopied { output, .. } => output,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, FilterOutcome::Applied { .. })
    }
}

/// Per-call settings for [`apply_filter`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterOptions {
    pub max_dimensions: MaxDimensions,
    pub params: EffectParams,
}

impl FilterOptions {
    /// Build options from the engine config.
    pub fn from_engine_config(config: &EngineConfig) -> Self {
        Self {
            max_dimensions: config.max_dimensions(),
            params: config.effect_params(),
        }
    }
}

/// Apply `effect` to `input`, writing the result to `output`.
///
/// Uses the production [`RustBackend`] and a fresh thread RNG, so randomized
/// effects differ from call to call. The output directory must exist.
pub fn apply_filter(
    effect: Effect,
    input: &Path,
    output: &Path,
    options: &FilterOptions,
) -> Result<FilterOutcome, PipelineError> {
    let backend = RustBackend::new();
    apply_filter_with(
        &backend,
        &mut rand::thread_rng(),
        effect,
        input,
        output,
        options,
    )
}

/// [`apply_filter`] with an explicit backend and RNG (allows testing with mock).
pub fn apply_filter_with<B, R>(
    backend: &B,
    rng: &mut R,
    effect: Effect,
    input: &Path,
    output: &Path,
    options: &FilterOptions,
) -> Result<FilterOutcome, PipelineError>
where
    B: ImageBackend + ?Sized,
    R: Rng + ?Sized,
{
    let span = tracing::debug_span!("apply_filter", %effect, input = %input.display());
    let _guard = span.enter();

    if effect.is_pass_through() {
        let bytes = copy_verbatim(input, output)?;
        tracing::info!(output = %output.display(), bytes, "passed through");
        return Ok(FilterOutcome::PassedThrough {
            output: output.to_path_buf(),
            bytes,
        });
    }

    let outcome = match run_stages(backend, rng, effect, input, output, options) {
        Ok((width, height)) => {
            tracing::info!(output = %output.display(), width, height, "effect applied");
            FilterOutcome::Applied {
                effect,
                output: output.to_path_buf(),
                width,
                height,
            }
        }
        Err(err) => {
            let stage = err.stage();
            tracing::warn!(%stage, error = %err, "effect failed, copying original");
            copy_verbatim(input, output)?;
            FilterOutcome::FallbackCopied {
                effect,
                output: output.to_path_buf(),
                stage,
                reason: err.to_string(),
            }
        }
    };

    disk::release_hint();
    Ok(outcome)
}

/// Load → transform → encode. Returns the encoded dimensions.
fn run_stages<B, R>(
    backend: &B,
    rng: &mut R,
    effect: Effect,
    input: &Path,
    output: &Path,
    options: &FilterOptions,
) -> Result<(u32, u32), StageError>
where
    B: ImageBackend + ?Sized,
    R: Rng + ?Sized,
{
    let buffer = backend
        .load(input, options.max_dimensions)
        .map_err(StageError::Decode)?;
    tracing::debug!(dimensions = ?buffer.dimensions(), "loaded");

    let transformed = effects::apply(effect, &buffer, &options.params, rng)?;
    drop(buffer);

    let staging = staging_path(output);
    let written = backend
        .encode(&transformed, &staging, effect.quality())
        .and_then(|()| std::fs::rename(&staging, output).map_err(BackendError::from));
    if let Err(err) = written {
        discard_staging(&staging);
        return Err(StageError::Encode(err));
    }
    Ok(transformed.dimensions())
}

/// Hidden sibling of `output` the encoder writes to, same extension.
///
/// `out/foto_grain.jpg` stages as `out/.foto_grain.partial.jpg`.
fn staging_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match output.extension() {
        Some(ext) => format!(".{stem}.partial.{}", ext.to_string_lossy()),
        None => format!(".{stem}.partial"),
    };
    output.with_file_name(name)
}

fn discard_staging(staging: &Path) {
    match std::fs::remove_file(staging) {
        Ok(()) => tracing::debug!(path = %staging.display(), "removed partial output"),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => {
            tracing::warn!(path = %staging.display(), error = %err, "could not remove partial output")
        }
    }
}

/// Byte-for-byte copy. Copying a file onto itself is a no-op.
fn copy_verbatim(input: &Path, output: &Path) -> Result<u64, PipelineError> {
    let copy_err = |source| PipelineError::Copy {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        source,
    };

    match (input.canonicalize(), output.canonicalize()) {
        (Ok(a), Ok(b)) if a == b => std::fs::metadata(input).map(|m| m.len()).map_err(copy_err),
        _ => std::fs::copy(input, output).map_err(copy_err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::test_helpers::{gradient_buffer, seeded_rng};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn capture(tmp: &TempDir) -> PathBuf {
        let input = tmp.path().join("capture.jpg");
        std::fs::write(&input, b"original capture bytes").unwrap();
        input
    }

    fn run(backend: &MockBackend, effect: Effect, input: &Path, output: &Path) -> FilterOutcome {
        apply_filter_with(
            backend,
            &mut seeded_rng(),
            effect,
            input,
            output,
            &FilterOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn pass_through_copies_without_touching_backend() {
        let tmp = TempDir::new().unwrap();
        let input = capture(&tmp);
        let output = tmp.path().join("out.jpg");
        let backend = MockBackend::with_buffer(gradient_buffer(8, 8));

        let outcome = run(&backend, Effect::Normal, &input, &output);

        assert_eq!(
            outcome,
            FilterOutcome::PassedThrough {
                output: output.clone(),
                bytes: 22
            }
        );
        assert_eq!(std::fs::read(&output).unwrap(), b"original capture bytes");
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn success_loads_transforms_and_encodes() {
        let tmp = TempDir::new().unwrap();
        let input = capture(&tmp);
        let output = tmp.path().join("out_terminal.jpg");
        let backend = MockBackend::with_buffer(gradient_buffer(30, 20));

        let outcome = run(&backend, Effect::MatrixTerminal, &input, &output);

        assert!(outcome.is_applied());
        assert_eq!(outcome.output(), output.as_path());
        let ops = backend.get_operations();
        assert_eq!(ops.len(), 2);
        assert!(matches!(&ops[0], RecordedOp::Load { max, .. } if *max == MaxDimensions::default()));
        assert!(matches!(
            &ops[1],
            RecordedOp::Encode {
                width: 30,
                height: 20,
                quality: 95,
                ..
            }
        ));
    }

    #[test]
    fn decode_failure_falls_back_to_copy() {
        let tmp = TempDir::new().unwrap();
        let input = capture(&tmp);
        let output = tmp.path().join("out_grain.jpg");
        let backend = MockBackend::failing_load();

        let outcome = run(&backend, Effect::Grain, &input, &output);

        assert!(matches!(
            outcome,
            FilterOutcome::FallbackCopied {
                stage: Stage::Decode,
                effect: Effect::Grain,
                ..
            }
        ));
        assert_eq!(std::fs::read(&output).unwrap(), std::fs::read(&input).unwrap());
    }

    #[test]
    fn transform_failure_falls_back_to_copy() {
        let tmp = TempDir::new().unwrap();
        let input = capture(&tmp);
        let output = tmp.path().join("out_sepia.jpg");
        let backend = MockBackend::with_buffer(image::RgbImage::new(0, 0));

        let outcome = run(&backend, Effect::Sepia, &input, &output);

        assert!(matches!(
            outcome,
            FilterOutcome::FallbackCopied {
                stage: Stage::Transform,
                ..
            }
        ));
        assert_eq!(std::fs::read(&output).unwrap(), b"original capture bytes");
        // Never reached the encoder.
        assert_eq!(backend.get_operations().len(), 1);
    }

    #[test]
    fn encode_failure_falls_back_to_copy() {
        let tmp = TempDir::new().unwrap();
        let input = capture(&tmp);
        let output = tmp.path().join("out_negative.jpg");
        let backend = MockBackend::failing_encode(gradient_buffer(8, 8));

        let outcome = run(&backend, Effect::Negative, &input, &output);

        match outcome {
            FilterOutcome::FallbackCopied { stage, reason, .. } => {
                assert_eq!(stage, Stage::Encode);
                assert!(reason.contains("mock encode failure"));
            }
            other => panic!("expected fallback, got {other:?}"),
        }
        assert_eq!(std::fs::read(&output).unwrap(), b"original capture bytes");
    }

    #[test]
    fn invalid_params_fall_back_to_copy() {
        let tmp = TempDir::new().unwrap();
        let input = capture(&tmp);
        let output = tmp.path().join("out_spiral.jpg");
        let backend = MockBackend::with_buffer(gradient_buffer(8, 8));
        let mut options = FilterOptions::default();
        options.params.spiral.intensity = f64::INFINITY;

        let outcome =
            apply_filter_with(&backend, &mut seeded_rng(), Effect::Spiral, &input, &output, &options)
                .unwrap();

        assert!(!outcome.is_applied());
        assert_eq!(std::fs::read(&output).unwrap(), b"original capture bytes");
    }

    #[test]
    fn missing_input_is_the_only_error() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("missing.jpg");
        let output = tmp.path().join("out.jpg");
        let backend = MockBackend::failing_load();

        let result = apply_filter_with(
            &backend,
            &mut seeded_rng(),
            Effect::Glitch,
            &input,
            &output,
            &FilterOptions::default(),
        );

        assert!(matches!(result, Err(PipelineError::Copy { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn stage_errors_name_their_stage() {
        let backend_err = || BackendError::UnsupportedFormat("png".into());
        assert_eq!(StageError::Decode(backend_err()).stage(), Stage::Decode);
        assert_eq!(StageError::Encode(backend_err()).stage(), Stage::Encode);
        let transform = TransformError::EmptyBuffer {
            width: 0,
            height: 0,
        };
        assert_eq!(StageError::from(transform).stage(), Stage::Transform);
    }

    #[test]
    fn failed_encode_onto_the_capture_keeps_its_bytes() {
        let tmp = TempDir::new().unwrap();
        let input = capture(&tmp);
        // Writes partial bytes before failing, like a full disk.
        let backend = MockBackend::failing_encode(gradient_buffer(8, 8));

        let outcome = run(&backend, Effect::Grain, &input, &input);

        assert!(matches!(
            outcome,
            FilterOutcome::FallbackCopied {
                stage: Stage::Encode,
                ..
            }
        ));
        assert_eq!(std::fs::read(&input).unwrap(), b"original capture bytes");
        assert!(!staging_path(&input).exists());
    }

    #[test]
    fn successful_encode_onto_the_capture_replaces_it() {
        let tmp = TempDir::new().unwrap();
        let input = capture(&tmp);
        let backend = MockBackend::with_buffer(gradient_buffer(8, 8));

        let outcome = run(&backend, Effect::Red, &input, &input);

        assert!(outcome.is_applied());
        assert_eq!(std::fs::read(&input).unwrap(), b"encoded");
        assert!(!staging_path(&input).exists());
    }

    #[test]
    fn encoder_writes_to_staging_path() {
        let tmp = TempDir::new().unwrap();
        let input = capture(&tmp);
        let output = tmp.path().join("capture_blue.jpg");
        let backend = MockBackend::with_buffer(gradient_buffer(8, 8));

        run(&backend, Effect::Blue, &input, &output);

        let staged = staging_path(&output);
        assert_eq!(staged, tmp.path().join(".capture_blue.partial.jpg"));
        assert!(matches!(
            &backend.get_operations()[1],
            RecordedOp::Encode { path, .. } if Path::new(path) == staged.as_path()
        ));
        assert_eq!(std::fs::read(&output).unwrap(), b"encoded");
    }

    #[test]
    fn staging_path_without_extension() {
        assert_eq!(
            staging_path(Path::new("/fotos/out")),
            PathBuf::from("/fotos/.out.partial")
        );
    }

    #[test]
    fn pass_through_onto_itself_keeps_bytes() {
        let tmp = TempDir::new().unwrap();
        let input = capture(&tmp);
        let backend = MockBackend::default();

        let outcome = run(&backend, Effect::Normal, &input, &input);

        assert!(matches!(outcome, FilterOutcome::PassedThrough { bytes: 22, .. }));
        assert_eq!(std::fs::read(&input).unwrap(), b"original capture bytes");
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let outcome = FilterOutcome::FallbackCopied {
            effect: Effect::Glitch,
            output: PathBuf::from("/fotos/a_glitch.jpg"),
            stage: Stage::Decode,
            reason: "bad".into(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "fallback_copied");
        assert_eq!(json["effect"], "glitch");
        assert_eq!(json["stage"], "decode");
    }
}
