//! Logging initialization.
//!
//! Uses the `tracing` ecosystem. Human-readable or JSON lines, always on
//! stderr so stdout stays free for command output.

use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the global subscriber.
///
/// `level` is the default filter directive; `RUST_LOG` overrides it when set.
/// Calling this twice is harmless: the second subscriber is dropped.
pub fn init(level: &str, json_format: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let result = if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    if result.is_err() {
        tracing::debug!("logging already initialized");
    }
}

/// Initialize from the `[logging]` section, with CLI overrides on top.
///
/// `verbose` raises the level to at least `debug`.
pub fn init_from_config(config: &LoggingConfig, verbose: bool, json_override: bool) {
    let level = effective_level(&config.level, verbose);
    let json = json_override || config.format == LogFormat::Json;
    init(level, json);
}

fn effective_level(configured: &str, verbose: bool) -> &str {
    if verbose && !matches!(configured, "debug" | "trace") {
        "debug"
    } else {
        configured
    }
}
