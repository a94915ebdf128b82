//! Engine configuration.
//!
//! Handles loading, validating, and merging `darkslide.toml`. Stock defaults
//! are overridden by whatever keys the file sets; everything else keeps its
//! default.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [loader]
//! max_width = 800           # Working resolution bounding box
//! max_height = 600
//!
//! [grain]
//! intensity = 20            # Noise amplitude (0-255)
//!
//! [glitch]
//! shift = 15                # Max horizontal displacement in pixels
//! lines = 20                # Displaced bands (capped at 15)
//!
//! [spiral]
//! intensity = 5.0           # Rotation in radians at the corners
//!
//! [disk]
//! path = "/home/fotos"      # Where captures are written
//! min_free_mb = 50          # Refuse to capture below this
//!
//! [logging]
//! level = "info"            # trace | debug | info | warn | error
//! format = "pretty"         # pretty | json
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::disk::DEFAULT_MIN_FREE_MB;
use crate::effects::{EffectParams, GlitchParams, GrainParams, SpiralParams};
use crate::imaging::MaxDimensions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up inside the config directory.
pub const CONFIG_FILE: &str = "darkslide.toml";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Engine configuration loaded from `darkslide.toml`.
///
/// All fields have sensible defaults. Config files need only specify the
/// values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Working resolution for every effect.
    pub loader: LoaderConfig,
    pub grain: GrainParams,
    pub glitch: GlitchParams,
    pub spiral: SpiralParams,
    /// Free-space guard.
    pub disk: DiskConfig,
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.loader.max_width == 0 || self.loader.max_height == 0 {
            return Err(ConfigError::Validation(
                "loader.max_width and loader.max_height must be non-zero".into(),
            ));
        }
        self.spiral
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }

    pub fn max_dimensions(&self) -> MaxDimensions {
        MaxDimensions::new(self.loader.max_width, self.loader.max_height)
    }

    pub fn effect_params(&self) -> EffectParams {
        EffectParams {
            grain: self.grain,
            glitch: self.glitch,
            spiral: self.spiral,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        let max = MaxDimensions::default();
        Self {
            max_width: max.width,
            max_height: max.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiskConfig {
    /// Directory captures are written to; its filesystem is the one checked.
    pub path: PathBuf,
    pub min_free_mb: u64,
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("/home/fotos"),
            min_free_mb: DEFAULT_MIN_FREE_MB,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(EngineConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `darkslide.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no config file.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<EngineConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: EngineConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `darkslide.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<EngineConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `darkslide.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Darkslide Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Loader
# ---------------------------------------------------------------------------
[loader]
# Captures are shrunk (never enlarged) to fit this box before any effect runs.
# Larger values cost memory and time on small boards.
max_width = 800
max_height = 600

# ---------------------------------------------------------------------------
# Film grain
# ---------------------------------------------------------------------------
[grain]
# Noise amplitude, 0-255. 10-30 looks like film.
intensity = 20

# ---------------------------------------------------------------------------
# Digital glitch
# ---------------------------------------------------------------------------
[glitch]
# Largest horizontal displacement, in pixels, either direction.
shift = 15
# Number of displaced bands. Values above 15 are capped at 15.
lines = 20

# ---------------------------------------------------------------------------
# Spiral warp
# ---------------------------------------------------------------------------
[spiral]
# Rotation in radians at the corners: 2.0 gentle, 3.0 moderate, 5.0 extreme.
intensity = 5.0

# ---------------------------------------------------------------------------
# Disk guard
# ---------------------------------------------------------------------------
[disk]
# Directory captures are written to.
path = "/home/fotos"
# Capturing is refused when this many MiB or fewer are free.
min_free_mb = 50

# ---------------------------------------------------------------------------
# Logging
# ---------------------------------------------------------------------------
[logging]
# trace | debug | info | warn | error. RUST_LOG overrides this.
level = "info"
# pretty | json
format = "pretty"
"##
}
