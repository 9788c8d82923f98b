//! Crop configuration module.
//!
//! Handles loading, validating, and merging TOML config files. Stock defaults
//! are overridden by a user config file, and command-line flags override
//! both for a single invocation.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! quiet = false             # Suppress the timing report
//!
//! [focus]
//! x = 50.0                  # Horizontal focus, percent of width (clamped to 0-100)
//! y = 50.0                  # Vertical focus, percent of height (clamped to 0-100)
//!
//! [output]
//! prefix = ""               # Prepended to the source file stem
//! suffix = "-[size]-focused" # Appended to the stem; [size] becomes WxH
//! jpeg_quality = 100        # JPEG encoding quality (1-100)
//!
//! [resample]
//! quality = 3               # 0 nearest, 1 triangle, 2 catmull-rom, 3 lanczos3
//! alpha = false             # Keep the alpha channel while resampling
//! unsharp_amount = 0        # Unsharp mask strength (0-500, 0 = off)
//! unsharp_threshold = 0     # Unsharp mask threshold (0-100)
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! [focus]
//! x = 80.0
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{FocusCropParams, FocusPoint, Quality, ResampleQuality, Sharpening};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Crop configuration loaded from a TOML file.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FocusConfig {
    /// Suppress the per-size and total timing report.
    pub quiet: bool,
    /// Focus point in percent.
    pub focus: FocusSection,
    /// Output naming and encoding.
    pub output: OutputConfig,
    /// Resampling filter, alpha handling, and sharpening.
    pub resample: ResampleConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl FocusConfig {
    /// Validate config values are within acceptable ranges.
    ///
    /// Focus coordinates are not validated: out-of-range values are clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.output.jpeg_quality) {
            return Err(ConfigError::Validation(
                "output.jpeg_quality must be 1-100".into(),
            ));
        }
        if self.resample.quality > ResampleQuality::MAX {
            return Err(ConfigError::Validation(
                "resample.quality must be 0-3".into(),
            ));
        }
        if self.resample.unsharp_amount > 500 {
            return Err(ConfigError::Validation(
                "resample.unsharp_amount must be 0-500".into(),
            ));
        }
        if self.resample.unsharp_threshold > 100 {
            return Err(ConfigError::Validation(
                "resample.unsharp_threshold must be 0-100".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Build the per-request crop parameters.
    pub fn crop_params(&self) -> FocusCropParams {
        FocusCropParams {
            focus: FocusPoint::new(self.focus.x, self.focus.y),
            resample: ResampleQuality::new(self.resample.quality),
            alpha: self.resample.alpha,
            sharpening: Sharpening::from_amount(
                self.resample.unsharp_amount,
                self.resample.unsharp_threshold,
            ),
            quality: Quality::new(self.output.jpeg_quality),
        }
    }
}

/// Focus point settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FocusSection {
    /// Horizontal position of the subject, percent of width.
    pub x: f64,
    /// Vertical position of the subject, percent of height.
    pub y: f64,
}

impl Default for FocusSection {
    fn default() -> Self {
        Self { x: 50.0, y: 50.0 }
    }
}

/// Output naming and encoding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Prepended to the source file stem.
    pub prefix: String,
    /// Appended to the source file stem; `[size]` is replaced by `WxH`.
    pub suffix: String,
    /// JPEG encoding quality (1 = worst, 100 = best). PNG output is lossless.
    pub jpeg_quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            suffix: "-[size]-focused".to_string(),
            jpeg_quality: 100,
        }
    }
}

/// Resampling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResampleConfig {
    /// Filter tier: 0 nearest, 1 triangle, 2 catmull-rom, 3 lanczos3.
    pub quality: u8,
    /// Keep the alpha channel while resampling instead of flattening to RGB.
    pub alpha: bool,
    /// Unsharp mask strength (0-500). Zero disables sharpening.
    pub unsharp_amount: u32,
    /// Unsharp mask threshold (0-100).
    pub unsharp_threshold: u32,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            quality: ResampleQuality::MAX,
            alpha: false,
            unsharp_amount: 0,
            unsharp_threshold: 0,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer that user overrides are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(FocusConfig::default())
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

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<FocusConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: FocusConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a TOML file, or stock defaults when `path` is `None`.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result. A path that does not exist is an error.
pub fn load_config(path: Option<&Path>) -> Result<FocusConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Some(toml::from_str::<toml::Value>(&content)?)
        }
        None => None,
    };
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock config file with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Focal Crop Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Pass this file with --config. Command-line flags override it.
# Unknown keys will cause an error.

# Suppress the timing report printed after each run.
quiet = false

# ---------------------------------------------------------------------------
# Focus point
# ---------------------------------------------------------------------------
[focus]
# Position of the subject as a percentage of the image width and height.
# 0,0 is the top-left corner, 100,100 the bottom-right. Out-of-range values
# are clamped.
x = 50.0
y = 50.0

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# Output file name: {prefix}{stem}{suffix}.{ext}
# [size] in the suffix is replaced by the target size, e.g. 400x300.
prefix = ""
suffix = "-[size]-focused"

# JPEG encoding quality (1 = worst, 100 = best). PNG output is lossless.
jpeg_quality = 100

# ---------------------------------------------------------------------------
# Resampling
# ---------------------------------------------------------------------------
[resample]
# Filter tier: 0 nearest, 1 triangle, 2 catmull-rom, 3 lanczos3.
quality = 3

# Keep the alpha channel while resampling instead of flattening to RGB.
alpha = false

# Unsharp mask applied after resampling. An amount of 0 disables it.
unsharp_amount = 0     # 0-500
unsharp_threshold = 0  # 0-100

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers when cropping several sizes.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
