//! Editor configuration.
//!
//! Hosts pass this as a plain object (JSON or a JS object through the WASM
//! bindings); every field has a default, so partial objects are accepted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encode::OutputFormat;
use crate::geometry::{INITIAL_CROP_RATIO, MIN_CROP_SIZE};

/// Default encoder quality for committed images.
pub const DEFAULT_EXPORT_QUALITY: f32 = 0.95;

/// Default corner-handle hit radius in display units.
pub const DEFAULT_HANDLE_RADIUS: f64 = 8.0;

/// Configuration values rejected by [`EditorConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("min_crop_size must be a positive number, got {0}")]
    MinCropSize(f64),

    #[error("initial_crop_ratio must be in (0, 1], got {0}")]
    InitialCropRatio(f64),

    #[error("handle_radius must be zero or positive, got {0}")]
    HandleRadius(f64),

    #[error("export_quality must be in (0, 1], got {0}")]
    ExportQuality(f32),
}

/// Tunables for crop interaction and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Minimum crop box side in display units.
    pub min_crop_size: f64,
    /// Initial crop square side relative to the shorter displayed side.
    pub initial_crop_ratio: f64,
    /// Hit radius of the corner handles in display units.
    pub handle_radius: f64,
    /// Encoder quality in (0, 1]. Passed through to the encoder untouched.
    pub export_quality: f32,
    /// Export format used when the source format is unknown.
    pub default_format: OutputFormat,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_crop_size: MIN_CROP_SIZE,
            initial_crop_ratio: INITIAL_CROP_RATIO,
            handle_radius: DEFAULT_HANDLE_RADIUS,
            export_quality: DEFAULT_EXPORT_QUALITY,
            default_format: OutputFormat::Jpeg,
        }
    }
}

impl EditorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_crop_size.is_finite() && self.min_crop_size > 0.0) {
            return Err(ConfigError::MinCropSize(self.min_crop_size));
        }
        if !(self.initial_crop_ratio > 0.0 && self.initial_crop_ratio <= 1.0) {
            return Err(ConfigError::InitialCropRatio(self.initial_crop_ratio));
        }
        if !(self.handle_radius.is_finite() && self.handle_radius >= 0.0) {
            return Err(ConfigError::HandleRadius(self.handle_radius));
        }
        if !(self.export_quality > 0.0 && self.export_quality <= 1.0) {
            return Err(ConfigError::ExportQuality(self.export_quality));
        }
        Ok(())
    }
}
