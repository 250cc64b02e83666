//! Editor and export settings.
//!
//! All settings have defaults matching the shipped editor; hosts override
//! individual fields (the wasm bindings accept a partial JS object).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{DEFAULT_INITIAL_COVERAGE, DEFAULT_MAX_DISPLAY_WIDTH, DEFAULT_MIN_SIZE};

/// Errors reported by [`EditorConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A size or ratio that must be a positive finite number is not.
    #[error("{field} must be a positive number, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    /// Initial coverage must lie in (0, 1].
    #[error("initial_coverage must be in (0, 1], got {0}")]
    CoverageOutOfRange(f64),

    /// Encoder quality must lie in 1..=100.
    #[error("{field} must be between 1 and 100, got {value}")]
    QualityOutOfRange { field: &'static str, value: u8 },

    /// Output density must be non-zero.
    #[error("output_dpi must be non-zero")]
    ZeroDpi,
}

/// Settings shared by the crop editor, the ID-photo export and the converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Minimum crop edge in image pixels.
    pub min_crop_size: f64,
    /// Share of the limiting dimension covered by a fresh crop.
    pub initial_coverage: f64,
    /// Widest on-screen preview, in display pixels.
    pub max_display_width: f64,
    /// JPEG quality of exported ID photos.
    pub id_photo_quality: u8,
    /// JPEG quality used by the format converter.
    pub convert_quality: u8,
    /// Pixel density written into exported JPEGs.
    pub output_dpi: u16,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_crop_size: DEFAULT_MIN_SIZE,
            initial_coverage: DEFAULT_INITIAL_COVERAGE,
            max_display_width: DEFAULT_MAX_DISPLAY_WIDTH,
            id_photo_quality: 95,
            convert_quality: 92,
            output_dpi: 300,
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("min_crop_size", self.min_crop_size)?;
        positive("max_display_width", self.max_display_width)?;

        if !(self.initial_coverage > 0.0 && self.initial_coverage <= 1.0) {
            return Err(ConfigError::CoverageOutOfRange(self.initial_coverage));
        }

        quality("id_photo_quality", self.id_photo_quality)?;
        quality("convert_quality", self.convert_quality)?;

        if self.output_dpi == 0 {
            return Err(ConfigError::ZeroDpi);
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn quality(field: &'static str, value: u8) -> Result<(), ConfigError> {
    if (1..=100).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::QualityOutOfRange { field, value })
    }
}
