//! Picforge Core - Image conversion and ID photo library
//!
//! This crate provides the core functionality for Picforge: the interactive
//! crop geometry of the ID photo editor, tonal adjustments, background
//! replacement, the ID photo export pipeline, and format conversion.

pub mod adjustments;
pub mod background;
pub mod config;
pub mod convert;
pub mod decode;
pub mod encode;
pub mod geometry;
pub mod idphoto;
pub mod size;
pub mod transform;

pub use background::BackgroundColor;
pub use config::{ConfigError, EditorConfig};
pub use convert::{convert_image, converted_file_name};
pub use encode::OutputFormat;
pub use geometry::{Corner, CropEngine, CropRect, ImageFrame};
pub use idphoto::{id_photo_file_name, process_id_photo};
pub use size::IdPhotoSize;

/// Tonal adjustments for an ID photo
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AdjustParams {
    /// Brightness (-100 to 100)
    pub brightness: f32,
    /// Contrast (-100 to 100)
    pub contrast: f32,
    /// Saturation (-100 to 100)
    pub saturation: f32,
}

impl AdjustParams {
    /// Create a new AdjustParams with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
