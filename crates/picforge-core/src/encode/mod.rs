//! Image encoding for ID photo export and format conversion.
//!
//! This module provides functionality for:
//! - Encoding RGB data to JPEG with configurable quality and pixel density
//! - Encoding RGBA data to PNG and lossless WebP
//! - Re-tagging an existing JPEG's JFIF density without re-encoding
//!
//! All operations are synchronous and single-threaded within WASM.

mod density;
mod jpeg;
mod lossless;
mod types;

pub use density::{jpeg_density, set_jpeg_dpi};
pub use jpeg::{encode_jpeg, encode_jpeg_with_dpi};
pub use lossless::{encode_png_rgba, encode_webp_rgb, encode_webp_rgba};
pub use types::{EncodeError, OutputFormat, ParseFormatError};

/// Check that `pixels` holds exactly `width * height * channels` bytes.
pub(crate) fn validate_buffer(
    pixels: &[u8],
    width: u32,
    height: u32,
    channels: usize,
) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * channels;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}
