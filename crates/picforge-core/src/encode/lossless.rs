//! PNG and WebP encoding for the format converter.
//!
//! Both encoders are lossless. The `image` crate ships no lossy WebP
//! encoder, so WebP output ignores any quality setting.

use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::io::Cursor;

use super::{validate_buffer, EncodeError, OutputFormat};

/// Encode RGBA pixel data to PNG, keeping transparency.
pub fn encode_png_rgba(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    validate_buffer(pixels, width, height, 4)?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| failed(OutputFormat::Png, e))?;
    Ok(buffer.into_inner())
}

/// Encode RGBA pixel data to lossless WebP.
pub fn encode_webp_rgba(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    validate_buffer(pixels, width, height, 4)?;
    encode_webp(pixels, width, height, ExtendedColorType::Rgba8)
}

/// Encode RGB pixel data to lossless WebP.
pub fn encode_webp_rgb(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    validate_buffer(pixels, width, height, 3)?;
    encode_webp(pixels, width, height, ExtendedColorType::Rgb8)
}

fn encode_webp(
    pixels: &[u8],
    width: u32,
    height: u32,
    color: ExtendedColorType,
) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Cursor::new(Vec::new());
    WebPEncoder::new_lossless(&mut buffer)
        .write_image(pixels, width, height, color)
        .map_err(|e| failed(OutputFormat::Webp, e))?;
    Ok(buffer.into_inner())
}

fn failed(format: OutputFormat, err: image::ImageError) -> EncodeError {
    EncodeError::EncodingFailed {
        format,
        message: err.to_string(),
    }
}
