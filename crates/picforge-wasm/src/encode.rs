//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_jpeg`] - Encode RGB pixel data to JPEG bytes
//! - [`encode_jpeg_from_image`] - Encode a JsDecodedImage to JPEG bytes
//! - [`set_jpeg_dpi`] - Rewrite the JFIF density of an existing JPEG
//! - [`prepare_upload`] - Tag an upload with the print density, or pass it through
//!
//! # Example
//!
//! ```typescript
//! import { set_jpeg_dpi } from '@picforge/wasm';
//!
//! const tagged = set_jpeg_dpi(new Uint8Array(await file.arrayBuffer()), 300);
//! ```

use crate::types::{to_js_error, JsDecodedImage};
use picforge_core::{encode, idphoto};
use wasm_bindgen::prelude::*;

/// Encode RGB pixel data (3 bytes per pixel) to JPEG bytes.
///
/// # Errors
///
/// Returns an error if the pixel data length doesn't match width * height * 3
/// or a dimension is zero.
#[wasm_bindgen]
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality).map_err(to_js_error)
}

/// Encode a decoded image to JPEG bytes.
#[wasm_bindgen]
pub fn encode_jpeg_from_image(image: &JsDecodedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(&image.pixels(), image.width(), image.height(), quality)
        .map_err(to_js_error)
}

/// Set the JFIF density of a JPEG to `dpi` without re-encoding it.
///
/// # Errors
///
/// Returns an error if the bytes are not a JPEG or `dpi` is zero.
#[wasm_bindgen]
pub fn set_jpeg_dpi(bytes: &[u8], dpi: u16) -> Result<Vec<u8>, JsValue> {
    encode::set_jpeg_dpi(bytes, dpi).map_err(to_js_error)
}

/// Tag an uploaded JPEG with `dpi`; other uploads come back unchanged.
#[wasm_bindgen]
pub fn prepare_upload(bytes: &[u8], dpi: u16) -> Vec<u8> {
    idphoto::prepare_upload(bytes, dpi)
}

/// Read the JFIF density of a JPEG as `[x, y]` dots per inch.
#[wasm_bindgen]
pub fn jpeg_density(bytes: &[u8]) -> Option<Vec<u16>> {
    encode::jpeg_density(bytes).map(|(x, y)| vec![x, y])
}
