//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode an upload to RGB with EXIF orientation applied
//! - [`resize_for_preview`] - Scale an image down to the editor preview width
//! - [`resize`] - Resize an image to exact dimensions
//! - [`is_supported_file`] - Check a file name / MIME type against the accepted formats
//! - [`accepted_extensions`] - The extensions for a file picker's `accept` attribute
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, resize_for_preview } from '@picforge/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const preview = resize_for_preview(image, 600, 1);
//! ```

use crate::types::{filter_from_u8, to_js_error, JsDecodedImage};
use picforge_core::decode::{self, SourceFormat, ACCEPTED_EXTENSIONS};
use wasm_bindgen::prelude::*;

/// Decode an uploaded image.
///
/// Transparent areas are composited onto white.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported raster image (SVG is
/// recognized but not rasterized).
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(to_js_error)
}

/// Resize an image so it is at most `max_width` pixels wide.
///
/// `filter`: 0 = Nearest, 1 = Bilinear, 2 = Lanczos3.
#[wasm_bindgen]
pub fn resize_for_preview(
    image: &JsDecodedImage,
    max_width: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::resize_for_preview(&image.to_decoded(), max_width, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(to_js_error)
}

/// Resize an image to exact dimensions.
#[wasm_bindgen]
pub fn resize(
    image: &JsDecodedImage,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::resize(&image.to_decoded(), width, height, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(to_js_error)
}

/// Whether an upload is one of the accepted input formats.
///
/// The MIME type wins when the browser reports one; otherwise the file
/// extension decides.
#[wasm_bindgen]
pub fn is_supported_file(name: &str, mime_type: &str) -> bool {
    SourceFormat::from_mime(mime_type)
        .or_else(|| SourceFormat::from_name(name))
        .is_some()
}

/// Accepted extensions, e.g. for `<input accept=...>`.
#[wasm_bindgen]
pub fn accepted_extensions() -> js_sys::Array {
    ACCEPTED_EXTENSIONS
        .iter()
        .map(|ext| JsValue::from_str(ext))
        .collect()
}
