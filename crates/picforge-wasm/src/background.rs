//! Background replacement WASM bindings.
//!
//! The segmentation model runs in JavaScript; it hands back a transparent
//! PNG cutout which is composited here.
//!
//! ```typescript
//! const cutout = await removeBackground(file, { format: 'image/png' });
//! const jpeg = replace_background_from_cutout(
//!   new Uint8Array(await cutout.arrayBuffer()),
//!   'royal-blue',
//! );
//! ```

use crate::types::{to_js_error, JsDecodedImage};
use picforge_core::background::{self, BackgroundColor};
use wasm_bindgen::prelude::*;

fn parse_color(color: &str) -> Result<BackgroundColor, JsValue> {
    color.parse().map_err(to_js_error)
}

/// Composite an encoded cutout over a background color and return a JPEG.
///
/// `color` is `white`, `red`, `royal-blue` or `sky-blue` (or its hex value).
#[wasm_bindgen]
pub fn replace_background_from_cutout(cutout: &[u8], color: &str) -> Result<Vec<u8>, JsValue> {
    let color = parse_color(color)?;
    background::replace_background_from_cutout(cutout, color).map_err(to_js_error)
}

/// Composite raw RGBA cutout pixels (e.g. from `ImageData`) over a color.
#[wasm_bindgen]
pub fn composite_on_color(
    rgba: &[u8],
    width: u32,
    height: u32,
    color: &str,
) -> Result<JsDecodedImage, JsValue> {
    let color = parse_color(color)?;
    background::composite_on_color(rgba, width, height, color)
        .map(JsDecodedImage::from_decoded)
        .map_err(to_js_error)
}

/// CSS hex value of a background color, for swatches.
#[wasm_bindgen]
pub fn background_color_hex(color: &str) -> Result<String, JsValue> {
    Ok(parse_color(color)?.hex().to_string())
}
