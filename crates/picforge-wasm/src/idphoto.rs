//! ID photo export WASM bindings.

use crate::adjustments::JsAdjustParams;
use crate::crop::JsCropRect;
use crate::types::{config_from_js, to_js_error};
use picforge_core::{idphoto, IdPhotoSize};
use wasm_bindgen::prelude::*;

fn parse_size(size: &str) -> Result<IdPhotoSize, JsValue> {
    size.parse().map_err(to_js_error)
}

/// Render the final ID photo as JPEG bytes.
///
/// `size` is `"1inch"` or `"2inch-large"`; `crop` is in image pixels;
/// `config` is an optional partial `EditorConfig` object.
#[wasm_bindgen]
pub fn process_id_photo(
    bytes: &[u8],
    size: &str,
    crop: &JsCropRect,
    params: &JsAdjustParams,
    config: JsValue,
) -> Result<Vec<u8>, JsValue> {
    let size = parse_size(size)?;
    let config = config_from_js(config)?;
    idphoto::process_id_photo(bytes, size, &crop.rect(), params.inner(), &config)
        .map_err(to_js_error)
}

/// Download name for an exported photo, e.g. `portrait_1inch.jpg`.
#[wasm_bindgen]
pub fn id_photo_file_name(name: &str, size: &str) -> Result<String, JsValue> {
    Ok(idphoto::id_photo_file_name(name, parse_size(size)?))
}

/// Output pixel size of a preset as `[width, height]`.
#[wasm_bindgen]
pub fn id_photo_dimensions(size: &str) -> Result<Vec<u32>, JsValue> {
    let size = parse_size(size)?;
    Ok(vec![size.width(), size.height()])
}

/// Width / height of a preset, for the crop engine.
#[wasm_bindgen]
pub fn id_photo_aspect_ratio(size: &str) -> Result<f64, JsValue> {
    Ok(parse_size(size)?.aspect_ratio())
}
