//! Format converter WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { convert_image, converted_file_name, output_mime_type } from '@picforge/wasm';
//!
//! const out = convert_image(new Uint8Array(await file.arrayBuffer()), 'webp');
//! const blob = new Blob([out], { type: output_mime_type('webp') });
//! download(blob, converted_file_name(file.name, 'webp'));
//! ```

use crate::types::{config_from_js, to_js_error};
use picforge_core::{convert, OutputFormat};
use wasm_bindgen::prelude::*;

fn parse_format(format: &str) -> Result<OutputFormat, JsValue> {
    format.parse().map_err(to_js_error)
}

/// Convert an upload to `jpg`, `png` or `webp`.
///
/// `config` is an optional partial `EditorConfig` object; only
/// `convert_quality` is used.
#[wasm_bindgen]
pub fn convert_image(bytes: &[u8], format: &str, config: JsValue) -> Result<Vec<u8>, JsValue> {
    let format = parse_format(format)?;
    let config = config_from_js(config)?;
    convert::convert_image(bytes, format, &config).map_err(to_js_error)
}

/// Download name for a converted file.
#[wasm_bindgen]
pub fn converted_file_name(name: &str, format: &str) -> Result<String, JsValue> {
    Ok(convert::converted_file_name(name, parse_format(format)?))
}

/// MIME type of an output format, for building a `Blob`.
#[wasm_bindgen]
pub fn output_mime_type(format: &str) -> Result<String, JsValue> {
    Ok(parse_format(format)?.mime_type().to_string())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_file_name() {
        assert_eq!(
            converted_file_name("photo.test.png", "jpg").unwrap(),
            "photo.test.jpg"
        );
        assert!(converted_file_name("a.png", "gif").is_err());
    }

    #[wasm_bindgen_test]
    fn test_mime_type() {
        assert_eq!(output_mime_type("JPEG").unwrap(), "image/jpeg");
    }

    #[wasm_bindgen_test]
    fn test_convert_rejects_svg() {
        assert!(convert_image(b"<svg/>", "png", JsValue::UNDEFINED).is_err());
    }
}
