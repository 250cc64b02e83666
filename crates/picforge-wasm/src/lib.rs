//! Picforge WASM - WebAssembly bindings for Picforge
//!
//! This crate exposes the picforge-core crop editor, ID photo export,
//! background replacement and format converter to JavaScript/TypeScript.
//!
//! # Module Structure
//!
//! - `crop` - The interactive crop engine (`JsCropEngine`, `JsCropRect`)
//! - `adjustments` - Brightness / contrast / saturation (`JsAdjustParams`)
//! - `idphoto` - ID photo export and output size presets
//! - `background` - Background color replacement from a cutout
//! - `convert` - JPG / PNG / WebP conversion
//! - `decode` / `encode` - Lower-level image I/O
//! - `logging` - Routes core log records to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropEngine, process_id_photo } from '@picforge/wasm';
//!
//! await init();
//!
//! const engine = new JsCropEngine();
//! engine.initialize_fit(img.naturalWidth, img.naturalHeight, 295 / 413);
//! // ... pointer events ...
//! const jpeg = process_id_photo(bytes, '1inch', engine.crop(), params);
//! ```

use wasm_bindgen::prelude::*;

mod adjustments;
mod background;
mod convert;
mod crop;
mod decode;
mod encode;
mod idphoto;
mod logging;
mod types;

// Re-export public types
pub use adjustments::{apply_adjustments, JsAdjustParams};
pub use background::{background_color_hex, composite_on_color, replace_background_from_cutout};
pub use convert::{convert_image, converted_file_name, output_mime_type};
pub use crop::{JsCropEngine, JsCropRect};
pub use decode::{accepted_extensions, decode_image, is_supported_file, resize, resize_for_preview};
pub use encode::{encode_jpeg, encode_jpeg_from_image, jpeg_density, prepare_upload, set_jpeg_dpi};
pub use idphoto::{id_photo_aspect_ratio, id_photo_dimensions, id_photo_file_name, process_id_photo};
pub use logging::set_log_level;
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load).
///
/// Installs the console logger at `warn`; raise it with `set_log_level`.
#[wasm_bindgen(start)]
pub fn init() {
    logging::install(log::LevelFilter::Warn);
    log::debug!("picforge-wasm {} ready", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_init_is_idempotent() {
        // A second call must not panic on the already installed logger
        init();
        init();
    }
}
