//! Tonal adjustment WASM bindings.
//!
//! The sliders of the ID photo editor bind to a [`JsAdjustParams`]; the same
//! object is passed to `process_id_photo` so the export matches the preview.

use crate::types::{to_js_error, JsDecodedImage};
use picforge_core::adjustments::apply_adjustments as apply_core;
use picforge_core::AdjustParams;
use wasm_bindgen::prelude::*;

/// Brightness, contrast and saturation, each in -100..=100.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsAdjustParams {
    inner: AdjustParams,
}

#[wasm_bindgen]
impl JsAdjustParams {
    /// Create new params with every slider at zero
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> f32 {
        self.inner.brightness
    }

    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: f32) {
        self.inner.brightness = value;
    }

    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> f32 {
        self.inner.contrast
    }

    #[wasm_bindgen(setter)]
    pub fn set_contrast(&mut self, value: f32) {
        self.inner.contrast = value;
    }

    #[wasm_bindgen(getter)]
    pub fn saturation(&self) -> f32 {
        self.inner.saturation
    }

    #[wasm_bindgen(setter)]
    pub fn set_saturation(&mut self, value: f32) {
        self.inner.saturation = value;
    }

    /// Check if all sliders are at zero
    pub fn is_default(&self) -> bool {
        self.inner.is_default()
    }

    /// CSS `filter` value that previews these params on an `<img>`.
    pub fn css_filter(&self) -> String {
        let amount = |v: f32| (v.clamp(-100.0, 100.0) + 100.0) / 100.0;
        format!(
            "brightness({}) contrast({}) saturate({})",
            amount(self.inner.brightness),
            amount(self.inner.contrast),
            amount(self.inner.saturation)
        )
    }

    /// Serialize to a plain JS object for storage
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(to_js_error)
    }

    /// Deserialize from a plain JS object; missing fields are zero
    pub fn from_json(value: JsValue) -> Result<JsAdjustParams, JsValue> {
        let inner: AdjustParams = serde_wasm_bindgen::from_value(value).map_err(to_js_error)?;
        Ok(Self { inner })
    }
}

impl JsAdjustParams {
    pub(crate) fn inner(&self) -> &AdjustParams {
        &self.inner
    }
}

/// Apply the adjustments to a copy of `image`.
///
/// # Example (TypeScript)
/// ```typescript
/// const params = new JsAdjustParams();
/// params.brightness = 20;
/// const adjusted = apply_adjustments(preview, params);
/// ```
#[wasm_bindgen]
pub fn apply_adjustments(image: &JsDecodedImage, params: &JsAdjustParams) -> JsDecodedImage {
    let mut pixels = image.pixels();
    apply_core(&mut pixels, params.inner());
    JsDecodedImage::new(image.width(), image.height(), pixels)
}
