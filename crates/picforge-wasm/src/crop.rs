//! Crop editor WASM bindings.
//!
//! The editor UI forwards pointer events here and draws whatever rectangle
//! comes back. All rectangles returned to JavaScript are in natural image
//! pixels unless the method name says `display`.
//!
//! # Example
//!
//! ```typescript
//! import { JsCropEngine } from '@picforge/wasm';
//!
//! const engine = new JsCropEngine();            // or new JsCropEngine({ min_crop_size: 80 })
//! engine.initialize_fit(img.naturalWidth, img.naturalHeight, 295 / 413);
//!
//! overlay.onpointerdown = (e) => engine.begin_resize('bottom-right', e.clientX, e.clientY);
//! window.onpointermove = (e) => draw(engine.update(e.clientX, e.clientY));
//! window.onpointerup = () => engine.end_drag();
//! ```

use picforge_core::geometry::{Corner, CropEngine, CropRect, FaceBounds, ImageFrame};
use wasm_bindgen::prelude::*;

use crate::types::{config_from_js, to_js_error};

/// A crop rectangle for JavaScript.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct JsCropRect {
    inner: CropRect,
}

#[wasm_bindgen]
impl JsCropRect {
    #[wasm_bindgen(constructor)]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> JsCropRect {
        JsCropRect {
            inner: CropRect::new(x, y, width, height),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.inner.x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.inner.y
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.inner.height
    }
}

impl From<CropRect> for JsCropRect {
    fn from(inner: CropRect) -> Self {
        Self { inner }
    }
}

impl JsCropRect {
    pub(crate) fn rect(&self) -> CropRect {
        self.inner
    }
}

/// The crop editor's geometry engine.
#[wasm_bindgen]
pub struct JsCropEngine {
    inner: CropEngine,
    max_display_width: f64,
}

#[wasm_bindgen]
impl JsCropEngine {
    /// Create an engine. `config` is an optional partial `EditorConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsCropEngine, JsValue> {
        let config = config_from_js(config)?;
        Ok(JsCropEngine {
            inner: CropEngine::with_config(&config),
            max_display_width: config.max_display_width,
        })
    }

    /// Set up the crop for an image shown at the given display size.
    ///
    /// Returns `undefined` when the sizes or ratio are not usable yet.
    pub fn initialize(
        &mut self,
        natural_width: u32,
        natural_height: u32,
        display_width: f64,
        display_height: f64,
        aspect_ratio: f64,
    ) -> Option<JsCropRect> {
        let frame = ImageFrame::new(natural_width, natural_height, display_width, display_height);
        self.inner.initialize(frame, aspect_ratio).map(Into::into)
    }

    /// Set up the crop for an image previewed at the configured maximum width.
    pub fn initialize_fit(
        &mut self,
        natural_width: u32,
        natural_height: u32,
        aspect_ratio: f64,
    ) -> Option<JsCropRect> {
        let frame = ImageFrame::fit_width(natural_width, natural_height, self.max_display_width);
        self.inner.initialize(frame, aspect_ratio).map(Into::into)
    }

    /// Switch to another output size's ratio and re-center the crop.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f64) -> Option<JsCropRect> {
        self.inner.set_aspect_ratio(aspect_ratio).map(Into::into)
    }

    /// Replace the crop, e.g. with a saved one. It is pulled into validity.
    pub fn set_crop(&mut self, rect: &JsCropRect) -> Option<JsCropRect> {
        self.inner.set_crop(rect.rect()).map(Into::into)
    }

    /// Frame the crop around a detected face box.
    pub fn apply_face(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        confidence: f64,
    ) -> Option<JsCropRect> {
        let face = FaceBounds {
            x,
            y,
            width,
            height,
            confidence,
        };
        self.inner.apply_face(&face).map(Into::into)
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Pointer pressed inside the crop: start moving it.
    pub fn begin_translate(&mut self, pointer_x: f64, pointer_y: f64) {
        self.inner.begin_translate((pointer_x, pointer_y));
    }

    /// Pointer pressed on a corner handle, named like `"top-left"`.
    pub fn begin_resize(
        &mut self,
        handle: &str,
        pointer_x: f64,
        pointer_y: f64,
    ) -> Result<(), JsValue> {
        let corner: Corner = handle.parse().map_err(to_js_error)?;
        self.inner.begin_resize(corner, (pointer_x, pointer_y));
        Ok(())
    }

    /// Pointer moved. Returns the corrected crop, or `undefined` when idle.
    pub fn update(&mut self, pointer_x: f64, pointer_y: f64) -> Option<JsCropRect> {
        self.inner.update((pointer_x, pointer_y)).map(Into::into)
    }

    /// Pointer released.
    pub fn end_drag(&mut self) -> Option<JsCropRect> {
        self.inner.end_drag().map(Into::into)
    }

    #[wasm_bindgen(getter)]
    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    /// Current crop in image pixels.
    pub fn crop(&self) -> Option<JsCropRect> {
        self.inner.crop().map(Into::into)
    }

    /// Current crop in display pixels, for drawing the overlay.
    pub fn crop_in_display(&self) -> Option<JsCropRect> {
        self.inner.crop_in_display().map(Into::into)
    }

    #[wasm_bindgen(getter)]
    pub fn display_width(&self) -> Option<f64> {
        self.inner.frame().map(|f| f.display_width)
    }

    #[wasm_bindgen(getter)]
    pub fn display_height(&self) -> Option<f64> {
        self.inner.frame().map(|f| f.display_height)
    }

    /// Map a display point to image pixels, as `[x, y]`.
    pub fn display_to_image(&self, x: f64, y: f64) -> Option<Vec<f64>> {
        self.inner
            .display_to_image(x, y)
            .map(|(ix, iy)| vec![ix, iy])
    }

    /// Map an image point to display pixels, as `[x, y]`.
    pub fn image_to_display(&self, x: f64, y: f64) -> Option<Vec<f64>> {
        self.inner
            .image_to_display(x, y)
            .map(|(dx, dy)| vec![dx, dy])
    }
}

impl JsCropEngine {
    #[cfg(test)]
    fn with_defaults() -> Self {
        Self {
            inner: CropEngine::new(),
            max_display_width: picforge_core::geometry::DEFAULT_MAX_DISPLAY_WIDTH,
        }
    }
}
