//! Natural and on-screen dimensions of a loaded image.

use serde::{Deserialize, Serialize};

/// Maximum preview width used by the editor, in display pixels.
pub const DEFAULT_MAX_DISPLAY_WIDTH: f64 = 600.0;

/// Dimensions of the source image and of its on-screen preview.
///
/// The preview is a uniformly scaled copy of the image, so a single scale
/// factor (`display_width / natural_width`) maps between the two spaces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageFrame {
    /// Decoded image width in pixels.
    pub natural_width: u32,
    /// Decoded image height in pixels.
    pub natural_height: u32,
    /// Preview width in display pixels.
    pub display_width: f64,
    /// Preview height in display pixels.
    pub display_height: f64,
}

impl ImageFrame {
    pub fn new(
        natural_width: u32,
        natural_height: u32,
        display_width: f64,
        display_height: f64,
    ) -> Self {
        Self {
            natural_width,
            natural_height,
            display_width,
            display_height,
        }
    }

    /// Build a frame whose preview is at most `max_display_width` wide.
    ///
    /// Images narrower than the limit are shown at their natural size;
    /// wider images are scaled down with the aspect ratio preserved.
    pub fn fit_width(natural_width: u32, natural_height: u32, max_display_width: f64) -> Self {
        let scale = if natural_width == 0 {
            0.0
        } else {
            (max_display_width / natural_width as f64).min(1.0)
        };
        Self {
            natural_width,
            natural_height,
            display_width: natural_width as f64 * scale,
            display_height: natural_height as f64 * scale,
        }
    }

    /// A frame is usable once both the image and its preview have area.
    pub fn is_valid(&self) -> bool {
        self.natural_width > 0
            && self.natural_height > 0
            && self.display_width.is_finite()
            && self.display_height.is_finite()
            && self.display_width > 0.0
            && self.display_height > 0.0
    }

    /// Display pixels per image pixel.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.display_width / self.natural_width as f64
    }

    /// Natural dimensions as floats, for geometry.
    #[inline]
    pub fn natural_size(&self) -> (f64, f64) {
        (self.natural_width as f64, self.natural_height as f64)
    }

    /// Width divided by height of the source image.
    pub fn aspect_ratio(&self) -> f64 {
        self.natural_width as f64 / self.natural_height as f64
    }

    /// Convert a display-space position or delta to image space.
    ///
    /// Only meaningful for a valid frame.
    #[inline]
    pub fn display_to_image(&self, dx: f64, dy: f64) -> (f64, f64) {
        let scale = self.scale();
        (dx / scale, dy / scale)
    }

    /// Convert an image-space position or delta to display space.
    #[inline]
    pub fn image_to_display(&self, ix: f64, iy: f64) -> (f64, f64) {
        let scale = self.scale();
        (ix * scale, iy * scale)
    }
}
