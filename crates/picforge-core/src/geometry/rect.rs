//! Crop rectangle in image-pixel coordinates.

use serde::{Deserialize, Serialize};

use super::ImageFrame;

/// Tolerance used when comparing derived floating-point geometry.
pub const EPSILON: f64 = 1e-6;

/// A crop region in image-pixel coordinates.
///
/// Values are fractional: the rectangle tracks the pointer exactly and is
/// only rounded when pixels are finally copied out of the image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl CropRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Whether the rectangle lies inside a `width` x `height` image,
    /// allowing [`EPSILON`] of floating-point slack.
    pub fn is_within(&self, width: f64, height: f64) -> bool {
        self.x >= -EPSILON
            && self.y >= -EPSILON
            && self.right() <= width + EPSILON
            && self.bottom() <= height + EPSILON
    }

    /// The same rectangle in the display space of `frame`, for drawing the
    /// crop overlay.
    pub fn to_display(&self, frame: &ImageFrame) -> CropRect {
        let (x, y) = frame.image_to_display(self.x, self.y);
        let (width, height) = frame.image_to_display(self.width, self.height);
        CropRect {
            x,
            y,
            width,
            height,
        }
    }

    /// Component-wise comparison within `tolerance`.
    pub fn approx_eq(&self, other: &CropRect, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}
