//! Face-driven crop placement.
//!
//! Face detection itself is an external capability: a [`FaceDetector`]
//! receives a grayscale buffer and reports bounding boxes. This module only
//! turns a face box into an ID-photo crop.

use serde::{Deserialize, Serialize};

use super::CropRect;
use crate::decode::DecodedImage;

/// Share of the crop height taken by the face.
const FACE_HEIGHT_SHARE: f64 = 0.35;

/// Vertical position of the face center within the crop, from the top.
const FACE_CENTER_OFFSET: f64 = 0.4;

/// Bounding box of a detected face, in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Detector confidence; higher is better.
    pub confidence: f64,
}

impl FaceBounds {
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    fn is_usable(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// Pluggable face detection backend.
pub trait FaceDetector {
    /// Detect faces in a row-major grayscale buffer of `width` x `height` bytes.
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<FaceBounds>;
}

/// Place an ID-photo crop around a face.
///
/// The crop is sized so the face fills about a third of its height, with the
/// face centered horizontally and its center 40% down from the top edge. A
/// crop that would not fit is shrunk to the image and then shifted inside.
pub fn crop_from_face(
    face: &FaceBounds,
    natural_width: f64,
    natural_height: f64,
    aspect_ratio: f64,
) -> CropRect {
    let (center_x, center_y) = face.center();

    let mut height = face.height / FACE_HEIGHT_SHARE;
    let mut width = height * aspect_ratio;

    if height > natural_height {
        height = natural_height;
        width = height * aspect_ratio;
    }
    if width > natural_width {
        width = natural_width;
        height = width / aspect_ratio;
    }

    let x = (center_x - width / 2.0).min(natural_width - width).max(0.0);
    let y = (center_y - height * FACE_CENTER_OFFSET)
        .min(natural_height - height)
        .max(0.0);

    CropRect {
        x,
        y,
        width,
        height,
    }
}

/// Detect the most confident face in `image` and place a crop around it.
///
/// Returns `None` when the detector finds no usable face.
pub fn auto_crop(
    detector: &dyn FaceDetector,
    image: &DecodedImage,
    aspect_ratio: f64,
) -> Option<CropRect> {
    let rgb = image.to_rgb_image()?;
    let gray = image::imageops::grayscale(&rgb);

    let face = detector
        .detect(gray.as_raw(), gray.width(), gray.height())
        .into_iter()
        .filter(FaceBounds::is_usable)
        .max_by(|a, b| a.confidence.total_cmp(&b.confidence))?;

    log::debug!(
        "auto crop using face {:.0}x{:.0} at ({:.0}, {:.0})",
        face.width,
        face.height,
        face.x,
        face.y
    );

    Some(crop_from_face(
        &face,
        image.width as f64,
        image.height as f64,
        aspect_ratio,
    ))
}
