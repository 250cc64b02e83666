//! Crop geometry for the ID photo editor.
//!
//! This module owns the interactive crop rectangle: it turns pointer drags
//! on the on-screen preview into crop rectangles in image-pixel space. A
//! published rectangle stays inside the image at the selected output ratio
//! and is never smaller than the minimum edge length.
//!
//! # Coordinate System
//!
//! - Image coordinates are natural pixels of the decoded source image
//! - Display coordinates are pixels of the scaled preview
//! - Both share the top-left origin and differ by a uniform scale factor
//!
//! # Interaction Model
//!
//! A [`CropEngine`] is owned by the hosting view. Pointer-down starts a
//! [`DragSession`] (translate or resize from a [`Corner`]), every pointer-move
//! publishes a corrected [`CropRect`], pointer-up ends the session. The engine
//! never fails on pointer input: everything is clamped into validity.

mod engine;
mod face;
mod frame;
mod rect;

pub use engine::{
    centered_crop, Corner, CropEngine, DragMode, DragSession, ParseCornerError,
    DEFAULT_INITIAL_COVERAGE, DEFAULT_MIN_SIZE,
};
pub use face::{auto_crop, crop_from_face, FaceBounds, FaceDetector};
pub use frame::{ImageFrame, DEFAULT_MAX_DISPLAY_WIDTH};
pub use rect::{CropRect, EPSILON};
