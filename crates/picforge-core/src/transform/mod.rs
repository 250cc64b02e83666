//! Pixel operations applied during export.
//!
//! # Export Order
//!
//! When an ID photo is exported, operations run in this order:
//! 1. Tonal adjustments on the full decoded image
//! 2. Crop to the editor rectangle
//! 3. Resize to the output size
//!
//! Background replacement composites a cutout with [`flatten_alpha`] before
//! the photo is handed back to the editor.
//!
//! # Coordinate System
//!
//! - Crop rectangles are in natural image pixels
//! - Origin is top-left corner

mod composite;
mod crop;

pub use composite::flatten_alpha;
pub use crop::{apply_crop, pixel_bounds};
