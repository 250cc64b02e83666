//! Upload decoding for the editor and the converter.
//!
//! This module provides functionality for:
//! - Decoding JPEG, PNG, WebP, GIF, BMP, TIFF and ICO uploads
//! - Applying EXIF orientation so the crop works on the upright image
//! - Recognizing the accepted input formats by name or MIME type
//! - Resizing for export and preview
//!
//! All operations are synchronous and single-threaded within WASM.

mod raster;
mod resize;
mod types;

pub(crate) use raster::decode_dynamic;
pub use raster::{decode_image, decode_rgba, get_orientation};
pub use resize::{preview_dimensions, resize, resize_for_preview};
pub use types::{
    DecodeError, DecodedImage, FilterType, Orientation, SourceFormat, ACCEPTED_EXTENSIONS,
};

#[cfg(test)]
pub(crate) use raster::tests::{png_bytes, MINIMAL_JPEG};
