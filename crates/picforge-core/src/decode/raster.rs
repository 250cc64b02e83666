//! Raster decoding for uploads, with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader, RgbaImage};

use super::{DecodeError, DecodedImage, Orientation};
use crate::transform::flatten_alpha;

/// Canvas color under transparent pixels when an upload is flattened.
const FLATTEN_BACKGROUND: [u8; 3] = [255, 255, 255];

/// Decode any supported upload to RGB, applying EXIF orientation.
///
/// Transparent areas are composited onto white, matching what the editor
/// preview shows behind a PNG or WebP with alpha.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedFormat` for SVG, `DecodeError::InvalidFormat`
/// for unrecognized bytes and `DecodeError::CorruptedFile` when decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let rgba = decode_rgba(bytes)?;
    Ok(DecodedImage::from_rgb_image(flatten_alpha(
        &rgba,
        FLATTEN_BACKGROUND,
    )))
}

/// Decode any supported upload to RGBA, applying EXIF orientation.
///
/// Alpha is preserved for the converter's PNG and WebP outputs and for
/// background replacement cutouts.
pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage, DecodeError> {
    Ok(decode_dynamic(bytes)?.into_rgba8())
}

pub(crate) fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    if looks_like_svg(bytes) {
        return Err(DecodeError::UnsupportedFormat("svg".to_string()));
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let format = reader.format().ok_or(DecodeError::InvalidFormat)?;
    log::debug!("decoding {:?} upload of {} bytes", format, bytes.len());

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(apply_orientation(img, get_orientation(bytes)))
}

/// Extract the EXIF orientation of an upload.
///
/// Returns `Orientation::Normal` when the container carries no EXIF block or
/// the tag is missing.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

/// SVG is text; sniff the first tag after an optional BOM and whitespace.
fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let head = head.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(head);
    let start = head
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(head.len());
    let head = &head[start..];

    if head.starts_with(b"<svg") {
        return true;
    }
    head.starts_with(b"<?xml") && head.windows(4).any(|w| w == b"<svg")
}
