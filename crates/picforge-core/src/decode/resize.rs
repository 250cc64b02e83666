//! Image resizing for export and on-screen preview.
//!
//! All functions return new `DecodedImage` instances without modifying the input.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// Used by the ID photo export to scale the crop to the output preset.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if a target dimension is zero and
/// `DecodeError::CorruptedFile` if the pixel buffer does not match the image size.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Pixel buffer size mismatch".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Downscale an image for the editor preview.
///
/// Images wider than `max_width` are scaled to exactly that width with the
/// aspect ratio preserved; narrower images are returned unchanged. This is
/// the pixel counterpart of [`crate::geometry::ImageFrame::fit_width`].
pub fn resize_for_preview(
    image: &DecodedImage,
    max_width: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_width == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: max_width,
            height: image.height,
        });
    }

    if image.width <= max_width {
        return Ok(image.clone());
    }

    let (width, height) = preview_dimensions(image.width, image.height, max_width);
    resize(image, width, height, filter)
}

/// Preview dimensions for an image limited to `max_width`.
pub fn preview_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    if width <= max_width {
        return (width, height);
    }

    let scale = max_width as f64 / width as f64;
    let new_height = (height as f64 * scale).round() as u32;
    (max_width, new_height.max(1))
}
