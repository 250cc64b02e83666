//! Pixel cropping with an editor crop rectangle.
//!
//! The rectangle is in natural image pixels, as produced by
//! [`crate::geometry::CropEngine`]. Fractional edges are rounded to the
//! nearest pixel.

use crate::decode::DecodedImage;
use crate::geometry::CropRect;

/// Cut `rect` out of `image`.
///
/// # Behavior
///
/// - The origin is clamped to `[0, width - 1] x [0, height - 1]`
/// - The far edges are clamped to the image bounds
/// - The output is at least 1x1 pixels
/// - A rectangle covering the whole image returns a copy
///
/// # Example
///
/// ```
/// use picforge_core::decode::DecodedImage;
/// use picforge_core::geometry::CropRect;
/// use picforge_core::transform::apply_crop;
///
/// let image = DecodedImage::new(100, 100, vec![128u8; 100 * 100 * 3]);
/// let cropped = apply_crop(&image, &CropRect::new(25.0, 25.0, 50.0, 50.0));
/// assert_eq!((cropped.width, cropped.height), (50, 50));
/// ```
pub fn apply_crop(image: &DecodedImage, rect: &CropRect) -> DecodedImage {
    let (left, top, out_width, out_height) = pixel_bounds(image.width, image.height, rect);

    if left == 0 && top == 0 && out_width == image.width && out_height == image.height {
        return image.clone();
    }

    let row_len = (out_width * 3) as usize;
    let mut output = Vec::with_capacity(row_len * out_height as usize);

    for y in top..top + out_height {
        let start = ((y * image.width + left) * 3) as usize;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    DecodedImage {
        width: out_width,
        height: out_height,
        pixels: output,
    }
}

/// Integer `(left, top, width, height)` of `rect` inside a `width x height` image.
pub fn pixel_bounds(width: u32, height: u32, rect: &CropRect) -> (u32, u32, u32, u32) {
    let left = to_pixel(rect.x).min(width.saturating_sub(1));
    let top = to_pixel(rect.y).min(height.saturating_sub(1));
    let right = left.saturating_add(to_pixel(rect.width)).min(width);
    let bottom = top.saturating_add(to_pixel(rect.height)).min(height);

    (
        left,
        top,
        right.saturating_sub(left).max(1),
        bottom.saturating_sub(top).max(1),
    )
}

/// Round to a non-negative pixel index; NaN maps to 0.
#[inline]
fn to_pixel(v: f64) -> u32 {
    if v.is_nan() || v <= 0.0 {
        0
    } else {
        v.round().min(u32::MAX as f64) as u32
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Output is non-empty, inside the source, and its buffer matches its size.
        #[test]
        fn prop_output_is_well_formed(
            (width, height) in (1u32..=64, 1u32..=64),
            (x, y, w, h) in (-20.0f64..100.0, -20.0f64..100.0, 0.0f64..120.0, 0.0f64..120.0),
        ) {
            let img = DecodedImage::new(width, height, vec![7u8; (width * height * 3) as usize]);
            let result = apply_crop(&img, &CropRect::new(x, y, w, h));

            prop_assert!(result.width >= 1 && result.width <= width);
            prop_assert!(result.height >= 1 && result.height <= height);
            prop_assert_eq!(result.pixels.len(), (result.width * result.height * 3) as usize);
        }

        /// Crops produced by the engine land inside the image after rounding.
        #[test]
        fn prop_bounds_inside_image(
            (width, height) in (1u32..=4000, 1u32..=4000),
            fx in 0.0f64..1.0, fy in 0.0f64..1.0,
        ) {
            let rect = CropRect::new(
                fx * width as f64,
                fy * height as f64,
                (1.0 - fx) * width as f64,
                (1.0 - fy) * height as f64,
            );
            let (left, top, w, h) = pixel_bounds(width, height, &rect);
            prop_assert!(left + w <= width);
            prop_assert!(top + h <= height);
        }
    }
}
