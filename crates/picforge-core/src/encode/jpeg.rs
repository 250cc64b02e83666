//! JPEG encoding for export.
//!
//! ID photos are written with a JFIF pixel density so print shops see the
//! intended physical size; converter output carries no density.

use image::codecs::jpeg::{JpegEncoder, PixelDensity};
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{validate_buffer, EncodeError, OutputFormat};

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100); out-of-range values are clamped
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    encode(pixels, width, height, quality, None)
}

/// Encode RGB pixel data to JPEG bytes tagged with `dpi` in the JFIF header.
///
/// # Example
///
/// ```
/// use picforge_core::encode::{encode_jpeg_with_dpi, jpeg_density};
///
/// let pixels = vec![128u8; 295 * 413 * 3];
/// let jpeg = encode_jpeg_with_dpi(&pixels, 295, 413, 95, 300).unwrap();
/// assert_eq!(jpeg_density(&jpeg), Some((300, 300)));
/// ```
pub fn encode_jpeg_with_dpi(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
    dpi: u16,
) -> Result<Vec<u8>, EncodeError> {
    if dpi == 0 {
        return Err(EncodeError::InvalidDpi(dpi));
    }
    encode(pixels, width, height, quality, Some(dpi))
}

fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
    dpi: Option<u16>,
) -> Result<Vec<u8>, EncodeError> {
    validate_buffer(pixels, width, height, 3)?;

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());

    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    if let Some(dpi) = dpi {
        encoder.set_pixel_density(PixelDensity::dpi(dpi));
    }

    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: OutputFormat::Jpg,
            message: e.to_string(),
        })?;

    log::debug!("encoded {}x{} JPEG at quality {}", width, height, quality);
    Ok(buffer.into_inner())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Valid input always produces a complete JPEG stream.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            (width, height) in (1u32..=50, 1u32..=50),
            quality in 0u8..=255,
        ) {
            let pixels = vec![128u8; (width * height * 3) as usize];
            let jpeg_bytes = encode_jpeg(&pixels, width, height, quality).unwrap();

            prop_assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
            let len = jpeg_bytes.len();
            prop_assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9]);
        }

        /// Same input always produces same output.
        #[test]
        fn prop_deterministic_output(
            (width, height) in (1u32..=20, 1u32..=20),
            quality in 1u8..=100,
        ) {
            let pixels = vec![100u8; (width * height * 3) as usize];
            let a = encode_jpeg(&pixels, width, height, quality).unwrap();
            let b = encode_jpeg(&pixels, width, height, quality).unwrap();
            prop_assert_eq!(a, b);
        }

        /// Mismatched pixel data length always returns an error.
        #[test]
        fn prop_invalid_pixel_length_returns_error(
            (width, height) in (1u32..=50, 1u32..=50),
            delta in -10i32..=10,
        ) {
            prop_assume!(delta != 0);

            let expected = (width * height * 3) as usize;
            let actual = if delta > 0 {
                expected + delta as usize
            } else {
                expected.saturating_sub(delta.unsigned_abs() as usize)
            };
            prop_assume!(actual != expected);

            let pixels = vec![128u8; actual];
            prop_assert!(
                matches!(
                    encode_jpeg(&pixels, width, height, 90),
                    Err(EncodeError::InvalidPixelData { .. })
                ),
                "Mismatched pixel data should return InvalidPixelData error"
            );
        }
    }
}
