//! ID photo export pipeline.
//!
//! Decodes the upload, crops it to the editor rectangle, applies the tonal
//! adjustments, scales to the preset's exact pixel size and writes a JPEG
//! tagged with the configured print density.

use thiserror::Error;

use crate::adjustments::apply_adjustments;
use crate::config::{ConfigError, EditorConfig};
use crate::convert::file_stem;
use crate::decode::{decode_image, resize, DecodeError, FilterType};
use crate::encode::{encode_jpeg_with_dpi, set_jpeg_dpi, EncodeError};
use crate::geometry::CropRect;
use crate::size::IdPhotoSize;
use crate::transform::apply_crop;
use crate::AdjustParams;

/// Errors from the ID photo pipeline.
#[derive(Debug, Error)]
pub enum IdPhotoError {
    #[error("Invalid editor configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to decode photo: {0}")]
    Decode(#[from] DecodeError),

    #[error("Failed to encode photo: {0}")]
    Encode(#[from] EncodeError),
}

/// Render the final ID photo.
///
/// `crop` is in natural image pixels. It is clamped the way the export has
/// always clamped it: the origin to the last pixel row and column, the size
/// to what remains of the image.
///
/// Adjustments are per-pixel, so cropping before adjusting yields the same
/// pixels as adjusting the full image first.
pub fn process_id_photo(
    bytes: &[u8],
    size: IdPhotoSize,
    crop: &CropRect,
    adjust: &AdjustParams,
    config: &EditorConfig,
) -> Result<Vec<u8>, IdPhotoError> {
    config.validate()?;

    let image = decode_image(bytes)?;
    log::debug!(
        "exporting {} photo from {}x{} source, crop {:?}",
        size,
        image.width,
        image.height,
        crop
    );

    let mut cropped = apply_crop(&image, crop);
    apply_adjustments(&mut cropped.pixels, adjust);

    let scaled = resize(&cropped, size.width(), size.height(), FilterType::Lanczos3)?;

    let jpeg = encode_jpeg_with_dpi(
        &scaled.pixels,
        scaled.width,
        scaled.height,
        config.id_photo_quality,
        config.output_dpi,
    )?;
    Ok(jpeg)
}

/// Download name of an exported photo: `"<stem>_<size key>.jpg"`.
pub fn id_photo_file_name(name: &str, size: IdPhotoSize) -> String {
    format!("{}_{}.jpg", file_stem(name), size.key())
}

/// Tag an uploaded JPEG with `dpi` before it enters the editor.
///
/// Anything that cannot be tagged (PNG, WebP, a broken stream) is passed
/// through unchanged.
pub fn prepare_upload(bytes: &[u8], dpi: u16) -> Vec<u8> {
    match set_jpeg_dpi(bytes, dpi) {
        Ok(tagged) => tagged,
        Err(err) => {
            log::warn!("could not set upload density, using original bytes: {}", err);
            bytes.to_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{png_bytes, MINIMAL_JPEG};
    use crate::encode::{encode_jpeg, jpeg_density};

    fn sample_jpeg(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 90]);
            }
        }
        encode_jpeg(&pixels, width, height, 90).unwrap()
    }

    #[test]
    fn test_output_matches_preset() {
        let src = sample_jpeg(800, 600);
        let crop = CropRect::new(214.29, 100.0, 285.71, 400.0);

        for size in IdPhotoSize::ALL {
            let out = process_id_photo(
                &src,
                size,
                &crop,
                &AdjustParams::default(),
                &EditorConfig::default(),
            )
            .unwrap();

            let decoded = image::load_from_memory(&out).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (size.width(), size.height()));
            assert_eq!(jpeg_density(&out), Some((300, 300)));
        }
    }

    #[test]
    fn test_configured_density() {
        let mut config = EditorConfig::default();
        config.output_dpi = 600;
        let out = process_id_photo(
            &sample_jpeg(100, 140),
            IdPhotoSize::OneInch,
            &CropRect::new(0.0, 0.0, 100.0, 140.0),
            &AdjustParams::default(),
            &config,
        )
        .unwrap();
        assert_eq!(jpeg_density(&out), Some((600, 600)));
    }

    #[test]
    fn test_crop_outside_image_is_clamped() {
        let out = process_id_photo(
            &sample_jpeg(100, 100),
            IdPhotoSize::OneInch,
            &CropRect::new(250.0, -30.0, 500.0, 700.0),
            &AdjustParams::default(),
            &EditorConfig::default(),
        )
        .unwrap();
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (295, 413));
    }

    #[test]
    fn test_adjustments_reach_output() {
        let src = png_bytes(10, 14, [100u8, 100, 100, 255].repeat(10 * 14));
        let crop = CropRect::new(0.0, 0.0, 10.0, 14.0);

        let mut brighter = AdjustParams::default();
        brighter.brightness = 50.0;
        let out = process_id_photo(
            &src,
            IdPhotoSize::OneInch,
            &crop,
            &brighter,
            &EditorConfig::default(),
        )
        .unwrap();

        let decoded = image::load_from_memory(&out).unwrap().into_rgb8();
        let [r, g, b] = decoded.get_pixel(147, 206).0;
        for channel in [r, g, b] {
            assert!((channel as i32 - 150).abs() <= 3, "got {channel}");
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EditorConfig::default();
        config.id_photo_quality = 0;
        let err = process_id_photo(
            MINIMAL_JPEG,
            IdPhotoSize::OneInch,
            &CropRect::new(0.0, 0.0, 1.0, 1.0),
            &AdjustParams::default(),
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, IdPhotoError::Config(_)));
    }

    #[test]
    fn test_bad_upload() {
        let err = process_id_photo(
            b"not an image",
            IdPhotoSize::OneInch,
            &CropRect::new(0.0, 0.0, 1.0, 1.0),
            &AdjustParams::default(),
            &EditorConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, IdPhotoError::Decode(_)));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            id_photo_file_name("IMG_0042.HEIC.jpg", IdPhotoSize::OneInch),
            "IMG_0042.HEIC_1inch.jpg"
        );
        assert_eq!(
            id_photo_file_name("portrait", IdPhotoSize::TwoInchLarge),
            "portrait_2inch-large.jpg"
        );
    }

    #[test]
    fn test_prepare_upload() {
        let tagged = prepare_upload(MINIMAL_JPEG, 300);
        assert_eq!(jpeg_density(&tagged), Some((300, 300)));

        let png = png_bytes(1, 1, vec![0, 0, 0, 255]);
        assert_eq!(prepare_upload(&png, 300), png);
    }
}
