//! Background replacement for ID photos.
//!
//! Segmentation is an external capability: a [`BackgroundRemover`] turns the
//! upload into a transparent cutout. This module composites that cutout over
//! one of the standard ID photo background colors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{decode_rgba, DecodeError, DecodedImage};
use crate::encode::{encode_jpeg, EncodeError};
use crate::transform::flatten_alpha;

/// JPEG quality of a photo with a replaced background.
const REPLACED_QUALITY: u8 = 95;

/// Errors from background replacement.
#[derive(Debug, Error)]
pub enum BackgroundError {
    /// The segmentation backend failed.
    #[error("Background removal failed: {0}")]
    Removal(String),

    /// A raw cutout buffer does not hold `width * height * 4` bytes.
    #[error("Invalid cutout: expected {expected} bytes, got {actual}")]
    InvalidCutout { expected: usize, actual: usize },

    #[error("Failed to decode cutout: {0}")]
    Decode(#[from] DecodeError),

    #[error("Failed to encode photo: {0}")]
    Encode(#[from] EncodeError),
}

/// Error returned when a color key is not a known background.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown background color: {0}")]
pub struct ParseColorError(pub String);

/// Standard ID photo background colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundColor {
    #[default]
    White,
    Red,
    RoyalBlue,
    SkyBlue,
}

impl BackgroundColor {
    pub const ALL: [BackgroundColor; 4] = [
        BackgroundColor::White,
        BackgroundColor::Red,
        BackgroundColor::RoyalBlue,
        BackgroundColor::SkyBlue,
    ];

    pub const fn rgb(self) -> [u8; 3] {
        match self {
            BackgroundColor::White => [255, 255, 255],
            BackgroundColor::Red => [220, 20, 60],
            BackgroundColor::RoyalBlue => [65, 105, 225],
            BackgroundColor::SkyBlue => [135, 206, 235],
        }
    }

    /// CSS hex notation, e.g. `#DC143C`.
    pub const fn hex(self) -> &'static str {
        match self {
            BackgroundColor::White => "#FFFFFF",
            BackgroundColor::Red => "#DC143C",
            BackgroundColor::RoyalBlue => "#4169E1",
            BackgroundColor::SkyBlue => "#87CEEB",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            BackgroundColor::White => "white",
            BackgroundColor::Red => "red",
            BackgroundColor::RoyalBlue => "royal-blue",
            BackgroundColor::SkyBlue => "sky-blue",
        }
    }
}

impl fmt::Display for BackgroundColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for BackgroundColor {
    type Err = ParseColorError;

    /// Accepts the key (`royal-blue`) or the hex value (`#4169e1`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        BackgroundColor::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s) || c.hex().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseColorError(s.to_string()))
    }
}

/// Segmentation backend producing a transparent cutout of the subject.
pub trait BackgroundRemover {
    /// Return an encoded image (typically PNG) whose background is transparent.
    fn remove(&self, image: &[u8]) -> Result<Vec<u8>, String>;
}

/// Blend a raw RGBA cutout over a solid background color.
pub fn composite_on_color(
    cutout: &[u8],
    width: u32,
    height: u32,
    color: BackgroundColor,
) -> Result<DecodedImage, BackgroundError> {
    let expected = (width as usize) * (height as usize) * 4;
    let rgba = image::RgbaImage::from_raw(width, height, cutout.to_vec()).ok_or(
        BackgroundError::InvalidCutout {
            expected,
            actual: cutout.len(),
        },
    )?;
    Ok(DecodedImage::from_rgb_image(flatten_alpha(&rgba, color.rgb())))
}

/// Composite an encoded cutout over `color` and encode the result as JPEG.
pub fn replace_background_from_cutout(
    cutout: &[u8],
    color: BackgroundColor,
) -> Result<Vec<u8>, BackgroundError> {
    let rgba = decode_rgba(cutout)?;
    let (width, height) = rgba.dimensions();
    log::debug!("placing {}x{} cutout on {}", width, height, color);

    let rgb = flatten_alpha(&rgba, color.rgb());
    Ok(encode_jpeg(rgb.as_raw(), width, height, REPLACED_QUALITY)?)
}

/// Replace the background of an upload with a solid color.
pub fn replace_background(
    remover: &dyn BackgroundRemover,
    image: &[u8],
    color: BackgroundColor,
) -> Result<Vec<u8>, BackgroundError> {
    let cutout = remover.remove(image).map_err(BackgroundError::Removal)?;
    replace_background_from_cutout(&cutout, color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::png_bytes;

    /// Keeps the left column, clears everything else.
    struct LeftColumn;

    impl BackgroundRemover for LeftColumn {
        fn remove(&self, image: &[u8]) -> Result<Vec<u8>, String> {
            let mut rgba = decode_rgba(image).map_err(|e| e.to_string())?;
            for (x, _, px) in rgba.enumerate_pixels_mut() {
                if x > 0 {
                    px.0[3] = 0;
                }
            }
            Ok(png_bytes(rgba.width(), rgba.height(), rgba.into_raw()))
        }
    }

    struct Failing;

    impl BackgroundRemover for Failing {
        fn remove(&self, _: &[u8]) -> Result<Vec<u8>, String> {
            Err("model not loaded".to_string())
        }
    }

    #[test]
    fn test_color_table() {
        assert_eq!(BackgroundColor::Red.rgb(), [220, 20, 60]);
        assert_eq!(BackgroundColor::RoyalBlue.hex(), "#4169E1");
        assert_eq!(BackgroundColor::SkyBlue.rgb(), [135, 206, 235]);
        for color in BackgroundColor::ALL {
            let [r, g, b] = color.rgb();
            assert_eq!(color.hex(), format!("#{r:02X}{g:02X}{b:02X}"));
            assert_eq!(color.to_string().parse(), Ok(color));
        }
        assert_eq!("#87ceeb".parse(), Ok(BackgroundColor::SkyBlue));
        assert!("green".parse::<BackgroundColor>().is_err());
    }

    #[test]
    fn test_composite_on_color() {
        let cutout = [10, 20, 30, 255, 10, 20, 30, 0];
        let img = composite_on_color(&cutout, 2, 1, BackgroundColor::Red).unwrap();
        assert_eq!(img.pixels, vec![10, 20, 30, 220, 20, 60]);

        assert!(matches!(
            composite_on_color(&cutout, 3, 1, BackgroundColor::Red),
            Err(BackgroundError::InvalidCutout { expected: 12, actual: 8 })
        ));
    }

    #[test]
    fn test_replace_background() {
        let src = png_bytes(32, 32, [0u8, 0, 0, 255].repeat(32 * 32));
        let out = replace_background(&LeftColumn, &src, BackgroundColor::White).unwrap();

        let decoded = image::load_from_memory(&out).unwrap().into_rgb8();
        assert_eq!(decoded.dimensions(), (32, 32));
        let [r, g, b] = decoded.get_pixel(20, 16).0;
        assert!(r > 240 && g > 240 && b > 240);
    }

    #[test]
    fn test_removal_failure() {
        let err = replace_background(&Failing, &[], BackgroundColor::Red).unwrap_err();
        assert_eq!(err.to_string(), "Background removal failed: model not loaded");
    }
}
