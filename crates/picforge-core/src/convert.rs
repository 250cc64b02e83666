//! Format conversion between the accepted upload formats and JPG/PNG/WebP.

use thiserror::Error;

use crate::config::EditorConfig;
use crate::decode::{decode_rgba, DecodeError};
use crate::encode::{encode_jpeg, encode_png_rgba, encode_webp_rgb, EncodeError, OutputFormat};
use crate::transform::flatten_alpha;

/// Canvas color behind transparent pixels for formats without alpha.
const OPAQUE_BACKGROUND: [u8; 3] = [255, 255, 255];

/// Errors from [`convert_image`].
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to decode source image: {0}")]
    Decode(#[from] DecodeError),

    #[error("Failed to encode converted image: {0}")]
    Encode(#[from] EncodeError),
}

/// Convert an uploaded image to `format`.
///
/// PNG output keeps transparency; JPG and WebP output is flattened onto
/// white. JPG uses `config.convert_quality`.
pub fn convert_image(
    bytes: &[u8],
    format: OutputFormat,
    config: &EditorConfig,
) -> Result<Vec<u8>, ConvertError> {
    let rgba = decode_rgba(bytes)?;
    let (width, height) = rgba.dimensions();
    log::debug!("converting {}x{} image to {}", width, height, format);

    let encoded = match format {
        OutputFormat::Png => encode_png_rgba(rgba.as_raw(), width, height)?,
        OutputFormat::Jpg => {
            let rgb = flatten_alpha(&rgba, OPAQUE_BACKGROUND);
            encode_jpeg(rgb.as_raw(), width, height, config.convert_quality)?
        }
        OutputFormat::Webp => {
            let rgb = flatten_alpha(&rgba, OPAQUE_BACKGROUND);
            encode_webp_rgb(rgb.as_raw(), width, height)?
        }
    };

    Ok(encoded)
}

/// Download name of a converted file: the extension after the last dot is
/// replaced, and a name without one (or with only a leading dot) is kept
/// whole.
///
/// ```
/// use picforge_core::{converted_file_name, OutputFormat};
///
/// assert_eq!(converted_file_name("photo.test.png", OutputFormat::Jpg), "photo.test.jpg");
/// ```
pub fn converted_file_name(name: &str, format: OutputFormat) -> String {
    format!("{}.{}", file_stem(name), format.extension())
}

/// Name without its last extension. Leading-dot names have no extension.
pub(crate) fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    }
}
