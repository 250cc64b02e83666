//! JFIF pixel density of existing JPEG streams.
//!
//! Uploaded ID photos are re-tagged in place, without re-encoding, so the
//! compressed image data is untouched.

use super::EncodeError;

const SOI: [u8; 2] = [0xFF, 0xD8];
const APP0: u8 = 0xE0;
const SOS: u8 = 0xDA;
const JFIF_ID: &[u8; 5] = b"JFIF\0";

/// Units byte for dots per inch.
const UNITS_DPI: u8 = 1;
/// Units byte for dots per centimeter.
const UNITS_DPCM: u8 = 2;

/// Offsets inside an APP0 segment, counted from its marker.
const UNITS_OFFSET: usize = 11;
const X_DENSITY_OFFSET: usize = 12;
const Y_DENSITY_OFFSET: usize = 14;

/// Set the JFIF density of a JPEG to `dpi` x `dpi` dots per inch.
///
/// An existing JFIF APP0 segment is patched; otherwise a new one is inserted
/// right after the SOI marker.
///
/// # Errors
///
/// Returns `EncodeError::NotJpeg` if `bytes` does not start with SOI and
/// `EncodeError::InvalidDpi` if `dpi` is zero.
pub fn set_jpeg_dpi(bytes: &[u8], dpi: u16) -> Result<Vec<u8>, EncodeError> {
    if dpi == 0 {
        return Err(EncodeError::InvalidDpi(dpi));
    }
    if !bytes.starts_with(&SOI) {
        return Err(EncodeError::NotJpeg);
    }

    let Some(at) = find_jfif(bytes) else {
        log::trace!("no JFIF segment, inserting one");
        let mut out = Vec::with_capacity(bytes.len() + 18);
        out.extend_from_slice(&SOI);
        out.extend_from_slice(&jfif_segment(dpi));
        out.extend_from_slice(&bytes[2..]);
        return Ok(out);
    };

    let mut out = bytes.to_vec();
    out[at + UNITS_OFFSET] = UNITS_DPI;
    out[at + X_DENSITY_OFFSET..at + X_DENSITY_OFFSET + 2].copy_from_slice(&dpi.to_be_bytes());
    out[at + Y_DENSITY_OFFSET..at + Y_DENSITY_OFFSET + 2].copy_from_slice(&dpi.to_be_bytes());
    Ok(out)
}

/// Read the JFIF density of a JPEG in dots per inch.
///
/// Returns `None` when there is no JFIF segment or it only records an
/// aspect ratio.
pub fn jpeg_density(bytes: &[u8]) -> Option<(u16, u16)> {
    let at = find_jfif(bytes)?;
    let x = u16::from_be_bytes([bytes[at + X_DENSITY_OFFSET], bytes[at + X_DENSITY_OFFSET + 1]]);
    let y = u16::from_be_bytes([bytes[at + Y_DENSITY_OFFSET], bytes[at + Y_DENSITY_OFFSET + 1]]);

    match bytes[at + UNITS_OFFSET] {
        UNITS_DPI => Some((x, y)),
        UNITS_DPCM => Some((dpcm_to_dpi(x), dpcm_to_dpi(y))),
        _ => None,
    }
}

fn dpcm_to_dpi(v: u16) -> u16 {
    (v as f64 * 2.54).round().min(u16::MAX as f64) as u16
}

/// Offset of the first JFIF APP0 marker before the scan data.
fn find_jfif(bytes: &[u8]) -> Option<usize> {
    if !bytes.starts_with(&SOI) {
        return None;
    }

    let mut pos = 2;
    while pos + 4 <= bytes.len() {
        if bytes[pos] != 0xFF {
            return None;
        }
        let marker = bytes[pos + 1];
        if marker == 0xFF {
            // Fill byte
            pos += 1;
            continue;
        }
        if marker == SOS {
            return None;
        }

        let len = u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]) as usize;
        if len < 2 || pos + 2 + len > bytes.len() {
            return None;
        }

        let payload = &bytes[pos + 4..pos + 2 + len];
        if marker == APP0 && payload.len() >= 14 && payload.starts_with(JFIF_ID) {
            return Some(pos);
        }
        pos += 2 + len;
    }
    None
}

fn jfif_segment(dpi: u16) -> Vec<u8> {
    let [hi, lo] = dpi.to_be_bytes();
    let mut segment = vec![0xFF, APP0, 0x00, 0x10];
    segment.extend_from_slice(JFIF_ID);
    // Version 1.01, units, X and Y density, no thumbnail
    segment.extend_from_slice(&[0x01, 0x01, UNITS_DPI, hi, lo, hi, lo, 0x00, 0x00]);
    segment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::MINIMAL_JPEG;

    #[test]
    fn test_patch_existing_jfif() {
        // The fixture carries a JFIF header with a 1:1 aspect ratio
        assert_eq!(jpeg_density(MINIMAL_JPEG), None);

        let tagged = set_jpeg_dpi(MINIMAL_JPEG, 300).unwrap();
        assert_eq!(tagged.len(), MINIMAL_JPEG.len());
        assert_eq!(jpeg_density(&tagged), Some((300, 300)));
        assert!(image::load_from_memory(&tagged).is_ok());
    }

    #[test]
    fn test_insert_when_missing() {
        // Drop the APP0 segment (2 marker bytes + 16 length bytes)
        let mut bare = SOI.to_vec();
        bare.extend_from_slice(&MINIMAL_JPEG[20..]);
        assert_eq!(jpeg_density(&bare), None);

        let tagged = set_jpeg_dpi(&bare, 350).unwrap();
        assert_eq!(tagged.len(), bare.len() + 18);
        assert_eq!(jpeg_density(&tagged), Some((350, 350)));
        assert!(image::load_from_memory(&tagged).is_ok());
    }

    #[test]
    fn test_retag_is_stable() {
        let once = set_jpeg_dpi(MINIMAL_JPEG, 300).unwrap();
        let twice = set_jpeg_dpi(&once, 300).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_centimeter_units() {
        let mut bytes = set_jpeg_dpi(MINIMAL_JPEG, 118).unwrap();
        bytes[2 + UNITS_OFFSET] = UNITS_DPCM;
        assert_eq!(jpeg_density(&bytes), Some((300, 300)));
    }

    #[test]
    fn test_rejects_non_jpeg() {
        assert!(matches!(
            set_jpeg_dpi(b"\x89PNG\r\n", 300),
            Err(EncodeError::NotJpeg)
        ));
        assert!(matches!(
            set_jpeg_dpi(MINIMAL_JPEG, 0),
            Err(EncodeError::InvalidDpi(0))
        ));
        assert_eq!(jpeg_density(&[0xFF, 0xD8, 0xFF]), None);
    }
}
