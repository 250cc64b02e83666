//! ID photo output sizes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a size key is not a known preset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown ID photo size: {0}")]
pub struct ParseSizeError(pub String);

/// Named output size of an ID photo, in pixels at 300 DPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IdPhotoSize {
    /// 1 inch: 295 x 413 px.
    #[default]
    #[serde(rename = "1inch")]
    OneInch,
    /// Large 2 inch: 413 x 626 px.
    #[serde(rename = "2inch-large")]
    TwoInchLarge,
}

impl IdPhotoSize {
    pub const ALL: [IdPhotoSize; 2] = [IdPhotoSize::OneInch, IdPhotoSize::TwoInchLarge];

    pub const fn width(self) -> u32 {
        match self {
            IdPhotoSize::OneInch => 295,
            IdPhotoSize::TwoInchLarge => 413,
        }
    }

    pub const fn height(self) -> u32 {
        match self {
            IdPhotoSize::OneInch => 413,
            IdPhotoSize::TwoInchLarge => 626,
        }
    }

    /// Width divided by height; the crop engine's target ratio.
    pub fn aspect_ratio(self) -> f64 {
        self.width() as f64 / self.height() as f64
    }

    /// Stable key used in file names and by the host UI.
    pub const fn key(self) -> &'static str {
        match self {
            IdPhotoSize::OneInch => "1inch",
            IdPhotoSize::TwoInchLarge => "2inch-large",
        }
    }
}

impl fmt::Display for IdPhotoSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for IdPhotoSize {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IdPhotoSize::ALL
            .into_iter()
            .find(|size| size.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSizeError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        assert_eq!(
            (IdPhotoSize::OneInch.width(), IdPhotoSize::OneInch.height()),
            (295, 413)
        );
        assert_eq!(
            (IdPhotoSize::TwoInchLarge.width(), IdPhotoSize::TwoInchLarge.height()),
            (413, 626)
        );
        assert!((IdPhotoSize::OneInch.aspect_ratio() - 0.714_285).abs() < 1e-5);
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!("1inch".parse(), Ok(IdPhotoSize::OneInch));
        assert_eq!("2INCH-large".parse(), Ok(IdPhotoSize::TwoInchLarge));
        assert!("passport".parse::<IdPhotoSize>().is_err());
        for size in IdPhotoSize::ALL {
            assert_eq!(size.to_string().parse(), Ok(size));
        }
    }
}
