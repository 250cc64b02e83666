//! Tonal adjustments for ID photos.
//!
//! Applies brightness, contrast and saturation to RGB pixel data with the
//! same math as the CSS `brightness()`, `contrast()` and `saturate()` filter
//! functions, so the exported photo matches the live preview.
//!
//! ## Adjustment Order
//! 1. Brightness
//! 2. Contrast
//! 3. Saturation
//!
//! Each slider value in -100..=100 maps to a filter amount of
//! `(value + 100) / 100`, so 0 is the identity and -100 collapses the channel.

use crate::AdjustParams;

/// Apply all adjustments to an image's pixel data in place.
///
/// # Arguments
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `params` - The adjustment values to apply
pub fn apply_adjustments(pixels: &mut [u8], params: &AdjustParams) {
    // Early exit if no adjustments
    if params.is_default() {
        return;
    }

    let brightness = filter_amount(params.brightness);
    let contrast = filter_amount(params.contrast);
    let saturation = filter_amount(params.saturation);

    for chunk in pixels.chunks_exact_mut(3) {
        let mut r = chunk[0] as f32 / 255.0;
        let mut g = chunk[1] as f32 / 255.0;
        let mut b = chunk[2] as f32 / 255.0;

        (r, g, b) = apply_brightness(r, g, b, brightness);
        (r, g, b) = apply_contrast(r, g, b, contrast);
        (r, g, b) = apply_saturation(r, g, b, saturation);

        chunk[0] = to_byte(r);
        chunk[1] = to_byte(g);
        chunk[2] = to_byte(b);
    }
}

/// Slider value (-100..=100) to CSS filter amount.
#[inline]
fn filter_amount(value: f32) -> f32 {
    (value.clamp(-100.0, 100.0) + 100.0) / 100.0
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[inline]
fn clamp3(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    (r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0))
}

/// `brightness(amount)`: linear multiplier.
#[inline]
fn apply_brightness(r: f32, g: f32, b: f32, amount: f32) -> (f32, f32, f32) {
    if amount == 1.0 {
        return (r, g, b);
    }
    clamp3(r * amount, g * amount, b * amount)
}

/// `contrast(amount)`: scale around mid-gray.
///
/// Formula: `output = (input - 0.5) * amount + 0.5`
#[inline]
fn apply_contrast(r: f32, g: f32, b: f32, amount: f32) -> (f32, f32, f32) {
    if amount == 1.0 {
        return (r, g, b);
    }
    let intercept = 0.5 - 0.5 * amount;
    clamp3(
        r * amount + intercept,
        g * amount + intercept,
        b * amount + intercept,
    )
}

/// `saturate(amount)`: the Filter Effects saturation matrix.
#[inline]
fn apply_saturation(r: f32, g: f32, b: f32, s: f32) -> (f32, f32, f32) {
    if s == 1.0 {
        return (r, g, b);
    }
    clamp3(
        (0.213 + 0.787 * s) * r + (0.715 - 0.715 * s) * g + (0.072 - 0.072 * s) * b,
        (0.213 - 0.213 * s) * r + (0.715 + 0.285 * s) * g + (0.072 - 0.072 * s) * b,
        (0.213 - 0.213 * s) * r + (0.715 - 0.715 * s) * g + (0.072 + 0.928 * s) * b,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(brightness: f32, contrast: f32, saturation: f32) -> AdjustParams {
        AdjustParams {
            brightness,
            contrast,
            saturation,
        }
    }

    #[test]
    fn test_identity_is_noop() {
        let original: Vec<u8> = (0..=255).flat_map(|v| [v, 255 - v, v / 2]).collect();
        let mut pixels = original.clone();
        apply_adjustments(&mut pixels, &AdjustParams::default());
        assert_eq!(pixels, original);
    }

    #[test]
    fn test_brightness() {
        let mut pixels = vec![100, 100, 100];
        apply_adjustments(&mut pixels, &params(50.0, 0.0, 0.0));
        assert_eq!(pixels, vec![150, 150, 150]);

        let mut pixels = vec![200, 200, 200];
        apply_adjustments(&mut pixels, &params(-100.0, 0.0, 0.0));
        assert_eq!(pixels, vec![0, 0, 0]);
    }

    #[test]
    fn test_brightness_clamps_at_white() {
        let mut pixels = vec![200, 10, 0];
        apply_adjustments(&mut pixels, &params(100.0, 0.0, 0.0));
        assert_eq!(pixels, vec![255, 20, 0]);
    }

    #[test]
    fn test_contrast_spreads_from_midpoint() {
        let mut pixels = vec![64, 192, 128];
        apply_adjustments(&mut pixels, &params(0.0, 50.0, 0.0));
        assert!(pixels[0] < 64, "Dark channel should get darker");
        assert!(pixels[1] > 192, "Bright channel should get brighter");
    }

    #[test]
    fn test_minimum_contrast_is_mid_gray() {
        let mut pixels = vec![0, 255, 30];
        apply_adjustments(&mut pixels, &params(0.0, -100.0, 0.0));
        assert_eq!(pixels, vec![128, 128, 128]);
    }

    #[test]
    fn test_desaturate_to_gray() {
        let mut pixels = vec![255, 0, 0];
        apply_adjustments(&mut pixels, &params(0.0, 0.0, -100.0));
        assert_eq!(pixels[0], pixels[1]);
        assert_eq!(pixels[1], pixels[2]);
        // Luma weight of red
        assert_eq!(pixels[0], 54);
    }

    #[test]
    fn test_saturation_leaves_gray_alone() {
        let mut pixels = vec![90, 90, 90];
        apply_adjustments(&mut pixels, &params(0.0, 0.0, 80.0));
        assert_eq!(pixels, vec![90, 90, 90]);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let mut a = vec![100, 150, 200];
        let mut b = a.clone();
        apply_adjustments(&mut a, &params(500.0, 0.0, 0.0));
        apply_adjustments(&mut b, &params(100.0, 0.0, 0.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_ignores_trailing_partial_pixel() {
        let mut pixels = vec![100, 100, 100, 7];
        apply_adjustments(&mut pixels, &params(50.0, 0.0, 0.0));
        assert_eq!(pixels, vec![150, 150, 150, 7]);
    }
}
