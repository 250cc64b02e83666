//! Alpha compositing onto a solid color.

use image::{Rgb, RgbImage, RgbaImage};

/// Composite an RGBA image over an opaque `background` color.
///
/// Uses straight (non-premultiplied) alpha, the way canvas `drawImage`
/// blends a cutout over a filled rectangle.
pub fn flatten_alpha(image: &RgbaImage, background: [u8; 3]) -> RgbImage {
    let (width, height) = image.dimensions();
    let mut out = RgbImage::new(width, height);

    for (src, dst) in image.pixels().zip(out.pixels_mut()) {
        let [r, g, b, a] = src.0;
        *dst = Rgb([
            blend(r, background[0], a),
            blend(g, background[1], a),
            blend(b, background[2], a),
        ]);
    }

    out
}

#[inline]
fn blend(fg: u8, bg: u8, alpha: u8) -> u8 {
    match alpha {
        255 => fg,
        0 => bg,
        a => {
            let a = a as u32;
            ((fg as u32 * a + bg as u32 * (255 - a) + 127) / 255) as u8
        }
    }
}
