use image::RgbImage;

use crate::foundation::core::{PixelRect, Point};

/// Bilinear RGB sample of `image` restricted to `crop`.
///
/// `p` is in crop-local coordinates with pixel `(x, y)` at the integer point `(x, y)`.
/// Neighbours outside the crop or the image read as black.
pub(crate) fn sample_bilinear(image: &RgbImage, crop: PixelRect, p: Point) -> [u8; 3] {
    if !p.is_finite() {
        return [0; 3];
    }
    let x0 = p.x.floor();
    let y0 = p.y.floor();
    let fx = p.x - x0;
    let fy = p.y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let taps = [
        (x0, y0, (1.0 - fx) * (1.0 - fy)),
        (x0 + 1, y0, fx * (1.0 - fy)),
        (x0, y0 + 1, (1.0 - fx) * fy),
        (x0 + 1, y0 + 1, fx * fy),
    ];

    let mut acc = [0.0f64; 3];
    for (x, y, w) in taps {
        if w == 0.0 {
            continue;
        }
        let px = fetch(image, crop, x, y);
        for c in 0..3 {
            acc[c] += w * f64::from(px[c]);
        }
    }
    acc.map(|v| v.round().clamp(0.0, 255.0) as u8)
}

fn fetch(image: &RgbImage, crop: PixelRect, x: i64, y: i64) -> [u8; 3] {
    if x < 0 || y < 0 || x >= i64::from(crop.width) || y >= i64::from(crop.height) {
        return [0; 3];
    }
    let (ix, iy) = (crop.x + x, crop.y + y);
    if ix < 0 || iy < 0 || ix >= i64::from(image.width()) || iy >= i64::from(image.height()) {
        return [0; 3];
    }
    image.get_pixel(ix as u32, iy as u32).0
}

#[cfg(test)]
#[path = "../../tests/unit/warp/sample.rs"]
mod tests;
