use image::{GrayImage, Luma};

use crate::foundation::{core::Point, math::orient2d};

/// Mask value marking a pixel inside the triangle.
pub const INSIDE: u8 = 255;

/// Distance in pixels a sample point may sit outside an edge and still count as inside,
/// so pixels touched by an edge are filled the way a scanline fill includes its border.
const EDGE_TOLERANCE_PX: f64 = 0.5;

/// Rasterize `tri` (in local pixel coordinates) into a `width` x `height` binary mask.
///
/// Pixel `(x, y)` is sampled at the integer point `(x, y)`, matching how the warp
/// samples the source. Zero-area triangles produce an empty mask.
pub fn fill_triangle_mask(tri: [Point; 3], width: u32, height: u32) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    let area2 = orient2d(tri[0], tri[1], tri[2]);
    if area2 == 0.0 || !area2.is_finite() {
        return mask;
    }
    let sign = area2.signum();

    let edges = [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])];
    let lengths = edges.map(|(a, b)| (b - a).hypot());

    for y in 0..height {
        for x in 0..width {
            let p = Point::new(f64::from(x), f64::from(y));
            let inside = edges.iter().zip(&lengths).all(|(&(a, b), &len)| {
                sign * orient2d(a, b, p) >= -EDGE_TOLERANCE_PX * len
            });
            if inside {
                mask.put_pixel(x, y, Luma([INSIDE]));
            }
        }
    }
    mask
}

#[cfg(test)]
#[path = "../../tests/unit/warp/raster.rs"]
mod tests;
