use image::{GrayImage, Rgb, RgbImage};

use crate::{
    foundation::{
        core::{PixelRect, Point},
        error::{FaceWarpError, FaceWarpResult},
        math::is_collinear,
    },
    warp::{
        affine::triangle_affine,
        raster::{INSIDE, fill_triangle_mask},
        sample::sample_bilinear,
    },
};

/// Largest destination box a single triangle may cover (an 8192 x 8192 texture).
pub const MAX_PATCH_PIXELS: usize = 1 << 26;

/// Warped pixels of one triangle, positioned in canvas space.
///
/// `pixels` and `mask` both cover `rect`; pixels outside the triangle are black and
/// their mask value is zero.
#[derive(Clone, Debug, PartialEq)]
pub struct WarpedPatch {
    /// Canvas-space box the patch covers.
    pub rect: PixelRect,
    /// Warped pixels, black outside the triangle.
    pub pixels: RgbImage,
    /// Non-zero inside the triangle.
    pub mask: GrayImage,
}

impl WarpedPatch {
    /// Canvas-space pixel position of the patch's top-left corner.
    pub fn offset(&self) -> (i64, i64) {
        (self.rect.x, self.rect.y)
    }

    /// Whether local pixel `(x, y)` is inside the triangle.
    pub fn is_inside(&self, x: u32, y: u32) -> bool {
        self.mask.get_pixel(x, y).0[0] != 0
    }

    /// Number of mask pixels set.
    pub fn coverage(&self) -> usize {
        self.mask.pixels().filter(|p| p.0[0] != 0).count()
    }
}

/// Warp the `src` triangle of `image` onto the `dst` triangle in canvas space.
///
/// Both triangles are taken relative to their own pixel bounding boxes, the source is
/// cropped to its box, and every destination-box pixel inside `dst` is filled by
/// mapping it back into the crop and sampling bilinearly.
pub fn warp_triangle(image: &RgbImage, src: [Point; 3], dst: [Point; 3]) -> FaceWarpResult<WarpedPatch> {
    if src.iter().chain(&dst).any(|p| !p.is_finite()) {
        return Err(FaceWarpError::degenerate(format!(
            "non-finite corners {src:?} -> {dst:?}"
        )));
    }
    if is_collinear(dst[0], dst[1], dst[2]) {
        return Err(FaceWarpError::degenerate(format!(
            "collinear destination corners {dst:?}"
        )));
    }

    let dst_rect = PixelRect::bounding(&dst)
        .filter(|r| r.pixel_count() <= MAX_PATCH_PIXELS)
        .ok_or_else(|| {
            FaceWarpError::degenerate(format!("destination box of {dst:?} is too large"))
        })?;
    let src_rect = PixelRect::bounding(&src).ok_or_else(|| {
        FaceWarpError::degenerate(format!("source box of {src:?} is out of range"))
    })?;
    let dst_origin = dst_rect.origin().to_vec2();
    let src_origin = src_rect.origin().to_vec2();
    let dst_local = dst.map(|p| p - dst_origin);
    let src_local = src.map(|p| p - src_origin);

    // Source-to-destination transform; sampling walks it backwards.
    let forward = triangle_affine(src_local, dst_local)?;
    let backward = forward.inverse();

    let mask = fill_triangle_mask(dst_local, dst_rect.width, dst_rect.height);
    let mut pixels = RgbImage::new(dst_rect.width, dst_rect.height);
    for (x, y, m) in mask.enumerate_pixels() {
        if m.0[0] != INSIDE {
            continue;
        }
        let at = backward * Point::new(f64::from(x), f64::from(y));
        pixels.put_pixel(x, y, Rgb(sample_bilinear(image, src_rect, at)));
    }

    Ok(WarpedPatch {
        rect: dst_rect,
        pixels,
        mask,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/warp/patch.rs"]
mod tests;
