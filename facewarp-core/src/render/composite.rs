use image::RgbImage;

use crate::{foundation::core::TextureSize, warp::patch::WarpedPatch};

/// Output texture canvas. Starts fully black and is only changed by compositing.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureImage {
    pixels: RgbImage,
}

impl TextureImage {
    /// All-black canvas of `size`.
    pub fn new(size: TextureSize) -> Self {
        Self {
            pixels: RgbImage::new(size.width, size.height),
        }
    }

    /// Canvas resolution.
    pub fn size(&self) -> TextureSize {
        TextureSize {
            width: self.pixels.width(),
            height: self.pixels.height(),
        }
    }

    /// Borrow the pixels.
    pub fn as_image(&self) -> &RgbImage {
        &self.pixels
    }

    /// Take the pixels.
    pub fn into_image(self) -> RgbImage {
        self.pixels
    }

    /// Count of pixels that differ from the black background.
    pub fn painted_pixels(&self) -> usize {
        self.pixels.pixels().filter(|p| p.0 != [0, 0, 0]).count()
    }

    /// Copy the patch's non-black, in-triangle pixels over the canvas.
    ///
    /// Later patches overwrite earlier content but never erase it with black. Parts of
    /// the patch outside the canvas are clipped. Returns the number of pixels written.
    ///
    /// The black test is per pixel: a patch pixel such as `[200, 0, 0]` replaces all three
    /// canvas channels, including the zero one. A per-channel select would instead keep
    /// the canvas value in that channel.
    pub fn composite(&mut self, patch: &WarpedPatch) -> usize {
        let (ox, oy) = patch.offset();
        let (cw, ch) = (i64::from(self.pixels.width()), i64::from(self.pixels.height()));
        let mut written = 0usize;

        for (x, y, px) in patch.pixels.enumerate_pixels() {
            if px.0 == [0, 0, 0] || !patch.is_inside(x, y) {
                continue;
            }
            let (cx, cy) = (ox + i64::from(x), oy + i64::from(y));
            if cx < 0 || cy < 0 || cx >= cw || cy >= ch {
                continue;
            }
            self.pixels.put_pixel(cx as u32, cy as u32, *px);
            written += 1;
        }
        written
    }
}

/// Apply `patches` to `canvas` in iteration order; returns total pixels written.
pub fn composite_in_order<'a>(
    canvas: &mut TextureImage,
    patches: impl IntoIterator<Item = &'a WarpedPatch>,
) -> usize {
    patches.into_iter().map(|p| canvas.composite(p)).sum()
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
