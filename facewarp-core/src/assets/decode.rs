use std::path::Path;

use anyhow::Context;
use image::RgbImage;

use crate::foundation::error::{FaceWarpResult, ensure_file_exists};

/// Decode encoded image bytes into an RGB8 pixel grid. Alpha is dropped.
pub fn decode_image(bytes: &[u8]) -> FaceWarpResult<RgbImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgb8())
}

/// Read and decode the source photograph.
#[tracing::instrument]
pub fn load_photo(path: &Path) -> FaceWarpResult<RgbImage> {
    ensure_file_exists("photo", path)?;
    let bytes =
        std::fs::read(path).with_context(|| format!("read photo '{}'", path.display()))?;
    let img = decode_image(&bytes)
        .map_err(|e| anyhow::anyhow!("decode photo '{}': {e}", path.display()))?;
    tracing::debug!(width = img.width(), height = img.height(), "decoded photo");
    Ok(img)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
