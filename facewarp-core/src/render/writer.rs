use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::error::{FaceWarpError, FaceWarpResult},
    render::composite::TextureImage,
};

/// Encode `texture` to `path`, creating parent directories as needed.
///
/// The container is picked from the extension; a path without one is written as PNG.
#[tracing::instrument(skip(texture), fields(path = %path.display()))]
pub fn save_texture(texture: &TextureImage, path: &Path) -> FaceWarpResult<()> {
    let format = texture_format(path)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    texture
        .as_image()
        .save_with_format(path, format)
        .with_context(|| format!("write texture '{}'", path.display()))?;
    tracing::debug!(?format, "texture written");
    Ok(())
}

/// Container format for a texture written to `path`.
pub(crate) fn texture_format(path: &Path) -> FaceWarpResult<image::ImageFormat> {
    match path.extension() {
        None => Ok(image::ImageFormat::Png),
        Some(ext) => image::ImageFormat::from_extension(ext).ok_or_else(|| {
            FaceWarpError::validation(format!(
                "unsupported texture extension '{}'",
                ext.to_string_lossy()
            ))
        }),
    }
}

/// Encode `texture` as PNG bytes.
pub fn encode_png(texture: &TextureImage) -> FaceWarpResult<Vec<u8>> {
    let mut out = std::io::Cursor::new(Vec::new());
    texture
        .as_image()
        .write_to(&mut out, image::ImageFormat::Png)
        .context("encode png")?;
    Ok(out.into_inner())
}

#[cfg(test)]
#[path = "../../tests/unit/render/writer.rs"]
mod tests;
