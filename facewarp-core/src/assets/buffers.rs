use std::{fmt::Write as _, path::Path};

use anyhow::Context;

use crate::{
    assets::{
        atlas::{UvAtlas, UvMapping},
        obj::ObjAsset,
    },
    foundation::error::{FaceWarpError, FaceWarpResult},
};

/// Flat buffers a rendering client consumes alongside the baked texture.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeshBuffers {
    /// Triangle vertex indices, three per triangle.
    #[serde(rename = "triangulation")]
    pub indices: Vec<u32>,
    /// Per-vertex UVs, two per vertex, exactly `N` vertices.
    pub uvs: Vec<f64>,
}

/// Serialization target for [`MeshBuffers`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferFormat {
    /// ES module with `TRIANGULATION` and `UVS` constants.
    Module,
    /// JSON object with `triangulation` and `uvs` arrays.
    Json,
}

impl BufferFormat {
    /// Detect format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "ts" | "js" | "mjs" => Some(Self::Module),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Detect format from a file path.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

impl MeshBuffers {
    /// Collect the index buffer from the asset's faces and a first-association UV buffer.
    pub fn from_asset(asset: &ObjAsset, vertex_count: usize) -> FaceWarpResult<Self> {
        let atlas = UvAtlas::from_asset(asset, vertex_count, UvMapping::FaceAssociation)?;
        let indices = asset
            .triangles()
            .into_iter()
            .flat_map(|tri| tri.map(|v| v.0))
            .collect();
        Ok(Self {
            indices,
            uvs: atlas.to_flat(),
        })
    }

    /// Number of index triples.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Render as an ES module exporting `TRIANGULATION` and `UVS`.
    pub fn to_module_source(&self) -> String {
        let mut out = String::new();
        out.push_str("export const TRIANGULATION = [\n");
        push_joined(&mut out, &self.indices);
        out.push_str("\n];\n\nexport const UVS = [\n");
        push_joined(&mut out, &self.uvs);
        out.push_str("\n];\n");
        out
    }

    /// Render as a JSON object.
    pub fn to_json(&self) -> FaceWarpResult<String> {
        serde_json::to_string(self)
            .map_err(|e| FaceWarpError::Other(anyhow::anyhow!("serialize mesh buffers: {e}")))
    }

    /// Render in `format`.
    pub fn render(&self, format: BufferFormat) -> FaceWarpResult<String> {
        match format {
            BufferFormat::Module => Ok(self.to_module_source()),
            BufferFormat::Json => self.to_json(),
        }
    }

    /// Render for `path`, picking the format from its extension.
    pub fn render_for_path(&self, path: &Path) -> FaceWarpResult<String> {
        self.render(buffer_format_for(path)?)
    }

    /// Write buffers to `path`, picking the format from its extension.
    pub fn save(&self, path: &Path) -> FaceWarpResult<()> {
        let text = self.render_for_path(path)?;
        write_rendered(path, &text)
    }
}

pub(crate) fn buffer_format_for(path: &Path) -> FaceWarpResult<BufferFormat> {
    BufferFormat::from_path(path).ok_or_else(|| {
        FaceWarpError::validation(format!(
            "unsupported buffer output extension for '{}' (expected .ts, .js, .mjs or .json)",
            path.display()
        ))
    })
}

/// Write already-rendered buffer text, creating parent directories.
pub(crate) fn write_rendered(path: &Path, text: &str) -> FaceWarpResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, text)
        .with_context(|| format!("write mesh buffers '{}'", path.display()))?;
    Ok(())
}

fn push_joined<T: std::fmt::Debug>(out: &mut String, values: &[T]) {
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{v:?}");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/buffers.rs"]
mod tests;
