use crate::{
    assets::obj::ObjAsset,
    foundation::{
        core::{Point, TextureSize, Uv, VertexId},
        error::{FaceWarpError, FaceWarpResult},
    },
};

/// How vertices are paired with `vt` records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UvMapping {
    /// Use the first `v/vt` pairing found in the face records; unpaired vertices get `(0, 0)`.
    #[default]
    FaceAssociation,
    /// Vertex `i` takes the `i`-th `vt` record. Requires at least `N` records.
    Positional,
}

/// One UV coordinate per mesh vertex, fixed at `N` entries for the whole run.
#[derive(Clone, Debug, PartialEq)]
pub struct UvAtlas {
    uvs: Vec<Uv>,
    resolved: usize,
}

impl UvAtlas {
    /// Build an atlas of exactly `vertex_count` entries from a parsed asset.
    pub fn from_asset(
        asset: &ObjAsset,
        vertex_count: usize,
        mapping: UvMapping,
    ) -> FaceWarpResult<Self> {
        match mapping {
            UvMapping::FaceAssociation => {
                let assoc = asset.first_tex_association(vertex_count);
                let mut resolved = 0;
                let uvs = assoc
                    .into_iter()
                    .map(|tex| match tex {
                        Some(t) => {
                            resolved += 1;
                            asset.tex_coords[t as usize]
                        }
                        None => Uv::ZERO,
                    })
                    .collect();
                Ok(Self { uvs, resolved })
            }
            UvMapping::Positional => {
                if asset.tex_coords.len() < vertex_count {
                    return Err(FaceWarpError::malformed(format!(
                        "positional uv mapping needs {vertex_count} texture coordinates, found {}",
                        asset.tex_coords.len()
                    )));
                }
                Ok(Self {
                    uvs: asset.tex_coords[..vertex_count].to_vec(),
                    resolved: vertex_count,
                })
            }
        }
    }

    /// Build an atlas directly from per-vertex UVs.
    pub fn from_uvs(uvs: Vec<Uv>) -> Self {
        let resolved = uvs.len();
        Self { uvs, resolved }
    }

    /// Number of vertices, always the `vertex_count` the atlas was built for.
    pub fn len(&self) -> usize {
        self.uvs.len()
    }

    /// True for a zero-vertex atlas.
    pub fn is_empty(&self) -> bool {
        self.uvs.is_empty()
    }

    /// Number of vertices that received a UV from the asset rather than the default.
    pub fn resolved_count(&self) -> usize {
        self.resolved
    }

    /// UV of vertex `v`, `None` past the end.
    pub fn get(&self, v: VertexId) -> Option<Uv> {
        self.uvs.get(v.index()).copied()
    }

    /// All UVs in vertex order.
    pub fn uvs(&self) -> &[Uv] {
        &self.uvs
    }

    /// Destination (canvas) position of every vertex.
    pub fn canvas_points(&self, size: TextureSize) -> Vec<Point> {
        self.uvs.iter().map(|&uv| size.uv_to_pixel(uv)).collect()
    }

    /// Flat `[u0, v0, u1, v1, ...]` buffer, exactly `2 * N` values.
    pub fn to_flat(&self) -> Vec<f64> {
        self.uvs.iter().flat_map(|uv| [uv.u, uv.v]).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/atlas.rs"]
mod tests;
