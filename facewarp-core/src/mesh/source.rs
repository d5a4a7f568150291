use crate::{
    assets::obj::ObjAsset,
    foundation::core::{Point, VertexId},
    mesh::{
        delaunay::triangulate,
        resolve::{check_mesh_triangle, resolve_all},
    },
};

/// Where the triangles that get warped come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriangleSource {
    /// Delaunay triangulation of the destination UV points.
    #[default]
    Delaunay,
    /// The mesh asset's own face records.
    MeshFaces,
    /// Mesh faces when the asset has any, Delaunay otherwise.
    Auto,
}

/// Triangles ready for warping, in the order they must be composited.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleSet {
    /// Resolved triangles in compositing order.
    pub triangles: Vec<[VertexId; 3]>,
    /// Triangles produced before resolution.
    pub generated: usize,
    /// Triangles dropped during resolution.
    pub skipped: usize,
}

impl TriangleSource {
    /// Build the ordered triangle list for `dst_points` (one per vertex).
    #[tracing::instrument(skip(dst_points, asset), fields(points = dst_points.len()))]
    pub fn build(self, dst_points: &[Point], asset: &ObjAsset) -> TriangleSet {
        let use_faces = match self {
            Self::Delaunay => false,
            Self::MeshFaces => true,
            Self::Auto => !asset.faces.is_empty(),
        };

        if use_faces {
            let faces = asset.triangles();
            let generated = faces.len();
            let triangles: Vec<_> = faces
                .into_iter()
                .filter_map(|t| check_mesh_triangle(t, dst_points.len()).ok())
                .collect();
            let skipped = generated - triangles.len();
            return TriangleSet {
                triangles,
                generated,
                skipped,
            };
        }

        let tri = triangulate(dst_points);
        if !tri.duplicates().is_empty() {
            tracing::debug!(
                duplicates = tri.duplicates().len(),
                "coincident destination points were merged"
            );
        }
        let (triangles, skipped) = resolve_all(&tri);
        TriangleSet {
            triangles,
            generated: tri.triangles().len(),
            skipped,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/source.rs"]
mod tests;
