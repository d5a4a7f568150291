use crate::{
    foundation::{
        core::VertexId,
        error::{FaceWarpError, FaceWarpResult},
    },
    mesh::delaunay::{RawTriangle, Triangulation},
};

/// Map a triangulation triangle's handles to mesh vertex identities.
///
/// Fails with [`FaceWarpError::DegenerateTriangle`] when any corner is a seeding
/// rectangle corner or the corners are not three distinct vertices.
pub fn resolve_triangle(raw: RawTriangle, input_count: usize) -> FaceWarpResult<[VertexId; 3]> {
    if let Some(&h) = raw.iter().find(|&&h| h >= input_count) {
        return Err(FaceWarpError::degenerate(format!(
            "corner {h} of {raw:?} is on the bounding rectangle"
        )));
    }
    check_distinct(raw.map(VertexId::new))
}

/// Check a vertex triple is usable: three distinct indices, all below `vertex_count`.
pub fn check_mesh_triangle(tri: [VertexId; 3], vertex_count: usize) -> FaceWarpResult<[VertexId; 3]> {
    if let Some(v) = tri.iter().find(|v| v.index() >= vertex_count) {
        return Err(FaceWarpError::degenerate(format!(
            "vertex {} of {tri:?} is outside the {vertex_count}-vertex mesh",
            v.0
        )));
    }
    check_distinct(tri)
}

fn check_distinct(tri: [VertexId; 3]) -> FaceWarpResult<[VertexId; 3]> {
    let [a, b, c] = tri;
    if a == b || b == c || a == c {
        return Err(FaceWarpError::degenerate(format!(
            "{tri:?} repeats a vertex"
        )));
    }
    Ok(tri)
}

/// Resolved triangles of a triangulation, in enumeration order, plus the skip count.
pub fn resolve_all(tri: &Triangulation) -> (Vec<[VertexId; 3]>, usize) {
    let mut resolved = Vec::with_capacity(tri.triangles().len());
    let mut skipped = 0usize;
    for &raw in tri.triangles() {
        match resolve_triangle(raw, tri.input_count()) {
            Ok(t) => resolved.push(t),
            Err(e) => {
                tracing::trace!(error = %e, "skipping triangle");
                skipped += 1;
            }
        }
    }
    (resolved, skipped)
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/resolve.rs"]
mod tests;
