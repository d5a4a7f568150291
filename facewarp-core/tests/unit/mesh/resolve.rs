use super::*;
use crate::{foundation::core::Point, mesh::delaunay::triangulate};

#[test]
fn synthetic_corner_is_degenerate() {
    let err = resolve_triangle([0, 1, 5], 4).unwrap_err();
    assert!(err.is_recoverable());
    assert!(err.to_string().contains("bounding rectangle"));
}

#[test]
fn input_corners_map_to_vertex_ids() {
    assert_eq!(
        resolve_triangle([2, 0, 3], 4).unwrap(),
        [VertexId(2), VertexId(0), VertexId(3)]
    );
}

#[test]
fn mesh_triangles_are_bounds_and_distinctness_checked() {
    assert!(check_mesh_triangle([VertexId(0), VertexId(1), VertexId(2)], 3).is_ok());
    assert!(check_mesh_triangle([VertexId(0), VertexId(1), VertexId(3)], 3).is_err());
    assert!(check_mesh_triangle([VertexId(0), VertexId(1), VertexId(1)], 3).is_err());
}

#[test]
fn resolve_all_drops_boundary_triangles() {
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(4.0, 0.0),
        Point::new(4.0, 4.0),
        Point::new(0.0, 4.0),
        Point::new(2.0, 2.0),
    ];
    let tri = triangulate(&pts);
    let (resolved, skipped) = resolve_all(&tri);
    assert_eq!(resolved.len(), 4);
    assert_eq!(resolved.len() + skipped, tri.triangles().len());
    assert!(resolved.iter().all(|t| t.contains(&VertexId(4))));
}
