use super::*;

fn square_points() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(8.0, 0.0),
        Point::new(8.0, 8.0),
        Point::new(0.0, 8.0),
    ]
}

#[test]
fn delaunay_ignores_faces() {
    let asset = ObjAsset::parse("f 1 2 3\n").unwrap();
    let set = TriangleSource::Delaunay.build(&square_points(), &asset);
    assert_eq!(set.triangles.len(), 2);
    assert_eq!(set.generated, set.triangles.len() + set.skipped);
}

#[test]
fn mesh_faces_keep_file_order_and_drop_out_of_range() {
    let asset = ObjAsset::parse("f 1 2 3 4\nf 2 3 9\nf 1 1 2\n").unwrap();
    let set = TriangleSource::MeshFaces.build(&square_points(), &asset);
    assert_eq!(
        set.triangles,
        vec![
            [VertexId(0), VertexId(1), VertexId(2)],
            [VertexId(0), VertexId(2), VertexId(3)],
        ]
    );
    assert_eq!(set.generated, 4);
    assert_eq!(set.skipped, 2);
}

#[test]
fn auto_falls_back_to_delaunay_without_faces() {
    let empty = ObjAsset::default();
    let set = TriangleSource::Auto.build(&square_points(), &empty);
    assert_eq!(set.triangles.len(), 2);

    let with_faces = ObjAsset::parse("f 1 2 3\n").unwrap();
    let set = TriangleSource::Auto.build(&square_points(), &with_faces);
    assert_eq!(set.triangles, vec![[VertexId(0), VertexId(1), VertexId(2)]]);
}
