use super::*;

const QUAD: &str = "\
# unit quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0.0 0.0
vt 1.0 0.0 0.0
vt 1.0 1.0
vt 0.0 1.0
f 1/1 2/2 3/3 4/4
";

#[test]
fn parses_tex_coords_and_faces() {
    let asset = ObjAsset::parse(QUAD).unwrap();
    assert_eq!(asset.position_count, 4);
    assert_eq!(asset.tex_coords.len(), 4);
    assert_eq!(asset.tex_coords[1], Uv::new(1.0, 0.0));
    assert_eq!(asset.faces.len(), 1);
    assert_eq!(
        asset.faces[0][2],
        FaceCorner {
            vertex: 2,
            tex: Some(2)
        }
    );
}

#[test]
fn quad_face_is_fan_split_into_two_triangles() {
    let asset = ObjAsset::parse(QUAD).unwrap();
    assert_eq!(
        asset.triangles(),
        vec![
            [VertexId(0), VertexId(1), VertexId(2)],
            [VertexId(0), VertexId(2), VertexId(3)],
        ]
    );
}

#[test]
fn corner_forms_are_accepted() {
    let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nf 1 2/1 3//1\nf 1/1/1 2/2/2 -1/-1\n";
    let asset = ObjAsset::parse(text).unwrap();
    assert_eq!(asset.faces[0][0], FaceCorner { vertex: 0, tex: None });
    assert_eq!(asset.faces[0][1], FaceCorner { vertex: 1, tex: Some(0) });
    assert_eq!(asset.faces[0][2], FaceCorner { vertex: 2, tex: None });
    assert_eq!(asset.faces[1][2], FaceCorner { vertex: 2, tex: Some(1) });
}

#[test]
fn first_association_wins_on_seams() {
    let text = "vt 0.1 0.1\nvt 0.9 0.9\nvt 0.5 0.5\nf 1/1 2/3 3/3\nf 1/2 2/2 3/2\n";
    let asset = ObjAsset::parse(text).unwrap();
    let assoc = asset.first_tex_association(4);
    assert_eq!(assoc, vec![Some(0), Some(2), Some(2), None]);
}

#[test]
fn larger_polygons_are_skipped() {
    let text = "f 1 2 3 4 5\nf 1 2 3\n";
    let asset = ObjAsset::parse(text).unwrap();
    assert_eq!(asset.triangles(), vec![[VertexId(0), VertexId(1), VertexId(2)]]);
}

#[test]
fn malformed_records_report_line_numbers() {
    let err = ObjAsset::parse("vt 0.5\n").unwrap_err();
    assert!(matches!(err, FaceWarpError::MalformedAsset(_)));
    assert!(err.to_string().contains("line 1"));

    let err = ObjAsset::parse("vt 0 0\nvt x 0\n").unwrap_err();
    assert!(err.to_string().contains("line 2"));

    let err = ObjAsset::parse("f 1 2\n").unwrap_err();
    assert!(err.to_string().contains("at least 3 corners"));

    let err = ObjAsset::parse("f 0 1 2\n").unwrap_err();
    assert!(err.to_string().contains("invalid index"));

    let err = ObjAsset::parse("vt 0 0\nf 1/1 2/2 3/1\n").unwrap_err();
    assert!(err.to_string().contains("texture coordinate 2"));
}

#[test]
fn asset_without_records_is_empty_not_an_error() {
    let asset = ObjAsset::parse("# nothing here\no face\n").unwrap();
    assert!(asset.tex_coords.is_empty());
    assert!(asset.triangles().is_empty());
}

#[test]
fn load_missing_file_is_missing_asset() {
    let err = ObjAsset::load(Path::new("no/such/mesh.obj")).unwrap_err();
    assert!(matches!(err, FaceWarpError::MissingAsset { .. }));
}

#[test]
fn non_finite_tex_coords_are_malformed() {
    for bad in ["vt nan nan", "vt 0.5 inf", "vt -infinity 0", "vt NaN 0.2"] {
        let text = format!("v 0 0 0\n{bad}\n");
        let err = ObjAsset::parse(&text).unwrap_err();
        assert!(
            matches!(&err, FaceWarpError::MalformedAsset(msg) if msg.contains("line 2")),
            "{bad}: {err}"
        );
    }
}
