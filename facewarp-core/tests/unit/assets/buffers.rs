use super::*;

fn quad_buffers(vertex_count: usize) -> MeshBuffers {
    let asset = ObjAsset::parse(
        "vt 0.0 0.0\nvt 1.0 0.0\nvt 1.0 1.0\nvt 0.0 1.0\nf 1/1 2/2 3/3 4/4\n",
    )
    .unwrap();
    MeshBuffers::from_asset(&asset, vertex_count).unwrap()
}

#[test]
fn quad_record_emits_two_fan_triangles() {
    let b = quad_buffers(4);
    assert_eq!(b.indices, vec![0, 1, 2, 0, 2, 3]);
    assert_eq!(b.triangle_count(), 2);
}

#[test]
fn buffer_lengths_follow_vertex_count() {
    let b = quad_buffers(6);
    assert_eq!(b.uvs.len(), 12);
    assert_eq!(&b.uvs[8..], &[0.0, 0.0, 0.0, 0.0]);
    assert_eq!(b.indices.len() % 3, 0);
}

#[test]
fn module_source_has_both_constants() {
    let src = quad_buffers(4).to_module_source();
    assert_eq!(
        src,
        "export const TRIANGULATION = [\n0, 1, 2, 0, 2, 3\n];\n\n\
         export const UVS = [\n0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0\n];\n"
    );
}

#[test]
fn json_uses_client_field_names() {
    let json = quad_buffers(4).to_json().unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["triangulation"].as_array().unwrap().len(), 6);
    assert_eq!(v["uvs"].as_array().unwrap().len(), 8);
}

#[test]
fn format_from_extension() {
    assert_eq!(
        BufferFormat::from_path(Path::new("out/triangulation.ts")),
        Some(BufferFormat::Module)
    );
    assert_eq!(
        BufferFormat::from_path(Path::new("a.JSON")),
        Some(BufferFormat::Json)
    );
    assert_eq!(BufferFormat::from_path(Path::new("a.txt")), None);
    assert!(quad_buffers(4).save(Path::new("target/a.txt")).is_err());
}

#[test]
fn render_for_path_rejects_unknown_extension() {
    let asset = ObjAsset::parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1/1 2/1 3/1\n").unwrap();
    let buffers = MeshBuffers::from_asset(&asset, 3).unwrap();
    let err = buffers.render_for_path(Path::new("mesh.txt")).unwrap_err();
    assert!(matches!(err, FaceWarpError::Validation(_)));
    assert!(buffers.render_for_path(Path::new("mesh.mjs")).unwrap().starts_with("export const"));
}
