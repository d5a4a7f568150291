use super::*;

#[test]
fn normalized_points_scale_by_image_size() {
    let file = LandmarkFile::from_json(r#"{"normalized": true, "faces": [[[0.5, 0.25]]]}"#)
        .unwrap();
    let provider = JsonLandmarkProvider::from_file("lm.json", file);
    let faces = provider.detect(&RgbImage::new(200, 100)).unwrap();
    assert_eq!(faces[0].points(), &[Point::new(100.0, 25.0)]);
}

#[test]
fn pixel_points_pass_through() {
    let file = LandmarkFile::from_json(r#"{"faces": [[[12.5, 7.0]], [[1.0, 1.0]]]}"#).unwrap();
    assert!(!file.normalized);
    let faces = file.faces_in_pixels(640, 480);
    assert_eq!(faces.len(), 2);
    assert_eq!(faces[0].points(), &[Point::new(12.5, 7.0)]);
}

#[test]
fn empty_face_list_yields_no_detections() {
    let file = LandmarkFile::from_json(r#"{"faces": []}"#).unwrap();
    let provider = JsonLandmarkProvider::from_file("lm.json", file);
    assert!(provider.detect(&RgbImage::new(1, 1)).unwrap().is_empty());
}

#[test]
fn bad_json_is_malformed() {
    let err = LandmarkFile::from_json("{\"faces\": [[1, 2]]}").unwrap_err();
    assert!(matches!(err, FaceWarpError::MalformedAsset(_)));
}

#[test]
fn json_roundtrip_keeps_flag() {
    let file = LandmarkFile {
        normalized: true,
        faces: vec![vec![[0.1, 0.2]]],
    };
    let back = LandmarkFile::from_json(&file.to_json().unwrap()).unwrap();
    assert_eq!(back, file);
}

#[test]
fn missing_file_is_missing_asset() {
    let err = JsonLandmarkProvider::load(Path::new("nope/landmarks.json")).unwrap_err();
    assert!(matches!(err, FaceWarpError::MissingAsset { .. }));
}
