use std::path::PathBuf;

use super::*;
use crate::foundation::core::TextureSize;

fn canvas() -> TextureSize {
    TextureSize::new(6, 4).unwrap()
}

#[test]
fn writes_png_and_creates_parent_dirs() {
    let dir = PathBuf::from("target").join("writer_tests").join("nested");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("deeper").join("tex.png");

    save_texture(&TextureImage::new(canvas()), &path).unwrap();
    let back = image::open(&path).unwrap().to_rgb8();
    assert_eq!(back.dimensions(), (6, 4));
    assert!(back.pixels().all(|p| p.0 == [0, 0, 0]));
}

#[test]
fn unknown_extension_is_rejected() {
    let path = PathBuf::from("target").join("writer_tests").join("tex.notanimage");
    let err = save_texture(&TextureImage::new(canvas()), &path).unwrap_err();
    assert!(matches!(err, FaceWarpError::Validation(_)));
    assert!(!path.exists());
}

#[test]
fn encoded_png_decodes_to_same_pixels() {
    let tex = TextureImage::new(canvas());
    let bytes = encode_png(&tex).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
    let back = crate::assets::decode::decode_image(&bytes).unwrap();
    assert_eq!(back.as_raw(), tex.as_image().as_raw());
}
