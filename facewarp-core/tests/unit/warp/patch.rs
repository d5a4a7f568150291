use super::*;

fn ramp(w: u32, h: u32) -> RgbImage {
    RgbImage::from_fn(w, h, |x, y| Rgb([(x * 7 + 1) as u8, (y * 7 + 1) as u8, 99]))
}

fn tri(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> [Point; 3] {
    [Point::new(a.0, a.1), Point::new(b.0, b.1), Point::new(c.0, c.1)]
}

#[test]
fn identity_warp_copies_source_region() {
    let img = ramp(32, 32);
    let t = tri((4.0, 3.0), (20.0, 6.0), (9.0, 25.0));
    let patch = warp_triangle(&img, t, t).unwrap();
    assert_eq!(patch.offset(), (4, 3));
    assert!(patch.coverage() > 150);
    for (x, y, px) in patch.pixels.enumerate_pixels() {
        if patch.is_inside(x, y) {
            assert_eq!(*px, *img.get_pixel(x + 4, y + 3), "pixel ({x}, {y})");
        } else {
            assert_eq!(px.0, [0, 0, 0]);
        }
    }
}

#[test]
fn integer_translation_moves_pixels() {
    let img = ramp(40, 40);
    let src = tri((2.0, 2.0), (12.0, 2.0), (2.0, 12.0));
    let dst = tri((22.0, 17.0), (32.0, 17.0), (22.0, 27.0));
    let patch = warp_triangle(&img, src, dst).unwrap();
    assert_eq!(patch.offset(), (22, 17));
    assert_eq!(patch.pixels.get_pixel(0, 0), img.get_pixel(2, 2));
    assert_eq!(patch.pixels.get_pixel(5, 3), img.get_pixel(7, 5));
}

#[test]
fn upscale_samples_every_other_source_pixel() {
    let img = ramp(20, 20);
    let src = tri((0.0, 0.0), (8.0, 0.0), (0.0, 8.0));
    let dst = tri((0.0, 0.0), (16.0, 0.0), (0.0, 16.0));
    let patch = warp_triangle(&img, src, dst).unwrap();
    assert_eq!(patch.pixels.get_pixel(4, 2), img.get_pixel(2, 1));
    assert_eq!(patch.pixels.get_pixel(6, 0), img.get_pixel(3, 0));
}

#[test]
fn degenerate_inputs_are_recoverable_errors() {
    let img = ramp(8, 8);
    let line = tri((0.0, 0.0), (2.0, 2.0), (4.0, 4.0));
    let ok = tri((0.0, 0.0), (4.0, 0.0), (0.0, 4.0));

    let err = warp_triangle(&img, line, ok).unwrap_err();
    assert!(err.is_recoverable());
    let err = warp_triangle(&img, ok, line).unwrap_err();
    assert!(err.is_recoverable());
}

#[test]
fn source_outside_image_reads_black() {
    let img = ramp(8, 8);
    let src = tri((50.0, 50.0), (60.0, 50.0), (50.0, 60.0));
    let dst = tri((0.0, 0.0), (6.0, 0.0), (0.0, 6.0));
    let patch = warp_triangle(&img, src, dst).unwrap();
    assert!(patch.pixels.pixels().all(|p| p.0 == [0, 0, 0]));
    assert!(patch.coverage() > 0);
}

#[test]
fn non_finite_corners_are_skipped_not_panicking() {
    let img = ramp(8, 8);
    let ok = tri((0.0, 0.0), (4.0, 0.0), (0.0, 4.0));
    let nan = tri((f64::NAN, f64::NAN), (4.0, 0.0), (0.0, 4.0));
    let inf = tri((0.0, 0.0), (f64::INFINITY, 0.0), (0.0, 4.0));

    for (src, dst) in [(ok, nan), (nan, ok), (ok, inf), (inf, ok)] {
        let err = warp_triangle(&img, src, dst).unwrap_err();
        assert!(err.is_recoverable(), "{err}");
    }
}

#[test]
fn oversized_destination_box_is_skipped() {
    let img = ramp(8, 8);
    let src = tri((0.0, 0.0), (4.0, 0.0), (0.0, 4.0));
    let huge = tri((0.0, 0.0), (1e12, 0.0), (0.0, 1e12));
    let err = warp_triangle(&img, src, huge).unwrap_err();
    assert!(err.is_recoverable());

    let wide = tri((0.0, 0.0), (1e6, 0.0), (0.0, 1e6));
    assert!(warp_triangle(&img, src, wide).unwrap_err().is_recoverable());
}
