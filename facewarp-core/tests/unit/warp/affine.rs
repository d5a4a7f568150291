use super::*;

fn assert_close(a: Point, b: Point) {
    assert!((a - b).hypot() < 1e-9, "{a:?} != {b:?}");
}

#[test]
fn maps_each_corner_onto_its_partner() {
    let from = [
        Point::new(1.0, 2.0),
        Point::new(11.0, 4.0),
        Point::new(3.0, 17.0),
    ];
    let to = [
        Point::new(100.0, 50.0),
        Point::new(80.0, 90.0),
        Point::new(130.0, 70.0),
    ];
    let m = triangle_affine(from, to).unwrap();
    for i in 0..3 {
        assert_close(m * from[i], to[i]);
    }
}

#[test]
fn identical_triangles_give_identity() {
    let t = [
        Point::new(0.0, 0.0),
        Point::new(5.0, 1.0),
        Point::new(2.0, 7.0),
    ];
    let m = triangle_affine(t, t).unwrap();
    for (got, want) in m.as_coeffs().iter().zip(Affine::IDENTITY.as_coeffs()) {
        assert!((got - want).abs() < 1e-12);
    }
}

#[test]
fn collinear_source_is_degenerate() {
    let from = [
        Point::new(0.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(2.0, 2.0),
    ];
    let to = [
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(0.0, 1.0),
    ];
    let err = triangle_affine(from, to).unwrap_err();
    assert!(err.is_recoverable());
}
