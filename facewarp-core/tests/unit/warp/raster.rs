use super::*;

fn count_inside(mask: &GrayImage) -> usize {
    mask.pixels().filter(|p| p.0[0] == INSIDE).count()
}

#[test]
fn right_triangle_covers_its_lattice_points() {
    let tri = [
        Point::new(0.0, 0.0),
        Point::new(4.0, 0.0),
        Point::new(0.0, 4.0),
    ];
    let mask = fill_triangle_mask(tri, 6, 6);
    assert_eq!(count_inside(&mask), 15);
    assert_eq!(mask.get_pixel(2, 2).0[0], INSIDE);
    assert_eq!(mask.get_pixel(3, 3).0[0], 0);
    assert_eq!(mask.get_pixel(4, 1).0[0], 0);
}

#[test]
fn winding_does_not_matter() {
    let cw = [
        Point::new(0.0, 0.0),
        Point::new(0.0, 5.0),
        Point::new(5.0, 0.0),
    ];
    let ccw = [cw[0], cw[2], cw[1]];
    assert_eq!(fill_triangle_mask(cw, 7, 7), fill_triangle_mask(ccw, 7, 7));
}

#[test]
fn zero_area_triangle_is_empty() {
    let tri = [
        Point::new(0.0, 0.0),
        Point::new(2.0, 2.0),
        Point::new(4.0, 4.0),
    ];
    assert_eq!(count_inside(&fill_triangle_mask(tri, 5, 5)), 0);
}
