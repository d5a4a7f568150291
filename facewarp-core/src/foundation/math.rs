use crate::foundation::core::Point;

/// Twice the signed area of `(a, b, c)`; positive when counter-clockwise in a y-up frame.
pub(crate) fn orient2d(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Positive when `d` lies strictly inside the circumcircle of the counter-clockwise
/// triangle `(a, b, c)`.
///
/// Coordinates are taken relative to `d` to keep the lifted terms small.
pub(crate) fn incircle(a: Point, b: Point, c: Point, d: Point) -> f64 {
    let (adx, ady) = (a.x - d.x, a.y - d.y);
    let (bdx, bdy) = (b.x - d.x, b.y - d.y);
    let (cdx, cdy) = (c.x - d.x, c.y - d.y);

    let alift = adx * adx + ady * ady;
    let blift = bdx * bdx + bdy * bdy;
    let clift = cdx * cdx + cdy * cdy;

    alift * (bdx * cdy - cdx * bdy) + blift * (cdx * ady - adx * cdy)
        + clift * (adx * bdy - bdx * ady)
}

/// Area of a triangle, always non-negative.
#[cfg(test)]
pub(crate) fn triangle_area(a: Point, b: Point, c: Point) -> f64 {
    orient2d(a, b, c).abs() * 0.5
}

/// Collinearity test scaled by the triangle's longest edge, so the threshold does not
/// depend on the coordinate magnitude.
pub(crate) fn is_collinear(a: Point, b: Point, c: Point) -> bool {
    let longest = (b - a)
        .hypot2()
        .max((c - b).hypot2())
        .max((a - c).hypot2());
    if longest == 0.0 {
        return true;
    }
    orient2d(a, b, c).abs() <= longest * 1e-9
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
