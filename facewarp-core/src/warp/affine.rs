use crate::foundation::{
    core::{Affine, Point},
    error::{FaceWarpError, FaceWarpResult},
    math::is_collinear,
};

/// Unique affine transform taking `from[i]` to `to[i]` for all three corners.
///
/// Fails with [`FaceWarpError::DegenerateTriangle`] when `from` is collinear, since no
/// single transform exists then.
pub fn triangle_affine(from: [Point; 3], to: [Point; 3]) -> FaceWarpResult<Affine> {
    if is_collinear(from[0], from[1], from[2]) {
        return Err(FaceWarpError::degenerate(format!(
            "collinear corners {from:?}"
        )));
    }
    Ok(corner_frame(to) * corner_frame(from).inverse())
}

/// Affine taking the unit triangle `(0,0), (1,0), (0,1)` onto `t`.
fn corner_frame(t: [Point; 3]) -> Affine {
    let e1 = t[1] - t[0];
    let e2 = t[2] - t[0];
    Affine::new([e1.x, e1.y, e2.x, e2.y, t[0].x, t[0].y])
}

#[cfg(test)]
#[path = "../../tests/unit/warp/affine.rs"]
mod tests;
