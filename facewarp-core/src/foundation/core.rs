use crate::foundation::error::{FaceWarpError, FaceWarpResult};

pub use kurbo::{Affine, Point, Vec2};

/// Vertex count of the canonical face-mesh topology.
pub const FACE_MESH_VERTEX_COUNT: usize = 468;

/// Identity of one mesh vertex, `0..N`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct VertexId(pub u32);

impl VertexId {
    /// Wrap a 0-based vertex index.
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// The 0-based index, for slice access.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Texture coordinate in `[0, 1]`, `v` pointing up.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Uv {
    /// Horizontal coordinate, 0 at the left edge.
    pub u: f64,
    /// Vertical coordinate, 0 at the bottom edge.
    pub v: f64,
}

impl Uv {
    /// Default for vertices without a texture coordinate.
    pub const ZERO: Uv = Uv { u: 0.0, v: 0.0 };

    /// Build a UV from its components.
    pub fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }
}

/// Output texture resolution in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TextureSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for TextureSize {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
        }
    }
}

impl TextureSize {
    /// Validated size; both sides must be non-zero.
    pub fn new(width: u32, height: u32) -> FaceWarpResult<Self> {
        if width == 0 || height == 0 {
            return Err(FaceWarpError::validation(
                "texture size must be at least 1x1",
            ));
        }
        Ok(Self { width, height })
    }

    /// Validated `side` x `side` size.
    pub fn square(side: u32) -> FaceWarpResult<Self> {
        Self::new(side, side)
    }

    /// Number of pixels covered.
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Map a UV coordinate to canvas pixel space: `x = u*W`, `y = (1-v)*H`.
    pub fn uv_to_pixel(self, uv: Uv) -> Point {
        Point::new(
            uv.u * f64::from(self.width),
            (1.0 - uv.v) * f64::from(self.height),
        )
    }
}

fn floor_to_i64(v: f64) -> Option<i64> {
    // Past 2^53 the float grid is coarser than a pixel.
    const LIMIT: f64 = (1u64 << 53) as f64;
    let v = v.floor();
    (v.abs() < LIMIT).then_some(v as i64)
}

/// Integer pixel rectangle; `x`/`y` may be negative before clipping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Left column.
    pub x: i64,
    /// Top row.
    pub y: i64,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    /// Smallest rectangle holding every pixel touched by `points`.
    ///
    /// Corners are floored, so a point at `(3.0, 3.0)` lands in the pixel at
    /// column 3 and `(3.9, 3.9)` does too. `None` for an empty slice, a non-finite
    /// coordinate, or a box whose sides do not fit in `u32`.
    pub fn bounding(points: &[Point]) -> Option<Self> {
        if points.is_empty() || points.iter().any(|p| !p.is_finite()) {
            return None;
        }
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        let x0 = floor_to_i64(min_x)?;
        let y0 = floor_to_i64(min_y)?;
        let x1 = floor_to_i64(max_x)?;
        let y1 = floor_to_i64(max_y)?;
        let side = |lo: i64, hi: i64| {
            hi.checked_sub(lo)
                .and_then(|d| d.checked_add(1))
                .and_then(|d| u32::try_from(d).ok())
        };
        Some(Self {
            x: x0,
            y: y0,
            width: side(x0, x1)?,
            height: side(y0, y1)?,
        })
    }

    /// Top-left corner as a point.
    pub fn origin(self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }

    /// True when either side is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered.
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
