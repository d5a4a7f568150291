//! Bowyer–Watson Delaunay triangulation that keeps input indices.
//!
//! Points are inserted one at a time into a triangulation seeded with a rectangle
//! strictly larger than the point extent. Every triangle is stored as three point
//! handles; handles `< input_count` are the caller's point indices, the four handles
//! after that are the seeding rectangle's corners. No coordinate lookup is ever needed
//! to get back from a triangle corner to the input point it came from.

use std::collections::{HashMap, HashSet};

use crate::foundation::{
    core::Point,
    math::{incircle, orient2d},
};

/// Triangle as three point handles, counter-clockwise (`orient2d > 0`).
pub type RawTriangle = [usize; 3];

/// Result of [`triangulate`].
#[derive(Clone, Debug)]
pub struct Triangulation {
    points: Vec<Point>,
    input_count: usize,
    triangles: Vec<RawTriangle>,
    duplicates: Vec<(usize, usize)>,
}

impl Triangulation {
    /// Number of caller-provided points; handles at or above this are synthetic.
    pub fn input_count(&self) -> usize {
        self.input_count
    }

    /// Every triangle, including those touching the seeding rectangle.
    pub fn triangles(&self) -> &[RawTriangle] {
        &self.triangles
    }

    /// True for seeding-rectangle corners.
    pub fn is_synthetic(&self, handle: usize) -> bool {
        handle >= self.input_count
    }

    /// Triangles whose three corners are all input points.
    pub fn input_triangles(&self) -> impl Iterator<Item = RawTriangle> + '_ {
        self.triangles
            .iter()
            .copied()
            .filter(|t| t.iter().all(|&h| h < self.input_count))
    }

    /// Position of a handle, synthetic corners included.
    pub fn point(&self, handle: usize) -> Option<Point> {
        self.points.get(handle).copied()
    }

    /// Input points that were not inserted because an earlier point had the same
    /// coordinates, as `(skipped, kept)` pairs.
    pub fn duplicates(&self) -> &[(usize, usize)] {
        &self.duplicates
    }
}

/// Triangulate `points`. Output depends only on the input (order included).
pub fn triangulate(points: &[Point]) -> Triangulation {
    let input_count = points.len();
    let mut all = points.to_vec();
    let mut duplicates = Vec::new();

    if input_count == 0 {
        return Triangulation {
            points: all,
            input_count,
            triangles: Vec::new(),
            duplicates,
        };
    }

    all.extend(seed_rectangle(points));
    let (s0, s1, s2, s3) = (input_count, input_count + 1, input_count + 2, input_count + 3);
    let mut triangles = vec![
        ccw([s0, s1, s2], &all),
        ccw([s0, s2, s3], &all),
    ];

    let mut seen = HashMap::<(u64, u64), usize>::with_capacity(input_count);
    for (pid, p) in points.iter().enumerate() {
        if !p.is_finite() {
            continue;
        }
        let key = (canonical_bits(p.x), canonical_bits(p.y));
        if let Some(&kept) = seen.get(&key) {
            duplicates.push((pid, kept));
            continue;
        }
        seen.insert(key, pid);
        insert_point(pid, &all, &mut triangles);
    }

    Triangulation {
        points: all,
        input_count,
        triangles,
        duplicates,
    }
}

fn insert_point(pid: usize, points: &[Point], triangles: &mut Vec<RawTriangle>) {
    let p = points[pid];

    let bad: Vec<bool> = triangles
        .iter()
        .map(|t| incircle(points[t[0]], points[t[1]], points[t[2]], p) > 0.0)
        .collect();
    if !bad.iter().any(|&b| b) {
        return;
    }

    // Cavity boundary: directed edges of bad triangles whose reverse is not also bad.
    let mut directed = Vec::new();
    for (t, _) in triangles.iter().zip(&bad).filter(|(_, b)| **b) {
        directed.extend([(t[0], t[1]), (t[1], t[2]), (t[2], t[0])]);
    }
    let lookup: HashSet<(usize, usize)> = directed.iter().copied().collect();
    let boundary: Vec<(usize, usize)> = directed
        .into_iter()
        .filter(|&(a, b)| !lookup.contains(&(b, a)))
        .collect();

    let mut keep = bad.iter().map(|b| !b);
    triangles.retain(|_| keep.next().unwrap_or(true));

    for (a, b) in boundary {
        triangles.push(ccw([a, b, pid], points));
    }
}

fn ccw(t: RawTriangle, points: &[Point]) -> RawTriangle {
    if orient2d(points[t[0]], points[t[1]], points[t[2]]) >= 0.0 {
        t
    } else {
        [t[1], t[0], t[2]]
    }
}

/// Corners of a rectangle strictly containing every point, counter-clockwise.
fn seed_rectangle(points: &[Point]) -> [Point; 4] {
    let mut min = Point::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points.iter().filter(|p| p.is_finite()) {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    if !min.is_finite() || !max.is_finite() {
        min = Point::ZERO;
        max = Point::ZERO;
    }

    let extent = (max.x - min.x).max(max.y - min.y).max(1.0);
    let margin = extent * 4.0;
    [
        Point::new(min.x - margin, min.y - margin),
        Point::new(max.x + margin, min.y - margin),
        Point::new(max.x + margin, max.y + margin),
        Point::new(min.x - margin, max.y + margin),
    ]
}

fn canonical_bits(v: f64) -> u64 {
    // +0.0 and -0.0 compare equal and must share a key.
    (v + 0.0).to_bits()
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/delaunay.rs"]
mod tests;
