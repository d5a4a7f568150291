use std::path::Path;

use anyhow::Context;

use crate::foundation::{
    core::{Uv, VertexId},
    error::{FaceWarpError, FaceWarpResult, ensure_file_exists},
};

/// One `f` record corner: a position index and an optional texture-coordinate index.
///
/// Both indices are already converted to 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceCorner {
    /// Position index.
    pub vertex: u32,
    /// Texture-coordinate index, if the corner names one.
    pub tex: Option<u32>,
}

/// Parsed subset of a Wavefront OBJ mesh asset.
///
/// Only what texture baking needs is kept: the `vt` records in file order and the
/// corners of every `f` record. `v` records are counted (for relative indices) and
/// otherwise ignored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjAsset {
    /// `vt` records in file order.
    pub tex_coords: Vec<Uv>,
    /// `f` records in file order, each with at least 3 corners.
    pub faces: Vec<Vec<FaceCorner>>,
    /// Number of `v` records.
    pub position_count: usize,
}

impl ObjAsset {
    /// Read and parse a mesh asset from disk.
    #[tracing::instrument]
    pub fn load(path: &Path) -> FaceWarpResult<Self> {
        ensure_file_exists("mesh asset", path)?;
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read mesh asset '{}'", path.display()))?;
        let asset = Self::parse(&text).map_err(|e| match e {
            FaceWarpError::MalformedAsset(msg) => {
                FaceWarpError::malformed(format!("{}: {msg}", path.display()))
            }
            other => other,
        })?;
        tracing::debug!(
            tex_coords = asset.tex_coords.len(),
            faces = asset.faces.len(),
            positions = asset.position_count,
            "parsed mesh asset"
        );
        Ok(asset)
    }

    /// Parse asset text. Errors carry the 1-based line number.
    pub fn parse(text: &str) -> FaceWarpResult<Self> {
        let mut out = Self::default();

        for (line_idx, raw) in text.lines().enumerate() {
            let line_no = line_idx + 1;
            let mut tokens = raw.split_whitespace();
            match tokens.next() {
                Some("v") => out.position_count += 1,
                Some("vt") => {
                    let u = parse_float(tokens.next(), line_no, "u")?;
                    let v = parse_float(tokens.next(), line_no, "v")?;
                    out.tex_coords.push(Uv::new(u, v));
                }
                Some("f") => {
                    let corners = tokens
                        .map(|tok| {
                            parse_corner(tok, line_no, out.position_count, out.tex_coords.len())
                        })
                        .collect::<FaceWarpResult<Vec<_>>>()?;
                    if corners.len() < 3 {
                        return Err(FaceWarpError::malformed(format!(
                            "line {line_no}: face needs at least 3 corners, found {}",
                            corners.len()
                        )));
                    }
                    out.faces.push(corners);
                }
                _ => {}
            }
        }

        let tex_len = out.tex_coords.len();
        for corner in out.faces.iter().flatten() {
            if let Some(t) = corner.tex
                && t as usize >= tex_len
            {
                return Err(FaceWarpError::malformed(format!(
                    "face references texture coordinate {} but only {tex_len} are defined",
                    t + 1
                )));
            }
        }

        Ok(out)
    }

    /// Triangles described by the `f` records, in file order.
    ///
    /// Triangles pass through; quads are fan-split into `(v0,v1,v2)` and `(v0,v2,v3)`.
    /// Larger polygons are skipped.
    pub fn triangles(&self) -> Vec<[VertexId; 3]> {
        let mut out = Vec::with_capacity(self.faces.len() * 2);
        let mut skipped = 0usize;
        for face in &self.faces {
            let v = |i: usize| VertexId(face[i].vertex);
            match face.len() {
                3 => out.push([v(0), v(1), v(2)]),
                4 => {
                    out.push([v(0), v(1), v(2)]);
                    out.push([v(0), v(2), v(3)]);
                }
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            tracing::warn!(skipped, "ignored faces with more than 4 corners");
        }
        out
    }

    /// First texture-coordinate index associated with each vertex below `vertex_count`.
    ///
    /// A vertex on a UV seam is referenced with several texture coordinates; the first
    /// reference in file order wins and the others are dropped.
    pub fn first_tex_association(&self, vertex_count: usize) -> Vec<Option<u32>> {
        let mut out = vec![None; vertex_count];
        for corner in self.faces.iter().flatten() {
            let Some(tex) = corner.tex else { continue };
            if let Some(slot) = out.get_mut(corner.vertex as usize)
                && slot.is_none()
            {
                *slot = Some(tex);
            }
        }
        out
    }
}

fn parse_float(tok: Option<&str>, line_no: usize, what: &str) -> FaceWarpResult<f64> {
    let tok = tok.ok_or_else(|| {
        FaceWarpError::malformed(format!("line {line_no}: texture coordinate is missing {what}"))
    })?;
    match tok.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FaceWarpError::malformed(format!(
            "line {line_no}: texture coordinate {what} '{tok}' is not a finite number"
        ))),
    }
}

fn parse_corner(
    tok: &str,
    line_no: usize,
    positions_so_far: usize,
    tex_so_far: usize,
) -> FaceWarpResult<FaceCorner> {
    let mut parts = tok.split('/');
    let vertex = match parts.next() {
        Some(s) if !s.is_empty() => resolve_index(s, positions_so_far, line_no)?,
        _ => {
            return Err(FaceWarpError::malformed(format!(
                "line {line_no}: face corner '{tok}' has no vertex index"
            )));
        }
    };
    let tex = match parts.next() {
        Some(s) if !s.is_empty() => Some(resolve_index(s, tex_so_far, line_no)?),
        _ => None,
    };
    Ok(FaceCorner { vertex, tex })
}

/// Convert a 1-based (or negative, relative) OBJ index to 0-based.
fn resolve_index(s: &str, defined_so_far: usize, line_no: usize) -> FaceWarpResult<u32> {
    let raw: i64 = s.parse().map_err(|_| {
        FaceWarpError::malformed(format!("line {line_no}: index '{s}' is not an integer"))
    })?;
    let resolved = match raw {
        0 => None,
        r if r > 0 => Some(r - 1),
        r => {
            let abs = defined_so_far as i64 + r;
            (abs >= 0).then_some(abs)
        }
    };
    resolved
        .and_then(|i| u32::try_from(i).ok())
        .ok_or_else(|| FaceWarpError::malformed(format!("line {line_no}: invalid index '{s}'")))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/obj.rs"]
mod tests;
