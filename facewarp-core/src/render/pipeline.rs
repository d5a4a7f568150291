use std::path::{Path, PathBuf};

use image::RgbImage;
use rayon::prelude::*;

use crate::{
    assets::{
        atlas::{UvAtlas, UvMapping},
        buffers::{MeshBuffers, buffer_format_for, write_rendered},
        decode::load_photo,
        obj::ObjAsset,
    },
    foundation::{
        core::{FACE_MESH_VERTEX_COUNT, Point, TextureSize, VertexId},
        error::{FaceWarpError, FaceWarpResult, ensure_file_exists},
    },
    landmarks::provider::{FaceLandmarks, FaceSelection, LandmarkProvider},
    mesh::source::TriangleSource,
    render::{
        composite::TextureImage,
        writer::{save_texture, texture_format},
    },
    warp::patch::{WarpedPatch, warp_triangle},
};

/// Worker configuration for the per-triangle warp stage.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WarpThreading {
    /// Warp triangles on a rayon pool; `false` runs on the calling thread.
    pub parallel: bool,
    /// Worker count; `None` lets rayon decide.
    pub threads: Option<usize>,
    /// Triangles warped per batch before the batch is composited.
    pub chunk_size: usize,
}

impl Default for WarpThreading {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
            chunk_size: 256,
        }
    }
}

/// Everything a bake run needs. Passed explicitly; nothing is read from globals.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BakeConfig {
    /// Input photograph.
    pub image_path: PathBuf,
    /// Mesh asset with `vt` and `f` records.
    pub mesh_path: PathBuf,
    /// Texture resolution.
    pub output_size: TextureSize,
    /// Mesh vertex count `N`; every face must carry this many landmarks.
    pub vertex_count: usize,
    /// How vertices are paired with `vt` records.
    pub uv_mapping: UvMapping,
    /// Where warped triangles come from.
    pub triangles: TriangleSource,
    /// Which detected face to use.
    pub face_selection: FaceSelection,
    /// Warp worker settings.
    pub threading: WarpThreading,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            image_path: PathBuf::new(),
            mesh_path: PathBuf::new(),
            output_size: TextureSize::default(),
            vertex_count: FACE_MESH_VERTEX_COUNT,
            uv_mapping: UvMapping::default(),
            triangles: TriangleSource::default(),
            face_selection: FaceSelection::default(),
            threading: WarpThreading::default(),
        }
    }
}

impl BakeConfig {
    /// Default config for the given inputs.
    pub fn new(image_path: impl Into<PathBuf>, mesh_path: impl Into<PathBuf>) -> Self {
        Self {
            image_path: image_path.into(),
            mesh_path: mesh_path.into(),
            ..Self::default()
        }
    }

    /// Reject values no run could succeed with.
    pub fn validate(&self) -> FaceWarpResult<()> {
        if self.vertex_count < 3 {
            return Err(FaceWarpError::validation(
                "vertex_count must be at least 3",
            ));
        }
        TextureSize::new(self.output_size.width, self.output_size.height)?;
        if let Some(0) = self.threading.threads {
            return Err(FaceWarpError::validation(
                "warp threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

/// Counters for one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct BakeStats {
    /// Triangles produced by the triangle source, boundary triangles included.
    pub triangles_total: usize,
    /// Triangles left after resolution, i.e. handed to the warper.
    pub triangles_resolved: usize,
    /// Unresolvable plus degenerate triangles.
    pub triangles_skipped: usize,
    /// Patches applied to the canvas.
    pub patches_composited: usize,
    /// Canvas writes, counting overwrites.
    pub pixels_written: usize,
}

#[derive(Clone, Debug)]
/// Finished canvas and its run counters.
pub struct BakeOutput {
    /// The baked canvas.
    pub texture: TextureImage,
    /// Counters for the run.
    pub stats: BakeStats,
}

/// In-memory inputs to the warp and composite stages.
#[derive(Clone, Copy, Debug)]
pub struct BakeInputs<'a> {
    /// Decoded photograph.
    pub photo: &'a RgbImage,
    /// Selected face, one point per atlas entry.
    pub landmarks: &'a FaceLandmarks,
    /// Per-vertex UVs; fixes the destination points.
    pub atlas: &'a UvAtlas,
    /// Parsed mesh asset, read for its faces.
    pub asset: &'a ObjAsset,
}

/// Load the assets named in `config`, detect landmarks and bake the texture.
///
/// Nothing is written to disk; see [`bake_and_save`].
pub fn bake_texture(
    config: &BakeConfig,
    landmarks: &dyn LandmarkProvider,
) -> FaceWarpResult<BakeOutput> {
    load_and_bake(config, landmarks).map(|(output, _)| output)
}

/// [`bake_texture`], also handing back the parsed mesh asset.
#[tracing::instrument(
    skip(config, landmarks),
    fields(image = %config.image_path.display(), mesh = %config.mesh_path.display())
)]
fn load_and_bake(
    config: &BakeConfig,
    landmarks: &dyn LandmarkProvider,
) -> FaceWarpResult<(BakeOutput, ObjAsset)> {
    config.validate()?;
    ensure_file_exists("photo", &config.image_path)?;
    ensure_file_exists("mesh asset", &config.mesh_path)?;

    let pool = build_thread_pool(&config.threading)?;
    let load_mesh = || -> FaceWarpResult<(ObjAsset, UvAtlas)> {
        let asset = ObjAsset::load(&config.mesh_path)?;
        let atlas = UvAtlas::from_asset(&asset, config.vertex_count, config.uv_mapping)?;
        Ok((asset, atlas))
    };
    let load_face = || -> FaceWarpResult<(RgbImage, FaceLandmarks)> {
        let photo = load_photo(&config.image_path)?;
        let faces = landmarks.detect(&photo)?;
        let face = config.face_selection.select(
            faces,
            config.vertex_count,
            &format!("{} ({})", config.image_path.display(), landmarks.name()),
        )?;
        Ok((photo, face))
    };

    let (mesh, face) = match &pool {
        Some(pool) => pool.install(|| rayon::join(load_mesh, load_face)),
        None => (load_mesh(), load_face()),
    };
    let (photo, face) = face?;
    let (asset, atlas) = mesh?;
    tracing::info!(
        uv_resolved = atlas.resolved_count(),
        vertices = atlas.len(),
        "inputs loaded"
    );

    let output = run_stages(
        BakeInputs {
            photo: &photo,
            landmarks: &face,
            atlas: &atlas,
            asset: &asset,
        },
        config,
        pool.as_ref(),
    )?;
    Ok((output, asset))
}

/// Triangulate, warp and composite already-loaded inputs.
pub fn bake_inputs(inputs: BakeInputs<'_>, config: &BakeConfig) -> FaceWarpResult<BakeOutput> {
    config.validate()?;
    let pool = build_thread_pool(&config.threading)?;
    run_stages(inputs, config, pool.as_ref())
}

fn run_stages(
    inputs: BakeInputs<'_>,
    config: &BakeConfig,
    pool: Option<&rayon::ThreadPool>,
) -> FaceWarpResult<BakeOutput> {
    let BakeInputs {
        photo,
        landmarks,
        atlas,
        asset,
    } = inputs;
    if landmarks.len() != atlas.len() {
        return Err(FaceWarpError::validation(format!(
            "{} landmarks for a {}-vertex atlas",
            landmarks.len(),
            atlas.len()
        )));
    }

    let dst_points = atlas.canvas_points(config.output_size);
    let src_points = landmarks.points();
    let set = config.triangles.build(&dst_points, asset);

    let mut stats = BakeStats {
        triangles_total: set.generated,
        triangles_resolved: set.triangles.len(),
        triangles_skipped: set.skipped,
        ..BakeStats::default()
    };
    let mut texture = TextureImage::new(config.output_size);

    let chunk_size = config.threading.chunk_size.max(1);
    for chunk in set.triangles.chunks(chunk_size) {
        let warp_one =
            |tri: &[VertexId; 3]| warp_resolved(photo, src_points, &dst_points, *tri);
        let patches: Vec<FaceWarpResult<WarpedPatch>> = match pool {
            Some(pool) => pool.install(|| chunk.par_iter().map(warp_one).collect()),
            None => chunk.iter().map(warp_one).collect(),
        };

        // Composite strictly in triangle order, whatever order the workers finished in.
        for (tri, patch) in chunk.iter().zip(patches) {
            match patch {
                Ok(patch) => {
                    stats.pixels_written += texture.composite(&patch);
                    stats.patches_composited += 1;
                }
                Err(e) if e.is_recoverable() => {
                    tracing::debug!(triangle = ?tri, error = %e, "skipping triangle");
                    stats.triangles_skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    tracing::info!(
        total = stats.triangles_total,
        resolved = stats.triangles_resolved,
        skipped = stats.triangles_skipped,
        composited = stats.patches_composited,
        pixels = stats.pixels_written,
        "texture baked"
    );
    Ok(BakeOutput { texture, stats })
}

fn warp_resolved(
    photo: &RgbImage,
    src_points: &[Point],
    dst_points: &[Point],
    tri: [VertexId; 3],
) -> FaceWarpResult<WarpedPatch> {
    let corner = |pts: &[Point], v: VertexId| {
        pts.get(v.index()).copied().ok_or_else(|| {
            FaceWarpError::degenerate(format!("vertex {} has no position", v.0))
        })
    };
    let src = [
        corner(src_points, tri[0])?,
        corner(src_points, tri[1])?,
        corner(src_points, tri[2])?,
    ];
    let dst = [
        corner(dst_points, tri[0])?,
        corner(dst_points, tri[1])?,
        corner(dst_points, tri[2])?,
    ];
    warp_triangle(photo, src, dst)
}

/// Bake and, only if every stage succeeded, write the texture and optional buffers.
///
/// Output formats are resolved from the extensions before any input is read, and the
/// buffers are rendered before the first byte is written.
pub fn bake_and_save(
    config: &BakeConfig,
    landmarks: &dyn LandmarkProvider,
    texture_out: &Path,
    buffers_out: Option<&Path>,
) -> FaceWarpResult<BakeStats> {
    texture_format(texture_out)?;
    if let Some(path) = buffers_out {
        buffer_format_for(path)?;
    }

    let (output, asset) = load_and_bake(config, landmarks)?;
    let buffers = match buffers_out {
        Some(path) => {
            let buffers = MeshBuffers::from_asset(&asset, config.vertex_count)?;
            Some((path, buffers.render_for_path(path)?))
        }
        None => None,
    };

    save_texture(&output.texture, texture_out)?;
    if let Some((path, text)) = buffers {
        write_rendered(path, &text)?;
    }
    Ok(output.stats)
}

fn build_thread_pool(threading: &WarpThreading) -> FaceWarpResult<Option<rayon::ThreadPool>> {
    if !threading.parallel {
        return Ok(None);
    }
    if let Some(0) = threading.threads {
        return Err(FaceWarpError::validation(
            "warp threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threading.threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map(Some)
        .map_err(|e| FaceWarpError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
