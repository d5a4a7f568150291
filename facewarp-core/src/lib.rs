//! Facewarp bakes a flat UV texture for a fixed-topology face mesh from a single photograph.
//!
//! A landmark provider places every mesh vertex on the photo; the mesh asset places every
//! vertex in UV space. The photo is then warped triangle by triangle from landmark space
//! into UV space and composited onto a square canvas.
//!
//! # Pipeline overview
//!
//! 1. **Load**: photo (`RgbImage`) and mesh asset (`ObjAsset`), then the per-vertex
//!    `UvAtlas` and the selected face's `FaceLandmarks`
//! 2. **Triangulate**: Delaunay over the destination UV points, or the asset's own faces
//!    (`TriangleSource`), resolved to vertex-index triples
//! 3. **Warp**: each triangle is affinely mapped into a `WarpedPatch` (optionally in parallel)
//! 4. **Composite**: patches are applied to the `TextureImage` in triangle order
//! 5. **Write**: the texture (and optional mesh buffers) are written only after success
//!
//! Constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical inputs give byte-identical textures, with or without
//!   worker threads.
//! - **No hidden state**: every run is driven by an explicit [`BakeConfig`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod assets;
mod foundation;
mod landmarks;
mod mesh;
mod render;
mod warp;

pub use assets::atlas::{UvAtlas, UvMapping};
pub use assets::buffers::{BufferFormat, MeshBuffers};
pub use assets::decode::{decode_image, load_photo};
pub use assets::obj::{FaceCorner, ObjAsset};
pub use foundation::core::{
    Affine, FACE_MESH_VERTEX_COUNT, PixelRect, Point, TextureSize, Uv, Vec2, VertexId,
};
pub use foundation::error::{FaceWarpError, FaceWarpResult};
pub use landmarks::file::{JsonLandmarkProvider, LandmarkFile};
pub use landmarks::provider::{FaceLandmarks, FaceSelection, LandmarkProvider, StaticLandmarks};
pub use mesh::delaunay::{RawTriangle, Triangulation, triangulate};
pub use mesh::resolve::{check_mesh_triangle, resolve_all, resolve_triangle};
pub use mesh::source::{TriangleSet, TriangleSource};
pub use render::composite::{TextureImage, composite_in_order};
pub use render::pipeline::{
    BakeConfig, BakeInputs, BakeOutput, BakeStats, WarpThreading, bake_and_save, bake_inputs,
    bake_texture,
};
pub use render::writer::{encode_png, save_texture};
pub use warp::affine::triangle_affine;
pub use warp::patch::{WarpedPatch, warp_triangle};
pub use warp::raster::{INSIDE, fill_triangle_mask};
