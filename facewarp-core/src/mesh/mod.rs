//! Destination-space triangles: triangulation, vertex resolution and source selection.

pub mod delaunay;
pub mod resolve;
pub mod source;
