//! Landmark detection boundary.
//!
//! The detector itself is external. The pipeline only needs, per detected face, `N`
//! image-space points ordered like the mesh vertices.

pub mod file;
pub mod provider;
