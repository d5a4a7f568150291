//! Per-triangle warping: affine solve, triangle mask, resampling.

pub mod affine;
pub mod patch;
pub mod raster;
pub(crate) mod sample;
