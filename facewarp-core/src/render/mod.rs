//! Output canvas, the bake pipeline and texture encoding.

pub mod composite;
pub mod pipeline;
pub mod writer;
