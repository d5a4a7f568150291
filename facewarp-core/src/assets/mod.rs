//! Input and output assets: mesh parsing, the UV atlas, photo decoding and the
//! flat buffers emitted for rendering clients.

pub mod atlas;
pub mod buffers;
pub mod decode;
pub mod obj;
