use std::path::{Path, PathBuf};

/// Convenience result type used across facewarp.
pub type FaceWarpResult<T> = Result<T, FaceWarpError>;

/// Top-level error taxonomy used by the baking pipeline.
///
/// Every variant except [`FaceWarpError::DegenerateTriangle`] aborts a run.
#[derive(thiserror::Error, Debug)]
pub enum FaceWarpError {
    /// An input file (photo, mesh asset, landmark file) does not exist.
    #[error("missing asset: {what} not found at '{}'", path.display())]
    MissingAsset {
        /// Human-readable input name, e.g. `"mesh asset"`.
        what: &'static str,
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The landmark provider returned no usable face.
    #[error("no face detected: {source_name}")]
    NoFaceDetected {
        /// Identifies the image or provider that produced zero detections.
        source_name: String,
    },

    /// Mesh asset content is unusable (bad records, too few UVs).
    #[error("malformed asset: {0}")]
    MalformedAsset(String),

    /// A triangle could not be resolved or warped; callers skip it.
    #[error("degenerate triangle: {0}")]
    DegenerateTriangle(String),

    /// Invalid configuration or landmark data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FaceWarpError {
    /// Build a [`FaceWarpError::MissingAsset`] value.
    pub fn missing_asset(what: &'static str, path: impl AsRef<Path>) -> Self {
        Self::MissingAsset {
            what,
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Build a [`FaceWarpError::NoFaceDetected`] value.
    pub fn no_face(source_name: impl Into<String>) -> Self {
        Self::NoFaceDetected {
            source_name: source_name.into(),
        }
    }

    /// Build a [`FaceWarpError::MalformedAsset`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedAsset(msg.into())
    }

    /// Build a [`FaceWarpError::DegenerateTriangle`] value.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateTriangle(msg.into())
    }

    /// Build a [`FaceWarpError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether the pipeline absorbs this error and keeps going.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DegenerateTriangle(_))
    }
}

/// Fail with [`FaceWarpError::MissingAsset`] unless `path` is an existing file.
pub(crate) fn ensure_file_exists(what: &'static str, path: &Path) -> FaceWarpResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(FaceWarpError::missing_asset(what, path))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
