use std::path::{Path, PathBuf};

use anyhow::Context;
use image::RgbImage;

use crate::{
    foundation::{
        core::Point,
        error::{FaceWarpError, FaceWarpResult, ensure_file_exists},
    },
    landmarks::provider::{FaceLandmarks, LandmarkProvider},
};

/// On-disk landmark export: one point list per detected face.
///
/// ```json
/// { "normalized": true, "faces": [[[0.51, 0.43], [0.50, 0.47]]] }
/// ```
///
/// With `normalized`, points are fractions of the image size, as face-mesh detectors
/// report them; otherwise they are pixels.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LandmarkFile {
    #[serde(default)]
    /// Points are fractions of the image size rather than pixels.
    pub normalized: bool,
    /// One `[x, y]` list per detected face, in detection order.
    pub faces: Vec<Vec<[f64; 2]>>,
}

impl LandmarkFile {
    /// Parse a landmark file; bad JSON is a malformed asset.
    pub fn from_json(text: &str) -> FaceWarpResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| FaceWarpError::malformed(format!("landmark json: {e}")))
    }

    /// Serialize back to JSON.
    pub fn to_json(&self) -> FaceWarpResult<String> {
        serde_json::to_string(self)
            .map_err(|e| FaceWarpError::Other(anyhow::anyhow!("serialize landmarks: {e}")))
    }

    /// Faces in image pixel space for an image of `width` x `height`.
    pub fn faces_in_pixels(&self, width: u32, height: u32) -> Vec<FaceLandmarks> {
        let (sx, sy) = if self.normalized {
            (f64::from(width), f64::from(height))
        } else {
            (1.0, 1.0)
        };
        self.faces
            .iter()
            .map(|pts| {
                FaceLandmarks::new(pts.iter().map(|&[x, y]| Point::new(x * sx, y * sy)).collect())
            })
            .collect()
    }
}

/// [`LandmarkProvider`] backed by a [`LandmarkFile`] exported by an external detector.
#[derive(Clone, Debug)]
pub struct JsonLandmarkProvider {
    path: PathBuf,
    file: LandmarkFile,
}

impl JsonLandmarkProvider {
    #[tracing::instrument]
    /// Read and parse a landmark file.
    pub fn load(path: &Path) -> FaceWarpResult<Self> {
        ensure_file_exists("landmark file", path)?;
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read landmark file '{}'", path.display()))?;
        let file = LandmarkFile::from_json(&text).map_err(|e| match e {
            FaceWarpError::MalformedAsset(msg) => {
                FaceWarpError::malformed(format!("{}: {msg}", path.display()))
            }
            other => other,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Wrap an already-parsed file; `path` is only used as the provider name.
    pub fn from_file(path: impl Into<PathBuf>, file: LandmarkFile) -> Self {
        Self {
            path: path.into(),
            file,
        }
    }
}

impl LandmarkProvider for JsonLandmarkProvider {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn detect(&self, image: &RgbImage) -> FaceWarpResult<Vec<FaceLandmarks>> {
        Ok(self.file.faces_in_pixels(image.width(), image.height()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/landmarks/file.rs"]
mod tests;
