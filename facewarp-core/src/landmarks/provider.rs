use image::RgbImage;

use crate::foundation::{
    core::{Point, VertexId},
    error::{FaceWarpError, FaceWarpResult},
};

/// Image-space landmark positions for one detected face, indexed by [`VertexId`].
#[derive(Clone, Debug, PartialEq)]
pub struct FaceLandmarks {
    points: Vec<Point>,
}

impl FaceLandmarks {
    /// Wrap image-space points ordered like the mesh vertices.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the face has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Image position of vertex `v`.
    pub fn get(&self, v: VertexId) -> Option<Point> {
        self.points.get(v.index()).copied()
    }

    /// All points in vertex order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

/// Source of detected faces for a decoded photo.
pub trait LandmarkProvider: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> String;

    /// Detect zero or more faces in `image`.
    fn detect(&self, image: &RgbImage) -> FaceWarpResult<Vec<FaceLandmarks>>;
}

/// Which face to use when a provider reports several.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceSelection {
    /// The first detected face wins. No ranking is attempted.
    #[default]
    First,
    /// The face at this position in detection order.
    Index(usize),
}

impl FaceSelection {
    /// Pick one face and check it carries exactly `vertex_count` points.
    pub fn select(
        self,
        mut faces: Vec<FaceLandmarks>,
        vertex_count: usize,
        source_name: &str,
    ) -> FaceWarpResult<FaceLandmarks> {
        if faces.is_empty() {
            return Err(FaceWarpError::no_face(source_name));
        }
        let idx = match self {
            Self::First => 0,
            Self::Index(i) => i,
        };
        if idx >= faces.len() {
            return Err(FaceWarpError::no_face(format!(
                "{source_name}: face #{idx} requested but only {} detected",
                faces.len()
            )));
        }
        if faces.len() > 1 {
            tracing::info!(
                detected = faces.len(),
                selected = idx,
                "multiple faces detected"
            );
        }

        let face = faces.swap_remove(idx);
        if face.len() != vertex_count {
            return Err(FaceWarpError::validation(format!(
                "{source_name}: face has {} landmarks, mesh has {vertex_count} vertices",
                face.len()
            )));
        }
        Ok(face)
    }
}

/// Provider returning a fixed set of faces regardless of the image.
#[derive(Clone, Debug, Default)]
pub struct StaticLandmarks {
    faces: Vec<FaceLandmarks>,
}

impl StaticLandmarks {
    /// Provider reporting `faces` in this order.
    pub fn new(faces: Vec<FaceLandmarks>) -> Self {
        Self { faces }
    }

    /// Provider reporting exactly one face.
    pub fn single(points: Vec<Point>) -> Self {
        Self::new(vec![FaceLandmarks::new(points)])
    }
}

impl LandmarkProvider for StaticLandmarks {
    fn name(&self) -> String {
        "static landmarks".to_string()
    }

    fn detect(&self, _image: &RgbImage) -> FaceWarpResult<Vec<FaceLandmarks>> {
        Ok(self.faces.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/landmarks/provider.rs"]
mod tests;
