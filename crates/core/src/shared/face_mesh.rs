use crate::shared::constants::FINGERPRINT_POINTS;
use crate::shared::landmarks::{LandmarkError, LandmarkVector};

/// Face-mesh landmarks for one detected face.
///
/// The mesh cardinality is fixed by the external estimator; only the lower
/// bound needed for the consistency fingerprint is enforced here.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceMesh {
    landmarks: LandmarkVector,
}

impl FaceMesh {
    pub fn new(landmarks: LandmarkVector) -> Result<Self, LandmarkError> {
        if landmarks.len() < FINGERPRINT_POINTS {
            return Err(LandmarkError::TooFew {
                minimum: FINGERPRINT_POINTS,
                actual: landmarks.len(),
            });
        }
        Ok(Self { landmarks })
    }

    pub fn landmarks(&self) -> &LandmarkVector {
        &self.landmarks
    }

    /// Face bounding-box area in pixels² of a `width`x`height` frame.
    pub fn pixel_area(&self, width: u32, height: u32) -> f64 {
        self.landmarks.pixel_area(width, height)
    }
}
