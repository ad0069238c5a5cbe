use serde::{Deserialize, Serialize};

use crate::shared::constants::HAND_LANDMARK_COUNT;
use crate::shared::landmarks::{LandmarkError, LandmarkVector, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Left,
    Right,
}

/// 21-point hand skeleton (wrist = 0, thumb tip = 4, index tip = 8, ...).
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    handedness: Handedness,
    landmarks: LandmarkVector,
}

impl HandLandmarks {
    pub fn new(handedness: Handedness, landmarks: LandmarkVector) -> Result<Self, LandmarkError> {
        if landmarks.len() != HAND_LANDMARK_COUNT {
            return Err(LandmarkError::Arity {
                expected: HAND_LANDMARK_COUNT,
                actual: landmarks.len(),
            });
        }
        Ok(Self {
            handedness,
            landmarks,
        })
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    pub fn landmarks(&self) -> &LandmarkVector {
        &self.landmarks
    }

    /// Landmark `index` (always present: arity is checked on construction).
    pub fn point(&self, index: usize) -> Point {
        self.landmarks.points()[index]
    }

    /// Center of the hand bounding box in pixels of a `width`x`height` frame.
    pub fn pixel_center(&self, width: u32, height: u32) -> Point {
        self.landmarks
            .pixel_bounding_box(width, height)
            .map(|b| b.center())
            .unwrap_or(Point::new(0.0, 0.0))
    }
}
