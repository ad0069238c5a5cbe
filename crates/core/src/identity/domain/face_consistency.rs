//! Weak identity signal: detects that the face in view changed or left.
//!
//! The fingerprint only answers "same face as last frame?". Matching against
//! enrolled identities always goes through the full-landmark verifier.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::shared::constants::FINGERPRINT_POINTS;
use crate::shared::face_mesh::FaceMesh;

/// Opaque hash of the leading face-mesh points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceFingerprint(u64);

impl FaceFingerprint {
    pub fn from_mesh(mesh: &FaceMesh) -> Self {
        let mut hasher = DefaultHasher::new();
        for p in mesh.landmarks().points().iter().take(FINGERPRINT_POINTS) {
            p.x.to_bits().hash(&mut hasher);
            p.y.to_bits().hash(&mut hasher);
        }
        Self(hasher.finish())
    }

    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }
}

/// Remembers the previous frame's fingerprint.
#[derive(Clone, Debug, Default)]
pub struct FaceConsistencyTracker {
    previous: Option<FaceFingerprint>,
}

impl FaceConsistencyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `current` and reports whether the face changed since the last
    /// frame. A face leaving the view counts as a change; a face appearing
    /// after an empty frame does not.
    pub fn observe(&mut self, current: Option<FaceFingerprint>) -> bool {
        let changed = match (self.previous, current) {
            (Some(prev), Some(cur)) => prev != cur,
            (Some(_), None) => true,
            (None, _) => false,
        };
        self.previous = current;
        changed
    }

    pub fn previous(&self) -> Option<FaceFingerprint> {
        self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::landmarks::{LandmarkVector, Point};

    fn mesh(offset: f64) -> FaceMesh {
        let points = (0..10)
            .map(|i| Point::new(0.1 * i as f64 + offset, 0.5))
            .collect();
        FaceMesh::new(LandmarkVector::new(points).unwrap()).unwrap()
    }

    #[test]
    fn test_same_face_then_new_face() {
        let a = FaceFingerprint::from_raw(1);
        let b = FaceFingerprint::from_raw(2);
        let mut tracker = FaceConsistencyTracker::new();
        assert!(!tracker.observe(Some(a)));
        assert!(!tracker.observe(Some(a)));
        assert!(tracker.observe(Some(b)));
    }

    #[test]
    fn test_face_leaving_is_a_change() {
        let a = FaceFingerprint::from_raw(1);
        let mut tracker = FaceConsistencyTracker::new();
        assert!(!tracker.observe(Some(a)));
        assert!(tracker.observe(None));
        assert_eq!(tracker.previous(), None);
    }

    #[test]
    fn test_face_appearing_is_not_a_change() {
        let mut tracker = FaceConsistencyTracker::new();
        assert!(!tracker.observe(None));
        assert!(!tracker.observe(Some(FaceFingerprint::from_raw(7))));
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        assert_eq!(
            FaceFingerprint::from_mesh(&mesh(0.0)),
            FaceFingerprint::from_mesh(&mesh(0.0))
        );
    }

    #[test]
    fn test_fingerprint_only_reads_leading_points() {
        let base = mesh(0.0);
        let mut points = base.landmarks().points().to_vec();
        points[9] = Point::new(0.99, 0.99);
        let tail_moved = FaceMesh::new(LandmarkVector::new(points).unwrap()).unwrap();
        assert_eq!(
            FaceFingerprint::from_mesh(&base),
            FaceFingerprint::from_mesh(&tail_moved)
        );
        assert_ne!(
            FaceFingerprint::from_mesh(&base),
            FaceFingerprint::from_mesh(&mesh(0.01))
        );
    }
}
