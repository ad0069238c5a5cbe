use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::identity::domain::template_extractor::TemplateExtractor;
use crate::shared::constants::LANDMARK_SIDECAR_SUFFIX;
use crate::shared::landmarks::LandmarkVector;

/// Reads landmarks precomputed by the external face-mesh model from
/// `<image>.landmarks.json`, a JSON array of `[x, y]` pairs (or `null` when
/// the model found no face).
#[derive(Debug, Default)]
pub struct SidecarTemplateExtractor;

impl SidecarTemplateExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn sidecar_path(image_path: &Path) -> PathBuf {
        let mut name = OsString::from(image_path.as_os_str());
        name.push(".");
        name.push(LANDMARK_SIDECAR_SUFFIX);
        PathBuf::from(name)
    }
}

impl TemplateExtractor for SidecarTemplateExtractor {
    fn extract(
        &mut self,
        image_path: &Path,
    ) -> Result<Option<LandmarkVector>, Box<dyn std::error::Error>> {
        let sidecar = Self::sidecar_path(image_path);
        if !sidecar.exists() {
            log::debug!("No landmark sidecar at {}", sidecar.display());
            return Ok(None);
        }
        let json = fs::read_to_string(&sidecar)?;
        let landmarks: Option<LandmarkVector> = serde_json::from_str(&json)
            .map_err(|e| format!("Invalid landmarks in {}: {e}", sidecar.display()))?;
        Ok(landmarks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sidecar_path_appends_suffix() {
        assert_eq!(
            SidecarTemplateExtractor::sidecar_path(Path::new("/db/alice.jpg")),
            PathBuf::from("/db/alice.jpg.landmarks.json")
        );
    }

    #[test]
    fn test_reads_landmarks() {
        let tmp = TempDir::new().unwrap();
        let image = tmp.path().join("alice.jpg");
        fs::write(
            SidecarTemplateExtractor::sidecar_path(&image),
            "[[0.1, 0.2], [0.3, 0.4], [0.5, 0.6]]",
        )
        .unwrap();

        let landmarks = SidecarTemplateExtractor::new().extract(&image).unwrap().unwrap();
        assert_eq!(landmarks.len(), 3);
    }

    #[test]
    fn test_missing_sidecar_means_no_face() {
        let tmp = TempDir::new().unwrap();
        let image = tmp.path().join("alice.jpg");
        assert!(SidecarTemplateExtractor::new().extract(&image).unwrap().is_none());
    }

    #[test]
    fn test_null_sidecar_means_no_face() {
        let tmp = TempDir::new().unwrap();
        let image = tmp.path().join("alice.jpg");
        fs::write(SidecarTemplateExtractor::sidecar_path(&image), "null").unwrap();
        assert!(SidecarTemplateExtractor::new().extract(&image).unwrap().is_none());
    }

    #[test]
    fn test_malformed_sidecar_is_error() {
        let tmp = TempDir::new().unwrap();
        let image = tmp.path().join("alice.jpg");
        fs::write(SidecarTemplateExtractor::sidecar_path(&image), "[[0.1]]").unwrap();
        assert!(SidecarTemplateExtractor::new().extract(&image).is_err());
    }
}
