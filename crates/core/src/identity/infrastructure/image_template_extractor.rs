use std::path::Path;

use crate::identity::domain::template_extractor::{FaceMeshEstimator, TemplateExtractor};
use crate::shared::landmarks::LandmarkVector;

/// Decodes an enrollment image and runs the face-mesh estimator on it.
pub struct ImageTemplateExtractor {
    estimator: Box<dyn FaceMeshEstimator>,
}

impl ImageTemplateExtractor {
    pub fn new(estimator: Box<dyn FaceMeshEstimator>) -> Self {
        Self { estimator }
    }
}

impl TemplateExtractor for ImageTemplateExtractor {
    fn extract(
        &mut self,
        image_path: &Path,
    ) -> Result<Option<LandmarkVector>, Box<dyn std::error::Error>> {
        let rgb = image::open(image_path)?.to_rgb8();
        log::debug!(
            "Decoded {} ({}x{})",
            image_path.display(),
            rgb.width(),
            rgb.height()
        );
        self.estimator.estimate(&rgb)
    }
}
