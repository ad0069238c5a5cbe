use std::path::Path;

use crate::shared::landmarks::LandmarkVector;

/// External face-mesh model: landmarks for the first face in an image, or
/// `None` when no face is found.
pub trait FaceMeshEstimator: Send {
    fn estimate(
        &mut self,
        image: &image::RgbImage,
    ) -> Result<Option<LandmarkVector>, Box<dyn std::error::Error>>;
}

/// Produces the template landmarks for one enrollment image.
pub trait TemplateExtractor {
    fn extract(
        &mut self,
        image_path: &Path,
    ) -> Result<Option<LandmarkVector>, Box<dyn std::error::Error>>;
}
