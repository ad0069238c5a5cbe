pub mod enrollment_directory;
pub mod image_template_extractor;
pub mod sidecar_template_extractor;
