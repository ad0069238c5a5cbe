use std::fs;
use std::path::{Path, PathBuf};

use crate::identity::domain::face_template::{FaceTemplate, TemplateRegistry};
use crate::identity::domain::template_extractor::TemplateExtractor;
use crate::shared::constants::ENROLLMENT_EXTENSIONS;
use crate::shared::error::StartupError;

/// One approved-user image: `<label>.<ext>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enrollment {
    pub label: String,
    pub path: PathBuf,
}

/// Directory of approved-user reference images, read once at startup.
pub struct EnrollmentDirectory {
    dir: PathBuf,
}

impl EnrollmentDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Lists enrollment images sorted by file name. A missing directory is
    /// created and yields no enrollments.
    pub fn scan(&self) -> Result<Vec<Enrollment>, StartupError> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|source| StartupError::Io {
                path: self.dir.clone(),
                source,
            })?;
            log::info!("Created auth database at: {}", self.dir.display());
            log::info!(
                "Add approved user images as '{}/<username>.jpg'",
                self.dir.display()
            );
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).map_err(|source| StartupError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut enrollments = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|source| StartupError::Io {
                    path: self.dir.clone(),
                    source,
                })?
                .path();
            if !path.is_file() || !is_enrollment_image(&path) {
                continue;
            }
            if let Some(label) = label_of(&path) {
                enrollments.push(Enrollment { label, path });
            }
        }
        enrollments.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
        Ok(enrollments)
    }

    /// Builds the template registry. Images the extractor cannot read or
    /// finds no face in are kept as unmatchable templates.
    pub fn load(
        &self,
        extractor: &mut dyn TemplateExtractor,
    ) -> Result<TemplateRegistry, StartupError> {
        let enrollments = self.scan()?;
        if enrollments.is_empty() {
            return Err(StartupError::NoTemplates(self.dir.clone()));
        }

        let templates: Vec<FaceTemplate> = enrollments
            .into_iter()
            .map(|e| {
                let landmarks = match extractor.extract(&e.path) {
                    Ok(Some(landmarks)) => Some(landmarks),
                    Ok(None) => {
                        log::warn!("No face found in enrollment image {}", e.path.display());
                        None
                    }
                    Err(err) => {
                        log::warn!("Skipping landmarks for {}: {err}", e.path.display());
                        None
                    }
                };
                FaceTemplate::new(e.label, landmarks)
            })
            .collect();

        let registry = TemplateRegistry::new(templates);
        log::info!(
            "Loaded {} approved user(s) from {}",
            registry.len(),
            self.dir.display()
        );
        Ok(registry)
    }
}

fn is_enrollment_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ENROLLMENT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// File name up to the first '.'.
fn label_of(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let label = name.split('.').next()?;
    (!label.is_empty()).then(|| label.to_string())
}
