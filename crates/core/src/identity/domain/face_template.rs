use std::collections::HashSet;

use crate::shared::landmarks::LandmarkVector;

/// An enrolled identity and the landmarks captured from its reference image.
///
/// `landmarks` is `None` when no face could be extracted from the image; the
/// label still counts as enrolled but can never be matched.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceTemplate {
    label: String,
    landmarks: Option<LandmarkVector>,
}

impl FaceTemplate {
    pub fn new(label: impl Into<String>, landmarks: Option<LandmarkVector>) -> Self {
        Self {
            label: label.into(),
            landmarks,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn landmarks(&self) -> Option<&LandmarkVector> {
        self.landmarks.as_ref()
    }
}

/// Immutable, ordered set of enrolled templates. Labels are unique.
#[derive(Clone, Debug, Default)]
pub struct TemplateRegistry {
    templates: Vec<FaceTemplate>,
}

impl TemplateRegistry {
    /// Keeps the first template for each label, preserving order.
    pub fn new(templates: Vec<FaceTemplate>) -> Self {
        let mut seen = HashSet::new();
        let templates = templates
            .into_iter()
            .filter(|t| {
                let fresh = seen.insert(t.label.clone());
                if !fresh {
                    log::warn!("Duplicate enrollment for '{}' ignored", t.label);
                }
                fresh
            })
            .collect();
        Self { templates }
    }

    pub fn templates(&self) -> &[FaceTemplate] {
        &self.templates
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.label())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
