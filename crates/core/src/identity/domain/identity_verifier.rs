use crate::identity::domain::face_template::{FaceTemplate, TemplateRegistry};
use crate::shared::constants::FACE_MATCH_THRESHOLD;
use crate::shared::landmarks::{cosine_similarity, LandmarkVector};

/// Best-scoring template for a live face.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchResult {
    pub label: String,
    pub score: f64,
}

/// Geometric similarity scorer for enrolled face templates.
///
/// Not a biometric comparator: the score is the cosine of the two flattened
/// landmark vectors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdentityVerifier {
    threshold: f64,
}

impl IdentityVerifier {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Cosine similarity in `[-1, 1]`; 0.0 if either side has no face.
    pub fn score(live: Option<&LandmarkVector>, template: Option<&LandmarkVector>) -> f64 {
        match (live, template) {
            (Some(a), Some(b)) => cosine_similarity(a, b),
            _ => 0.0,
        }
    }

    /// Scores every template once, in registry order. A later template
    /// replaces the current best only with a strictly greater score, so
    /// ties resolve to the lowest registry index.
    pub fn best_match(
        &self,
        live: &LandmarkVector,
        registry: &TemplateRegistry,
    ) -> Option<MatchResult> {
        Self::best_match_by(registry, |template| {
            Self::score(Some(live), template.landmarks())
        })
    }

    fn best_match_by(
        registry: &TemplateRegistry,
        mut scorer: impl FnMut(&FaceTemplate) -> f64,
    ) -> Option<MatchResult> {
        let mut best: Option<MatchResult> = None;
        for template in registry.templates() {
            let score = scorer(template);
            log::debug!("Similarity to '{}': {score:.4}", template.label());
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(MatchResult {
                    label: template.label().to_string(),
                    score,
                });
            }
        }
        best
    }

    pub fn admits(&self, result: &MatchResult) -> bool {
        result.score > self.threshold
    }
}

impl Default for IdentityVerifier {
    fn default() -> Self {
        Self::new(FACE_MATCH_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::landmarks::Point;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn vector(points: &[(f64, f64)]) -> LandmarkVector {
        LandmarkVector::new(points.iter().map(|&(x, y)| Point::new(x, y)).collect()).unwrap()
    }

    #[test]
    fn test_identical_vectors_score_one() {
        let v = vector(&[(0.4, 0.3), (0.6, 0.3), (0.5, 0.5), (0.45, 0.7), (0.55, 0.7)]);
        assert_relative_eq!(IdentityVerifier::score(Some(&v), Some(&v)), 1.0, epsilon = 1e-12);
    }

    #[rstest]
    #[case::live_missing(false, true)]
    #[case::template_missing(true, false)]
    #[case::both_missing(false, false)]
    fn test_missing_face_scores_zero(#[case] live: bool, #[case] template: bool) {
        let v = vector(&[(0.4, 0.3)]);
        let score = IdentityVerifier::score(live.then_some(&v), template.then_some(&v));
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_best_match_picks_highest() {
        let live = vector(&[(1.0, 0.0)]);
        let registry = TemplateRegistry::new(vec![
            FaceTemplate::new("far", Some(vector(&[(0.0, 1.0)]))),
            FaceTemplate::new("near", Some(vector(&[(1.0, 0.1)]))),
        ]);
        let m = IdentityVerifier::default().best_match(&live, &registry).unwrap();
        assert_eq!(m.label, "near");
        assert!(m.score > 0.99);
    }

    #[test]
    fn test_best_match_tie_resolves_to_first() {
        let live = vector(&[(1.0, 0.0)]);
        let registry = TemplateRegistry::new(vec![
            FaceTemplate::new("first", Some(vector(&[(2.0, 0.0)]))),
            FaceTemplate::new("second", Some(vector(&[(3.0, 0.0)]))),
        ]);
        let m = IdentityVerifier::default().best_match(&live, &registry).unwrap();
        assert_eq!(m.label, "first");
    }

    #[test]
    fn test_best_match_never_exceeds_max_pairwise_score() {
        let live = vector(&[(0.3, 0.8), (0.5, 0.2)]);
        let templates = vec![
            FaceTemplate::new("a", Some(vector(&[(0.2, 0.9), (0.6, 0.1)]))),
            FaceTemplate::new("b", Some(vector(&[(0.9, 0.1), (0.1, 0.9)]))),
            FaceTemplate::new("c", None),
        ];
        let max = templates
            .iter()
            .map(|t| IdentityVerifier::score(Some(&live), t.landmarks()))
            .fold(f64::MIN, f64::max);
        let registry = TemplateRegistry::new(templates);
        let m = IdentityVerifier::default().best_match(&live, &registry).unwrap();
        assert!(m.score <= max);
        assert_relative_eq!(m.score, max);
    }

    #[test]
    fn test_best_match_scores_each_template_once() {
        let registry = TemplateRegistry::new(vec![
            FaceTemplate::new("a", Some(vector(&[(1.0, 0.0)]))),
            FaceTemplate::new("b", None),
            FaceTemplate::new("c", Some(vector(&[(0.0, 1.0)]))),
        ]);
        let mut seen = Vec::new();
        let m = IdentityVerifier::best_match_by(&registry, |t| {
            seen.push(t.label().to_string());
            if t.label() == "c" {
                0.7
            } else {
                0.2
            }
        })
        .unwrap();

        assert_eq!(seen, vec!["a", "b", "c"]);
        assert_eq!(m.label, "c");
        assert_relative_eq!(m.score, 0.7);
    }

    #[test]
    fn test_best_match_empty_registry() {
        let live = vector(&[(1.0, 0.0)]);
        let registry = TemplateRegistry::new(Vec::new());
        assert!(IdentityVerifier::default().best_match(&live, &registry).is_none());
    }

    #[rstest]
    #[case::above(0.9, true)]
    #[case::at_threshold(0.85, false)]
    #[case::below(0.5, false)]
    fn test_admission_is_strict(#[case] score: f64, #[case] expected: bool) {
        let m = MatchResult {
            label: "alice".into(),
            score,
        };
        assert_eq!(IdentityVerifier::default().admits(&m), expected);
    }
}
