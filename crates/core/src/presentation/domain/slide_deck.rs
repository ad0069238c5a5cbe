use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Ordered, pre-rendered slide images. Read-only once loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideDeck {
    slides: Vec<PathBuf>,
}

impl SlideDeck {
    /// `None` for an empty sequence.
    pub fn new(slides: Vec<PathBuf>) -> Option<Self> {
        (!slides.is_empty()).then_some(Self { slides })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always false: a deck holds at least one slide.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.slides.get(index).map(PathBuf::as_path)
    }

    pub fn slide_count(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.slides.len()).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.slides.iter().map(PathBuf::as_path)
    }
}
