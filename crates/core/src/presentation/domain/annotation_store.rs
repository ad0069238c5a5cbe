use crate::shared::landmarks::PixelPoint;

/// One continuous freehand path on a single slide.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnnotationStroke {
    points: Vec<PixelPoint>,
}

impl AnnotationStroke {
    pub fn points(&self) -> &[PixelPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Strokes of the current slide. The last stroke is the active one while
/// drawing; callers clear the store whenever the slide changes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnnotationStore {
    strokes: Vec<AnnotationStroke>,
    drawing: bool,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an empty stroke and makes it active.
    pub fn start_stroke(&mut self) {
        self.strokes.push(AnnotationStroke::default());
        self.drawing = true;
    }

    /// No-op unless a stroke is active.
    pub fn append_to_active(&mut self, point: PixelPoint) {
        if !self.drawing {
            return;
        }
        if let Some(active) = self.strokes.last_mut() {
            active.points.push(point);
        }
    }

    /// Deactivates the current stroke and keeps it.
    pub fn end_stroke(&mut self) {
        self.drawing = false;
    }

    /// Removes the most recent stroke. Returns `false` when there was none.
    pub fn erase_last(&mut self) -> bool {
        let erased = self.strokes.pop().is_some();
        if erased {
            self.drawing = false;
        }
        erased
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.drawing = false;
    }

    pub fn strokes(&self) -> &[AnnotationStroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }
}
