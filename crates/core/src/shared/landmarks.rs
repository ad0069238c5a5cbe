//! Geometric helpers for per-frame landmark sets.
//!
//! Landmarks arrive frame-normalized (`x`, `y` in `[0, 1]` of the camera
//! image). Pixel conversion happens only where a threshold is expressed in
//! output pixels (face size gate, hot-zone, cursor).

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LandmarkError {
    #[error("expected {expected} landmarks, got {actual}")]
    Arity { expected: usize, actual: usize },
    #[error("expected at least {minimum} landmarks, got {actual}")]
    TooFew { minimum: usize, actual: usize },
    #[error("landmark {index} has a non-finite coordinate")]
    NonFinite { index: usize },
    #[error("frame dimensions must be non-zero, got {width}x{height}")]
    EmptyFrame { width: u32, height: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Integer position in the output (slide) resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned extrema of a landmark set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    fn scaled(&self, sx: f64, sy: f64) -> Self {
        Self {
            min_x: self.min_x * sx,
            min_y: self.min_y * sy,
            max_x: self.max_x * sx,
            max_y: self.max_y * sy,
        }
    }
}

/// Ordered, immutable sequence of normalized 2D landmarks for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct LandmarkVector {
    points: Vec<Point>,
}

impl LandmarkVector {
    pub fn new(points: Vec<Point>) -> Result<Self, LandmarkError> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(LandmarkError::NonFinite { index });
        }
        Ok(Self { points })
    }

    /// Builds a normalized vector from pixel coordinates of a `width`x`height` image.
    pub fn normalize(pixels: &[Point], width: u32, height: u32) -> Result<Self, LandmarkError> {
        if width == 0 || height == 0 {
            return Err(LandmarkError::EmptyFrame { width, height });
        }
        let (w, h) = (width as f64, height as f64);
        Self::new(pixels.iter().map(|p| Point::new(p.x / w, p.y / h)).collect())
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// Interleaved `[x0, y0, x1, y1, ...]`.
    pub fn flatten(&self) -> Array1<f64> {
        self.points.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    pub fn to_pixels(&self, width: u32, height: u32) -> Vec<Point> {
        let (w, h) = (width as f64, height as f64);
        self.points
            .iter()
            .map(|p| Point::new(p.x * w, p.y * h))
            .collect()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first = self.points.first()?;
        let init = BoundingBox {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(self.points.iter().fold(init, |b, p| BoundingBox {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        }))
    }

    /// Bounding box in pixels of a `width`x`height` image.
    pub fn pixel_bounding_box(&self, width: u32, height: u32) -> Option<BoundingBox> {
        self.bounding_box()
            .map(|b| b.scaled(width as f64, height as f64))
    }

    /// Area of the landmark extrema in pixels² (0.0 when empty).
    pub fn pixel_area(&self, width: u32, height: u32) -> f64 {
        self.pixel_bounding_box(width, height)
            .map(|b| b.area())
            .unwrap_or(0.0)
    }
}

impl TryFrom<Vec<Point>> for LandmarkVector {
    type Error = LandmarkError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<LandmarkVector> for Vec<Point> {
    fn from(v: LandmarkVector) -> Self {
        v.points
    }
}

/// Cosine similarity of the two flattened vectors, in `[-1, 1]`.
///
/// Returns 0.0 when the arities differ or either vector has zero norm.
pub fn cosine_similarity(a: &LandmarkVector, b: &LandmarkVector) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let fa = a.flatten();
    let fb = b.flatten();
    let norm_product = fa.dot(&fa).sqrt() * fb.dot(&fb).sqrt();
    if norm_product == 0.0 {
        return 0.0;
    }
    (fa.dot(&fb) / norm_product).clamp(-1.0, 1.0)
}
