//! Shared geometry types and utilities.

use crate::vector::Vector;

/// Axis-aligned rectangle: origin plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Smallest rectangle containing every point. Empty input gives a
    /// zero-sized rectangle at the origin.
    pub fn enclosing<'a, I>(points: I) -> Rect
    where
        I: IntoIterator<Item = &'a Vector>,
    {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        if min_x > max_x {
            return Rect::default();
        }
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
}

impl From<kurbo::Rect> for Rect {
    fn from(r: kurbo::Rect) -> Self {
        Rect::new(r.x0, r.y0, r.width(), r.height())
    }
}

impl From<Rect> for kurbo::Rect {
    fn from(r: Rect) -> Self {
        kurbo::Rect::new(r.x, r.y, r.right(), r.bottom())
    }
}

/// A circle given by its center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vector,
    pub r: f64,
}

impl Circle {
    pub fn new(center: impl Into<Vector>, r: f64) -> Self {
        Self {
            center: center.into(),
            r,
        }
    }
}

/// Signed area via shoelace formula.
///
/// Positive = counter-clockwise in a y-up frame, which reads as clockwise
/// on screen (y-down pixel coordinates).
pub fn signed_area(points: &[Vector]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            Vector::cross(&points[i], &points[j])
        })
        .sum::<f64>()
        / 2.0
}

/// Mean of the points. Zero for an empty slice.
pub fn centroid(points: &[Vector]) -> Vector {
    if points.is_empty() {
        return Vector::ZERO;
    }
    let sum = points.iter().fold(Vector::ZERO, |acc, p| acc + *p);
    sum / points.len() as f64
}
