//! Traced vertex loops.

use kurbo::{BezPath, Point};

use crate::geom::{signed_area, Rect};
use crate::trace::Termination;
use crate::vector::Vector;

/// One blob boundary as an ordered vertex loop in pixel coordinates
/// (x = column, y = row, origin top-left).
///
/// The loop is implied: the last point connects back to the first, which
/// is not repeated. Winding follows the walk and is not normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub points: Vec<Vector>,
    /// The rule that closed the walk.
    pub closed_by: Termination,
}

impl Shape {
    pub fn new(points: Vec<Vector>, closed_by: Termination) -> Self {
        Self { points, closed_by }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounds(&self) -> Rect {
        Rect::enclosing(&self.points)
    }

    /// Shoelace area. Positive means clockwise on screen (y down).
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points)
    }

    pub fn is_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    pub fn reversed(&self) -> Shape {
        let mut points = self.points.clone();
        points.reverse();
        Shape::new(points, self.closed_by)
    }

    pub fn translated(&self, offset: Vector) -> Shape {
        let points = self.points.iter().map(|p| *p + offset).collect();
        Shape::new(points, self.closed_by)
    }

    /// Uniform scale about the origin, e.g. pixel → display units.
    pub fn scaled(&self, factor: f64) -> Shape {
        let points = self.points.iter().map(|p| *p * factor).collect();
        Shape::new(points, self.closed_by)
    }

    /// Closed polyline as a kurbo path.
    pub fn to_bezpath(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut points = self.points.iter().map(|p| Point::new(p.x, p.y));
        if let Some(first) = points.next() {
            path.move_to(first);
            for p in points {
                path.line_to(p);
            }
            path.close_path();
        }
        path
    }
}
