//! Vertex reduction for traced loops.
//!
//! A traced loop has one vertex per boundary pixel. Before triangulation
//! the straight runs are collapsed with Ramer-Douglas-Peucker.

use geo::{LineString, Simplify};

use crate::shape::Shape;
use crate::vector::Vector;

/// Drop consecutive repeats, including a last point equal to the first.
pub fn dedup(points: &[Vector]) -> Vec<Vector> {
    let mut out: Vec<Vector> = Vec::with_capacity(points.len());
    for p in points {
        if out.last() != Some(p) {
            out.push(*p);
        }
    }
    while out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    out
}

/// RDP-simplify a closed loop with tolerance `epsilon` (pixels).
///
/// Returns the de-duplicated loop unchanged when `epsilon <= 0` or when
/// simplification would leave fewer than 3 points.
pub fn simplify(shape: &Shape, epsilon: f64) -> Shape {
    let points = dedup(&shape.points);
    if points.len() <= 3 || epsilon <= 0.0 {
        return Shape::new(points, shape.closed_by);
    }

    let mut ring: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
    ring.push(ring[0]);

    let mut simplified: Vec<Vector> = LineString::from(ring)
        .simplify(&epsilon)
        .into_inner()
        .into_iter()
        .map(|coord| Vector::new(coord.x, coord.y))
        .collect();
    // Closing point.
    simplified.pop();

    if simplified.len() < 3 {
        log::debug!(
            "simplify: loop at {} would collapse to {} points, keeping {}",
            points[0],
            simplified.len(),
            points.len()
        );
        return Shape::new(points, shape.closed_by);
    }

    Shape::new(simplified, shape.closed_by)
}
