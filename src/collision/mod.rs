//! Collision primitives: points, boxes, circles, lines and polygons.
//!
//! Everything here is a pure function. "No intersection" is an ordinary
//! answer and comes back as `None` or `false`, never as an error.

pub mod sat;

use crate::error::GeomError;
use crate::geom::{Circle, Rect};
use crate::polygon::{Polygon, Triangle};
use crate::vector::Vector;

pub use sat::{sat, Mtv};

/// Is `p` inside the triangle (boundary included)?
///
/// `triangle` must hold exactly three vertices ordered to positive area:
/// `p` has to be on the non-negative side of each directed edge.
pub fn point_in_triangle(p: &Vector, triangle: &[Vector]) -> Result<bool, GeomError> {
    let triangle = Triangle::from_slice(triangle)?;
    Ok(triangle_contains(&triangle, p))
}

fn triangle_contains(triangle: &Triangle, p: &Vector) -> bool {
    let v = &triangle.vertices;
    (0..3).all(|i| {
        let a = v[i];
        let b = v[(i + 1) % 3];
        Vector::cross(&(b - a), &(*p - a)) >= 0.0
    })
}

/// Overlap of two rectangles, or `None` when they are apart or only touch.
///
/// Per axis, the boxes overlap when the extent they span together is
/// strictly less than the sum of their sizes.
pub fn aabb(a: &Rect, b: &Rect) -> Option<Rect> {
    let (x, w) = aabb_axis(a.x, a.w, b.x, b.w)?;
    let (y, h) = aabb_axis(a.y, a.h, b.y, b.h)?;
    Some(Rect::new(x, y, w, h))
}

fn aabb_axis(a: f64, a_size: f64, b: f64, b_size: f64) -> Option<(f64, f64)> {
    let min = a.min(b);
    let max = (a + a_size).max(b + b_size);

    let global = a_size + b_size;
    let local = max - min;
    if local < global {
        Some((a.max(b), global - local))
    } else {
        None
    }
}

/// Closed-interval containment on both axes.
pub fn point_in_rect(p: &Vector, rect: &Rect) -> bool {
    p.x >= rect.x && p.x <= rect.right() && p.y >= rect.y && p.y <= rect.bottom()
}

pub fn point_in_circle(p: &Vector, circle: &Circle) -> bool {
    Vector::distance(p, &circle.center) <= circle.r
}

/// Where two circle boundaries cross.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    /// The two crossing points.
    pub points: [Vector; 2],
    /// Foot of the radical line on the center-to-center axis.
    pub midpoint: Vector,
    /// Distance from the first center to the radical line.
    pub distance: f64,
    /// Half the chord length between the crossing points.
    pub half_height: f64,
    /// Half the radial overlap, `(r_a + r_b - d) / 2`.
    pub depth: f64,
}

/// Crossing points of two circle boundaries.
///
/// `None` when the circles are apart, nested without touching, or
/// concentric. Tangent circles give two equal points.
pub fn circle_intersection(a: &Circle, b: &Circle) -> Option<Lens> {
    let dv = b.center - a.center;
    let d = dv.magnitude();

    if d == 0.0 || d > a.r + b.r || d < (a.r - b.r).abs() {
        return None;
    }

    let ra2 = a.r * a.r;
    let distance = (ra2 - b.r * b.r + d * d) / (2.0 * d);
    let half_height = (ra2 - distance * distance).max(0.0).sqrt();

    let midpoint = a.center + dv * (distance / d);
    let offset = Vector::new(dv.y, -dv.x) * (half_height / d);

    Some(Lens {
        points: [midpoint + offset, midpoint - offset],
        midpoint,
        distance,
        half_height,
        depth: (a.r + b.r - d) / 2.0,
    })
}

/// A crossing of two lines, with the parameter along each.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub point: Vector,
    /// Position along `p1 → p2`.
    pub t: f64,
    /// Position along `p3 → p4`.
    pub u: f64,
}

/// Intersection of the infinite lines through `p1 p2` and `p3 p4`.
///
/// Parallel lines, collinear ones included, never intersect.
pub fn line_intersection(
    p1: &Vector,
    p2: &Vector,
    p3: &Vector,
    p4: &Vector,
) -> Option<Intersection> {
    let d1 = *p2 - *p1;
    let d2 = *p4 - *p3;

    let denominator = Vector::cross(&d1, &d2);
    if denominator == 0.0 {
        return None;
    }

    let d3 = *p3 - *p1;
    let t = Vector::cross(&d3, &d2) / denominator;
    let u = Vector::cross(&d3, &d1) / denominator;

    Some(Intersection {
        point: Vector::new(p1.x + t * d1.x, p1.y + t * d1.y),
        t,
        u,
    })
}

/// Like [`line_intersection`], limited to both segments (ends included).
pub fn segment_intersection(
    p1: &Vector,
    p2: &Vector,
    p3: &Vector,
    p4: &Vector,
) -> Option<Intersection> {
    line_intersection(p1, p2, p3, p4)
        .filter(|i| (0.0..=1.0).contains(&i.t) && (0.0..=1.0).contains(&i.u))
}

/// The first triangle of the polygon's triangulation that contains `p`.
pub fn containing_triangle<P: Polygon + ?Sized>(p: &Vector, polygon: &P) -> Option<Triangle> {
    (0..polygon.triangle_count())
        .filter_map(|i| polygon.triangle(i))
        .find(|t| triangle_contains(t, p))
}

/// Point-in-polygon through the triangulation.
pub fn point_in_polygon_triangles<P: Polygon + ?Sized>(p: &Vector, polygon: &P) -> bool {
    containing_triangle(p, polygon).is_some()
}

/// Point-in-polygon by counting edge crossings of a ray cast to +x.
///
/// An edge counts when exactly one endpoint lies strictly below `p.y`
/// (half-open rule), so a ray through a vertex is counted once.
pub fn point_in_polygon_ray_casting<P: Polygon + ?Sized>(p: &Vector, polygon: &P) -> bool {
    let v = polygon.vertices();
    let n = v.len();
    let mut crossings = 0;
    for i in 0..n {
        let a = v[i];
        let b = v[(i + 1) % n];
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                crossings += 1;
            }
        }
    }
    crossings % 2 == 1
}
