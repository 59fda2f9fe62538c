//! Separating axis test with a minimum translation vector.
//!
//! Convex operands are tested directly against the edge normals of both
//! polygons. A concave operand is split into the triangles of its
//! triangulation and each triangle is tested as a convex polygon; the first
//! overlapping pair decides the result.

use crate::polygon::Polygon;
use crate::vector::{Vector, Winding};

use super::aabb;

/// Minimum translation vector.
///
/// Moving the first operand by `normal * depth` makes the two shapes touch
/// instead of overlap along the axis that needed the least correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mtv {
    pub depth: f64,
    /// Unit axis, pointing from the second operand toward the first.
    pub normal: Vector,
}

/// Test `a` against `b`. `None` when they are apart or only touch.
pub fn sat<A, B>(a: &A, b: &B) -> Option<Mtv>
where
    A: Polygon + ?Sized,
    B: Polygon + ?Sized,
{
    aabb(&a.boundary(), &b.boundary())?;

    let direction = a.center() - b.center();

    match (a.is_concave(), b.is_concave()) {
        (true, true) => concave_concave(a, b, &direction),
        (true, false) => concave_convex(a, b.vertices(), &direction),
        (false, true) => concave_convex(b, a.vertices(), &direction),
        (false, false) => convex_convex(a.vertices(), b.vertices(), &direction),
    }
}

fn convex_convex(a: &[Vector], b: &[Vector], direction: &Vector) -> Option<Mtv> {
    let (a_axis, a_depth) = axis_overlap(a, b)?;
    let (b_axis, b_depth) = axis_overlap(b, a)?;

    let (mut normal, depth) = if a_depth < b_depth {
        (a_axis, a_depth)
    } else {
        (b_axis, b_depth)
    };

    if direction.dot(&normal) < 0.0 {
        normal.opposite();
    }

    Some(Mtv { depth, normal })
}

/// Smallest overlap of `a` and `b` over the edge normals of `reference`.
/// `None` as soon as one normal separates them, or when `reference` has no
/// usable edge.
fn axis_overlap(reference: &[Vector], other: &[Vector]) -> Option<(Vector, f64)> {
    let n = reference.len();
    let mut best: Option<(Vector, f64)> = None;

    for i in 0..n {
        let edge_normal =
            Vector::perpendicular(&reference[i], &reference[(i + 1) % n], Winding::default());
        // Repeated vertices give a zero edge.
        let Ok(axis) = edge_normal.normalised() else {
            continue;
        };

        let (min_a, max_a) = project(reference, &axis);
        let (min_b, max_b) = project(other, &axis);
        if min_a >= max_b || min_b >= max_a {
            return None;
        }

        let depth = (max_b - min_a).min(max_a - min_b);
        if best.map_or(true, |(_, d)| depth < d) {
            best = Some((axis, depth));
        }
    }

    best
}

fn project(vertices: &[Vector], axis: &Vector) -> (f64, f64) {
    vertices
        .iter()
        .map(|v| v.dot(axis))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), p| {
            (min.min(p), max.max(p))
        })
}

/// Every triangle of `concave` against the whole of `convex`.
fn concave_convex<P: Polygon + ?Sized>(
    concave: &P,
    convex: &[Vector],
    direction: &Vector,
) -> Option<Mtv> {
    (0..concave.triangle_count())
        .filter_map(|i| concave.triangle(i))
        .find_map(|t| convex_convex(&t.vertices, convex, direction))
}

/// Every triangle pair of the two triangulations.
fn concave_concave<A, B>(a: &A, b: &B, direction: &Vector) -> Option<Mtv>
where
    A: Polygon + ?Sized,
    B: Polygon + ?Sized,
{
    (0..a.triangle_count())
        .filter_map(|i| a.triangle(i))
        .find_map(|ta| {
            (0..b.triangle_count())
                .filter_map(|j| b.triangle(j))
                .find_map(|tb| convex_convex(&ta.vertices, &tb.vertices, direction))
        })
}
