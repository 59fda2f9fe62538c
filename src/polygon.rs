//! The polygon contract consumed by the collision code.
//!
//! Triangulation happens outside this module. A [`Mesh`] only stores a
//! vertex loop with a flat, stride-3 index list into it, and the collision
//! functions read both through the [`Polygon`] trait.
//!
//! Triangles are expected in the winding where `cross(b - a, p - a) >= 0`
//! for every interior point `p` (positive shoelace area). This is not
//! re-checked here.

use crate::error::GeomError;
use crate::geom::{centroid, Rect};
use crate::vector::Vector;

/// What the collision functions need to know about a shape.
pub trait Polygon {
    /// Ordered vertex loop.
    fn vertices(&self) -> &[Vector];

    /// Flat triangle index list into [`Polygon::vertices`], stride 3.
    fn triangles(&self) -> &[usize] {
        &[]
    }

    fn boundary(&self) -> Rect {
        Rect::enclosing(self.vertices())
    }

    fn center(&self) -> Vector {
        centroid(self.vertices())
    }

    fn is_concave(&self) -> bool {
        false
    }

    fn triangle_count(&self) -> usize {
        self.triangles().len() / 3
    }

    /// The three vertices of triangle `i`.
    fn triangle(&self, i: usize) -> Option<Triangle> {
        let first = i.checked_mul(3)?;
        let indices = self.triangles().get(first..first.checked_add(3)?)?;
        let v = self.vertices();
        Some(Triangle::new(
            *v.get(indices[0])?,
            *v.get(indices[1])?,
            *v.get(indices[2])?,
        ))
    }
}

const TRIANGLE_INDICES: [usize; 3] = [0, 1, 2];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vector; 3],
}

impl Triangle {
    pub fn new(a: Vector, b: Vector, c: Vector) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Build from a slice that must hold exactly three points.
    pub fn from_slice(points: &[Vector]) -> Result<Self, GeomError> {
        match *points {
            [a, b, c] => Ok(Triangle::new(a, b, c)),
            _ => Err(GeomError::InvalidArity {
                expected: 3,
                actual: points.len(),
            }),
        }
    }

    /// Twice the signed area.
    pub fn orientation(&self) -> f64 {
        let [a, b, c] = self.vertices;
        Vector::cross(&(b - a), &(c - a))
    }
}

impl Polygon for Triangle {
    fn vertices(&self) -> &[Vector] {
        &self.vertices
    }

    fn triangles(&self) -> &[usize] {
        &TRIANGLE_INDICES
    }
}

/// A vertex loop plus its triangulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vector>,
    triangles: Vec<usize>,
    boundary: Rect,
    center: Vector,
    concave: bool,
}

impl Mesh {
    /// Wrap a triangulated vertex loop. Concavity is detected from the loop.
    pub fn new(vertices: Vec<Vector>, triangles: Vec<usize>) -> Result<Self, GeomError> {
        if triangles.len() % 3 != 0 {
            return Err(GeomError::UnsupportedInput(format!(
                "{} triangle indices (not a multiple of 3)",
                triangles.len()
            )));
        }
        if let Some(&bad) = triangles.iter().find(|&&i| i >= vertices.len()) {
            return Err(GeomError::UnsupportedInput(format!(
                "triangle index {} for {} vertices",
                bad,
                vertices.len()
            )));
        }
        let boundary = Rect::enclosing(&vertices);
        let center = centroid(&vertices);
        let concave = !is_convex(&vertices);
        Ok(Self {
            vertices,
            triangles,
            boundary,
            center,
            concave,
        })
    }

    /// A convex loop triangulated as a fan from its first vertex.
    pub fn convex(vertices: Vec<Vector>) -> Result<Self, GeomError> {
        if vertices.len() < 3 {
            return Err(GeomError::InvalidArity {
                expected: 3,
                actual: vertices.len(),
            });
        }
        let flip = crate::geom::signed_area(&vertices) < 0.0;
        let triangles = (1..vertices.len() - 1)
            .flat_map(|i| if flip { [0, i + 1, i] } else { [0, i, i + 1] })
            .collect();
        Mesh::new(vertices, triangles)
    }

    /// Override the detected concavity flag.
    pub fn with_concave(mut self, concave: bool) -> Self {
        self.concave = concave;
        self
    }
}

impl Polygon for Mesh {
    fn vertices(&self) -> &[Vector] {
        &self.vertices
    }

    fn triangles(&self) -> &[usize] {
        &self.triangles
    }

    fn boundary(&self) -> Rect {
        self.boundary
    }

    fn center(&self) -> Vector {
        self.center
    }

    fn is_concave(&self) -> bool {
        self.concave
    }
}

/// True when every turn of the loop goes the same way.
/// Collinear runs and repeated points are ignored.
pub fn is_convex(points: &[Vector]) -> bool {
    let n = points.len();
    if n < 4 {
        return true;
    }
    let mut sign = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        let turn = Vector::cross(&(b - a), &(c - b));
        if turn == 0.0 {
            continue;
        }
        if sign == 0.0 {
            sign = turn.signum();
        } else if turn.signum() != sign {
            return false;
        }
    }
    true
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn square(x: f64, y: f64, size: f64) -> Mesh {
        Mesh::convex(vec![
            Vector::new(x, y),
            Vector::new(x + size, y),
            Vector::new(x + size, y + size),
            Vector::new(x, y + size),
        ])
        .unwrap()
    }

    /// 6x6 L with 2 wide arms, fan-triangulated from the inner corner's
    /// opposite vertex.
    pub fn l_shape(x: f64, y: f64) -> Mesh {
        let vertices = [
            (0.0, 0.0),
            (6.0, 0.0),
            (6.0, 2.0),
            (2.0, 2.0),
            (2.0, 6.0),
            (0.0, 6.0),
        ]
        .iter()
        .map(|&(vx, vy)| Vector::new(x + vx, y + vy))
        .collect();
        Mesh::new(vertices, vec![0, 1, 2, 0, 2, 3, 0, 3, 4, 0, 4, 5]).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn triangle_lookup() {
        let mesh = l_shape(0.0, 0.0);
        assert_eq!(mesh.triangle_count(), 4);
        let t = mesh.triangle(1).unwrap();
        assert_eq!(
            t.vertices,
            [
                Vector::new(0.0, 0.0),
                Vector::new(6.0, 2.0),
                Vector::new(2.0, 2.0)
            ]
        );
        assert!(mesh.triangle(4).is_none());
        for i in 0..mesh.triangle_count() {
            assert!(mesh.triangle(i).unwrap().orientation() > 0.0);
        }
    }

    #[test]
    fn concavity_is_detected() {
        assert!(l_shape(0.0, 0.0).is_concave());
        assert!(!square(0.0, 0.0, 4.0).is_concave());
        assert!(square(0.0, 0.0, 4.0).with_concave(true).is_concave());
    }

    #[test]
    fn convex_fan_is_positively_oriented_for_either_winding() {
        let mut loop_ = vec![
            Vector::new(0.0, 0.0),
            Vector::new(0.0, 3.0),
            Vector::new(3.0, 3.0),
            Vector::new(3.0, 0.0),
        ];
        let cw = Mesh::convex(loop_.clone()).unwrap();
        loop_.reverse();
        let ccw = Mesh::convex(loop_).unwrap();
        for mesh in [cw, ccw] {
            assert_eq!(mesh.triangle_count(), 2);
            for i in 0..2 {
                assert!(mesh.triangle(i).unwrap().orientation() > 0.0);
            }
        }
    }

    #[test]
    fn cached_boundary_and_center() {
        let mesh = square(2.0, 3.0, 4.0);
        assert_eq!(mesh.boundary(), Rect::new(2.0, 3.0, 4.0, 4.0));
        assert_eq!(mesh.center(), Vector::new(4.0, 5.0));
    }

    #[test]
    fn bad_index_lists_are_rejected() {
        let v = vec![Vector::ZERO, Vector::new(1.0, 0.0), Vector::new(0.0, 1.0)];
        assert!(Mesh::new(v.clone(), vec![0, 1]).is_err());
        assert!(Mesh::new(v.clone(), vec![0, 1, 3]).is_err());
        assert!(Mesh::new(v, vec![0, 1, 2]).is_ok());
    }

    #[test]
    fn triangle_from_slice_checks_arity() {
        let pts = [Vector::ZERO; 4];
        assert_eq!(
            Triangle::from_slice(&pts),
            Err(GeomError::InvalidArity {
                expected: 3,
                actual: 4
            })
        );
        assert!(Triangle::from_slice(&pts[..3]).is_ok());
    }

    #[test]
    fn triangle_lookup_past_the_end_is_none() {
        let mesh = square(0.0, 0.0, 1.0);
        assert!(mesh.triangle(2).is_none());
        assert!(mesh.triangle(usize::MAX / 2).is_none());
        assert!(mesh.triangle(usize::MAX).is_none());
    }
}
