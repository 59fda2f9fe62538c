//! Traced shapes → triangulated meshes for the collision code.
//!
//! Ear clipping via earcutr. Output triangles are re-ordered to positive
//! area so the point-in-triangle test can rely on one winding.

use earcutr::earcut;
use rayon::prelude::*;

use crate::error::TraceError;
use crate::polygon::{Mesh, Triangle};
use crate::shape::Shape;

/// Triangulate one vertex loop.
///
/// Loops that enclose no area (lines, back-and-forth walks) give a mesh
/// with no triangles, which never collides with anything.
pub fn triangulate(shape: &Shape) -> Result<Mesh, TraceError> {
    if shape.len() < 3 {
        return Err(TraceError::Triangulation(format!(
            "need at least 3 points, got {}",
            shape.len()
        )));
    }

    let coords: Vec<f64> = shape.points.iter().flat_map(|p| [p.x, p.y]).collect();
    let indices = earcut(&coords, &[], 2)
        .map_err(|e| TraceError::Triangulation(format!("{:?}", e)))?;

    let triangles: Vec<usize> = indices
        .chunks_exact(3)
        .flat_map(|t| {
            let tri = Triangle::new(shape.points[t[0]], shape.points[t[1]], shape.points[t[2]]);
            if tri.orientation() < 0.0 {
                [t[0], t[2], t[1]]
            } else {
                [t[0], t[1], t[2]]
            }
        })
        .collect();

    if triangles.is_empty() {
        log::warn!(
            "triangulate: {} points starting at {} enclose no area",
            shape.len(),
            shape.points[0]
        );
    }

    Ok(Mesh::new(shape.points.clone(), triangles)?)
}

impl Mesh {
    pub fn from_shape(shape: &Shape) -> Result<Self, TraceError> {
        triangulate(shape)
    }
}

/// Triangulate every shape of a trace in parallel, keeping their order.
///
/// Shapes that cannot be triangulated (single pixels, pixel pairs) are
/// logged and come back as `None`.
pub fn triangulate_all(shapes: &[Shape]) -> Vec<Option<Mesh>> {
    shapes
        .par_iter()
        .enumerate()
        .map(|(i, shape)| match triangulate(shape) {
            Ok(mesh) => Some(mesh),
            Err(e) => {
                log::warn!("triangulate: skipping shape {}: {}", i, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::Polygon;
    use crate::trace::Termination;
    use crate::vector::Vector;

    fn shape(points: &[(f64, f64)]) -> Shape {
        Shape::new(
            points.iter().map(|&p| Vector::from(p)).collect(),
            Termination::StartEntryRepeated,
        )
    }

    fn l_loop() -> Shape {
        shape(&[
            (0.0, 0.0),
            (6.0, 0.0),
            (6.0, 2.0),
            (2.0, 2.0),
            (2.0, 6.0),
            (0.0, 6.0),
        ])
    }

    fn area(mesh: &Mesh) -> f64 {
        (0..mesh.triangle_count())
            .map(|i| mesh.triangle(i).unwrap().orientation() / 2.0)
            .sum()
    }

    #[test]
    fn l_shape_is_concave_with_four_triangles() {
        let mesh = Mesh::from_shape(&l_loop()).unwrap();
        assert_eq!(mesh.triangle_count(), 4);
        assert!(mesh.is_concave());
        assert!((area(&mesh) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn triangles_are_positive_for_either_winding() {
        for s in [l_loop(), l_loop().reversed()] {
            let mesh = triangulate(&s).unwrap();
            for i in 0..mesh.triangle_count() {
                assert!(mesh.triangle(i).unwrap().orientation() >= 0.0);
            }
        }
    }

    #[test]
    fn too_few_points() {
        let err = triangulate(&shape(&[(0.0, 0.0), (1.0, 0.0)])).unwrap_err();
        assert!(matches!(err, TraceError::Triangulation(_)));
    }

    #[test]
    fn all_shapes_keep_their_order() {
        let square = shape(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let dot = shape(&[(9.0, 9.0)]);
        let meshes = triangulate_all(&[square, dot, l_loop()]);
        assert_eq!(meshes.len(), 3);
        let first = meshes[0].as_ref().unwrap();
        assert!(!first.is_concave());
        assert_eq!(first.triangle_count(), 2);
        assert!(meshes[1].is_none());
        assert!(meshes[2].as_ref().unwrap().is_concave());
    }
}
