//! img2poly: bitmap image → closed polygon boundaries.
//!
//! Traces every black blob of a raster into an ordered vertex loop with a
//! Moore-neighbor boundary walk, and ships the collision geometry (point
//! tests, AABB, circles, lines, SAT) to test the traced shapes against
//! each other.
//!
//! # Example
//!
//! ```no_run
//! use img2poly::{collision, meshes, trace_image, TracingConfig};
//! use std::path::Path;
//!
//! let config = TracingConfig::default();
//! let result = trace_image(Path::new("blobs.png"), &config)?;
//! let polygons: Vec<_> = meshes(&result, &config).into_iter().flatten().collect();
//! if let [a, b, ..] = polygons.as_slice() {
//!     if let Some(mtv) = collision::sat(a, b) {
//!         println!("overlap {} along {}", mtv.depth, mtv.normal);
//!     }
//! }
//! # Ok::<(), img2poly::TraceError>(())
//! ```

#![forbid(unsafe_code)]

mod bitmap;
mod config;

pub mod collision;
pub mod error;
pub mod geom;
pub mod pixel;
pub mod polygon;
pub mod shape;
pub mod simplify;
pub mod trace;
pub mod triangulate;
pub mod vector;

// Re-export kurbo so downstream users get the same version
// used by Shape::to_bezpath.
pub use kurbo;

pub use bitmap::{binarize, grid_from_image, load_grid};
pub use config::{ThresholdMethod, TracingConfig};
pub use error::{GeomError, Limit, TraceError};
pub use geom::{Circle, Rect};
pub use pixel::{PixelGrid, PixelKey};
pub use polygon::{Mesh, Polygon, Triangle};
pub use shape::Shape;
pub use trace::{trace, Termination, Trace, Visited};
pub use triangulate::{triangulate, triangulate_all};
pub use vector::{Vector, Winding};

use std::path::Path;
use std::time::Instant;

/// Trace a raw row-major RGBA buffer.
pub fn trace_rgba(
    width: u32,
    height: u32,
    data: Vec<u8>,
    config: &TracingConfig,
) -> Result<Trace, TraceError> {
    let grid = PixelGrid::new(width, height, data)?.with_background(config.background);
    traced(&grid, config)
}

/// Full pipeline: image path → one vertex loop per blob.
pub fn trace_image(path: &Path, config: &TracingConfig) -> Result<Trace, TraceError> {
    let grid = load_grid(path, config)?;
    log::info!(
        "load: {}x{} px from {}",
        grid.width(),
        grid.height(),
        path.display()
    );
    traced(&grid, config)
}

fn traced(grid: &PixelGrid, config: &TracingConfig) -> Result<Trace, TraceError> {
    let t_start = Instant::now();
    let result = trace(grid, config)?;
    log::info!(
        "trace: {} shapes, {} pixels claimed, {} neighborhoods cached ({}ms)",
        result.shapes.len(),
        result.visited.len(),
        grid.cached(),
        t_start.elapsed().as_millis()
    );
    Ok(result)
}

/// Simplify (when `config.simplify_epsilon > 0`) and triangulate every
/// traced shape. Shapes that cannot form a polygon come back as `None`.
pub fn meshes(result: &Trace, config: &TracingConfig) -> Vec<Option<Mesh>> {
    if config.simplify_epsilon > 0.0 {
        let shapes: Vec<Shape> = result
            .shapes
            .iter()
            .map(|s| simplify::simplify(s, config.simplify_epsilon))
            .collect();
        triangulate_all(&shapes)
    } else {
        triangulate_all(&result.shapes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{point_in_polygon_ray_casting, point_in_polygon_triangles, sat};

    /// RGBA buffer with black pixels where `art` has `#`.
    fn rgba(art: &[&str]) -> (u32, u32, Vec<u8>) {
        let mut data = Vec::new();
        for row in art {
            for c in row.chars() {
                let v = if c == '#' { 0 } else { 255 };
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        (art[0].len() as u32, art.len() as u32, data)
    }

    #[test]
    fn buffer_size_is_checked() {
        let err = trace_rgba(2, 2, vec![0; 15], &TracingConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            TraceError::SizeMismatch {
                expected: 16,
                actual: 15
            }
        ));
    }

    #[test]
    fn custom_background() {
        // Black canvas, one white pixel: with a black background the white
        // pixel is the blob.
        let (w, h, mut data) = rgba(&["###", "###", "###"]);
        data[16..19].copy_from_slice(&[255, 255, 255]);
        let config = TracingConfig {
            background: [0, 0, 0],
            ..TracingConfig::default()
        };
        let result = trace_rgba(w, h, data, &config).unwrap();
        assert_eq!(result.shapes.len(), 1);
        assert_eq!(result.shapes[0].points, vec![Vector::new(1.0, 1.0)]);
    }

    #[test]
    fn traced_shapes_feed_the_collision_code() {
        let (w, h, data) = rgba(&[
            ".........",
            ".##......",
            ".##..##..",
            ".##..##..",
            ".##......",
            ".##......",
            ".#######.",
            ".#######.",
            ".........",
        ]);
        let config = TracingConfig::default();
        let result = trace_rgba(w, h, data, &config).unwrap();
        assert_eq!(result.shapes.len(), 2);

        let polygons = meshes(&result, &config);
        let l = polygons[0].as_ref().unwrap();
        let block = polygons[1].as_ref().unwrap();
        assert!(l.is_concave());
        assert!(!block.is_concave());

        // The block sits in the notch of the L: boxes overlap, shapes don't.
        assert!(collision::aabb(&l.boundary(), &block.boundary()).is_some());
        assert!(sat(l, block).is_none());
        assert!(sat(block, l).is_none());

        let in_arm = Vector::new(1.5, 4.0);
        assert!(point_in_polygon_triangles(&in_arm, l));
        assert!(point_in_polygon_ray_casting(&in_arm, l));
        let in_block = Vector::new(5.5, 2.5);
        assert!(point_in_polygon_triangles(&in_block, block));
        assert!(!point_in_polygon_ray_casting(&in_block, l));
    }

    #[test]
    fn simplified_meshes_keep_the_shape() {
        let (w, h, data) = rgba(&[".....", ".###.", ".###.", ".###.", "....."]);
        let config = TracingConfig {
            simplify_epsilon: 0.5,
            ..TracingConfig::default()
        };
        let result = trace_rgba(w, h, data, &config).unwrap();
        let polygons = meshes(&result, &config);
        let square = polygons[0].as_ref().unwrap();
        assert_eq!(square.vertices().len(), 4);
        assert_eq!(square.triangle_count(), 2);
        assert_eq!(square.boundary(), Rect::new(1.0, 1.0, 2.0, 2.0));
    }
}
