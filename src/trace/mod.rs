//! Contour tracing: pixel grid → one closed vertex loop per blob.
//!
//! 1. Scan in raster order for an unclaimed edge pixel
//! 2. Walk the blob's boundary with the Moore-neighbor sweep
//! 3. Resume the scan from the start of the last blob
//!
//! All bookkeeping lives in one [`Visited`] set owned by the run, so two
//! runs never share state.

pub mod moore;
mod scan;

use std::collections::HashSet;

use crate::config::TracingConfig;
use crate::error::{Limit, TraceError};
use crate::pixel::{PixelGrid, PixelKey};
use crate::shape::Shape;

pub use moore::Termination;
pub use scan::scan;

/// Pixels claimed by a tracing run. Only ever grows.
#[derive(Debug, Clone, Default)]
pub struct Visited(HashSet<PixelKey>);

impl Visited {
    /// Returns `true` if the key was not visited before.
    pub fn insert(&mut self, key: PixelKey) -> bool {
        self.0.insert(key)
    }

    pub fn contains(&self, key: &PixelKey) -> bool {
        self.0.contains(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PixelKey> {
        self.0.iter()
    }
}

/// The output of one tracing run.
#[derive(Debug, Clone)]
pub struct Trace {
    /// One loop per blob boundary, in discovery order.
    pub shapes: Vec<Shape>,
    /// Every pixel claimed while tracing.
    pub visited: Visited,
}

/// Trace every blob boundary in `grid`.
///
/// Fails with [`TraceError::TraceLimitExceeded`] when the run finds more
/// blobs than the configured shape limit, or a single walk exceeds the
/// step limit. Partial results are never returned.
pub fn trace(grid: &PixelGrid, config: &TracingConfig) -> Result<Trace, TraceError> {
    let (width, height) = (grid.width(), grid.height());
    let max_shapes = config.shape_limit(width, height);
    let max_steps = config.step_limit(width, height);

    let mut visited = Visited::default();
    let mut shapes: Vec<Shape> = Vec::new();

    let mut next = scan(grid, &mut visited, 0, 0);
    while let Some(start) = next {
        if shapes.len() >= max_shapes {
            return Err(TraceError::TraceLimitExceeded {
                limit: Limit::Shapes(max_shapes),
                start: start.key(),
            });
        }

        let shape = moore::walk(grid, &mut visited, start, max_steps)?;
        shapes.push(shape);
        next = scan(grid, &mut visited, start.row, start.col);
    }

    log::debug!(
        "trace: {} shapes, {} visited pixels in {}x{} grid",
        shapes.len(),
        visited.len(),
        width,
        height
    );

    Ok(Trace { shapes, visited })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Rect;
    use crate::pixel::grid_from_art;
    use crate::pixel::PixelGrid;

    fn xy(shape: &Shape) -> Vec<(i64, i64)> {
        shape.points.iter().map(|p| (p.x as i64, p.y as i64)).collect()
    }

    /// `w` x `h` black rectangle at (`col`, `row`) inside a white canvas.
    fn rectangle(canvas_w: u32, canvas_h: u32, col: u32, row: u32, w: u32, h: u32) -> PixelGrid {
        let mut data = Vec::new();
        for r in 0..canvas_h {
            for c in 0..canvas_w {
                let inside = c >= col && c < col + w && r >= row && r < row + h;
                let v = if inside { 0 } else { 255 };
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        PixelGrid::new(canvas_w, canvas_h, data).unwrap()
    }

    #[test]
    fn three_by_three_golden() {
        let grid = grid_from_art(&["###", "###", "###"]);
        let result = trace(&grid, &TracingConfig::default()).unwrap();
        assert_eq!(result.shapes.len(), 1);
        assert_eq!(
            xy(&result.shapes[0]),
            vec![(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (1, 2), (0, 2), (0, 1)]
        );
        assert_eq!(result.shapes[0].closed_by, Termination::StartEntryRepeated);
        // The center pixel is not an edge and is never claimed.
        assert_eq!(result.visited.len(), 8);
        assert!(!result.visited.contains(&PixelKey::new(1, 1)));
    }

    #[test]
    fn rectangle_bounds_match_blob_extent() {
        for (w, h) in [(1, 1), (1, 4), (5, 1), (2, 2), (3, 7), (6, 4), (9, 9)] {
            let grid = rectangle(12, 12, 2, 1, w, h);
            let result = trace(&grid, &TracingConfig::default()).unwrap();
            assert_eq!(result.shapes.len(), 1, "{}x{}", w, h);
            let shape = &result.shapes[0];
            assert_eq!(
                shape.bounds(),
                Rect::new(2.0, 1.0, (w - 1) as f64, (h - 1) as f64),
                "{}x{}",
                w,
                h
            );
            if shape.len() > 1 {
                assert_ne!(shape.points.first(), shape.points.last());
            }
        }
    }

    #[test]
    fn annulus_yields_outer_and_inner_boundary() {
        let grid = grid_from_art(&[
            "...........",
            ".#########.",
            ".#########.",
            ".#########.",
            ".###...###.",
            ".###...###.",
            ".###...###.",
            ".#########.",
            ".#########.",
            ".#########.",
            "...........",
        ]);
        let result = trace(&grid, &TracingConfig::default()).unwrap();
        assert_eq!(result.shapes.len(), 2);

        let outer = &result.shapes[0];
        let inner = &result.shapes[1];
        assert_eq!(outer.bounds(), Rect::new(1.0, 1.0, 8.0, 8.0));
        assert_eq!(outer.len(), 32);
        assert_eq!(inner.bounds(), Rect::new(3.0, 3.0, 4.0, 4.0));
        assert_eq!(inner.closed_by, Termination::SecondPixelRevisited);

        // No pixel is claimed by both loops.
        let outer_px: HashSet<_> = xy(outer).into_iter().collect();
        assert!(xy(inner).iter().all(|p| !outer_px.contains(p)));
        let inner_px: HashSet<_> = xy(inner).into_iter().collect();
        let claimed: HashSet<_> = result
            .visited
            .iter()
            .map(|k| (k.col, k.row))
            .collect();
        assert_eq!(claimed, &outer_px | &inner_px);
    }

    #[test]
    fn separate_blobs_are_found_in_scan_order() {
        let grid = grid_from_art(&["....##", "......", "##....", "......", "..#..."]);
        let result = trace(&grid, &TracingConfig::default()).unwrap();
        let starts: Vec<(i64, i64)> = result.shapes.iter().map(|s| xy(s)[0]).collect();
        assert_eq!(starts, vec![(4, 0), (0, 2), (2, 4)]);
        assert_eq!(result.shapes[2].closed_by, Termination::Isolated);
    }

    #[test]
    fn shape_limit_is_an_error() {
        let grid = grid_from_art(&["#.#"]);
        let config = TracingConfig {
            max_shapes: Some(1),
            ..TracingConfig::default()
        };
        let err = trace(&grid, &config).unwrap_err();
        assert!(matches!(
            err,
            TraceError::TraceLimitExceeded {
                limit: Limit::Shapes(1),
                start: PixelKey { col: 2, row: 0 },
            }
        ));
    }

    #[test]
    fn runs_do_not_share_state() {
        let grid = grid_from_art(&["##.", "##.", "..#"]);
        let first = trace(&grid, &TracingConfig::default()).unwrap();
        let second = trace(&grid, &TracingConfig::default()).unwrap();
        assert_eq!(first.shapes.len(), second.shapes.len());
        assert_eq!(first.visited.len(), second.visited.len());
    }

    #[test]
    fn empty_image_has_no_shapes() {
        let grid = grid_from_art(&["....", "...."]);
        let result = trace(&grid, &TracingConfig::default()).unwrap();
        assert!(result.shapes.is_empty());
        assert!(result.visited.is_empty());
    }
}
