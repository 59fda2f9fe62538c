//! Moore-neighbor boundary walk for a single blob.
//!
//! ## Algorithm
//!
//! The walk keeps a boundary pixel `b` (foreground) and a reference pixel
//! `p` (background, the last background cell seen next to `b`). Each step
//! sweeps the 8 cells around `b` clockwise, starting at `p`:
//!
//! - a background cell becomes the new `p`;
//! - the first foreground cell is claimed (visited + appended) and becomes
//!   the new `b`, which ends the step.
//!
//! Reaching the start pixel during a sweep triggers the closing checks,
//! first one wins:
//!
//! 1. **Start revisited**: the start pixel came up for the second time.
//! 2. **Jacob Eliosoff's criterion**: the start is entered with the same
//!    reference pixel it was left with.
//! 3. **Henry Pap's criterion**: every edge pixel around the reference
//!    pixel is already visited, the walk cannot diverge any more.
//!
//! Two more rules close walks that never meet the start again:
//!
//! - **Isolated**: a sweep found no foreground at all (single pixel blob).
//! - **Second pixel revisited**: the walk steps onto its first claimed
//!   pixel again with the same reference pixel. Hole boundaries whose start
//!   touches background only diagonally are closed this way.

use crate::error::{Limit, TraceError};
use crate::pixel::{Pixel, PixelGrid, PixelKey};
use crate::shape::Shape;
use crate::vector::Vector;

use super::Visited;

/// Indices into the row-major 3x3 neighborhood, clockwise from bottom-left.
const RING: [usize; 8] = [6, 3, 0, 1, 2, 5, 8, 7];

/// Why a boundary walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The start pixel came up a second time.
    StartRevisited,
    /// The start was re-entered from the reference pixel it was left with.
    StartEntryRepeated,
    /// All edge pixels around the reference pixel were already visited.
    EdgesExhausted,
    /// The start pixel has no foreground neighbor.
    Isolated,
    /// The first step of the walk repeated itself.
    SecondPixelRevisited,
}

/// Ring position of the cell at offset `(d_row, d_col)` from the center.
/// `(0, 0)` and anything non-adjacent map to 0.
fn ring_offset(d_row: i64, d_col: i64) -> usize {
    match (d_row, d_col) {
        (1, -1) => 0,  // bottom-left
        (0, -1) => 1,  // left
        (-1, -1) => 2, // top-left
        (-1, 0) => 3,  // top
        (-1, 1) => 4,  // top-right
        (0, 1) => 5,   // right
        (1, 1) => 6,   // bottom-right
        (1, 0) => 7,   // bottom
        _ => 0,
    }
}

/// The 8 cells around `boundary`, clockwise, starting at `previous`.
pub fn moore_sequence(grid: &PixelGrid, boundary: &Pixel, previous: &Pixel) -> [Pixel; 8] {
    let offset = ring_offset(previous.row - boundary.row, previous.col - boundary.col);
    std::array::from_fn(|i| {
        let n = boundary.neighbors[RING[(offset + i) % 8]];
        grid.pixel(n.row, n.col)
    })
}

/// Reference pixel for the first sweep: the cell left of `start`, or, when
/// that cell is foreground, the first background cell clockwise from it.
fn initial_reference(grid: &PixelGrid, start: &Pixel) -> Pixel {
    let left = grid.pixel(start.row, start.col - 1);
    if !left.black {
        return left;
    }
    (1..=8)
        .map(|i| start.neighbors[RING[i % 8]])
        .find(|n| n.background)
        .map(|n| grid.pixel(n.row, n.col))
        .unwrap_or(left)
}

/// Henry Pap's criterion.
fn edges_exhausted(grid: &PixelGrid, visited: &Visited, reference: &Pixel) -> bool {
    reference
        .neighbors
        .iter()
        .filter(|n| !n.background && grid.is_edge(n.row, n.col))
        .all(|n| visited.contains(&n.key()))
}

/// Walk the boundary of the blob containing `start`.
///
/// Every foreground pixel the walk steps onto is added to `visited`.
/// Fails with [`TraceError::TraceLimitExceeded`] if the loop is still open
/// after `max_steps` steps.
pub fn walk(
    grid: &PixelGrid,
    visited: &mut Visited,
    start: Pixel,
    max_steps: usize,
) -> Result<Shape, TraceError> {
    let start_key = start.key();
    let mut b = start;
    let mut p = initial_reference(grid, &start);
    let start_previous = p.key();
    let mut points = vec![start.position()];
    let mut hit_start = 0;
    let mut first_step: Option<(PixelKey, PixelKey)> = None;

    for step in 0..max_steps {
        let mut advanced = false;

        for c in moore_sequence(grid, &b, &p) {
            if c.key() == start_key {
                hit_start += 1;

                let rule = if hit_start > 1 {
                    Some(Termination::StartRevisited)
                } else if p.key() == start_previous {
                    Some(Termination::StartEntryRepeated)
                } else if edges_exhausted(grid, visited, &p) {
                    Some(Termination::EdgesExhausted)
                } else {
                    None
                };
                if let Some(rule) = rule {
                    return Ok(close(points, rule, start_key, step));
                }
            }

            if c.black {
                let state = (c.key(), p.key());
                if first_step == Some(state) {
                    return Ok(close(points, Termination::SecondPixelRevisited, start_key, step));
                }
                first_step.get_or_insert(state);

                visited.insert(c.key());
                points.push(c.position());
                b = c;
                advanced = true;
                break;
            }
            p = c;
        }

        if !advanced {
            return Ok(close(points, Termination::Isolated, start_key, step));
        }
    }

    Err(TraceError::TraceLimitExceeded {
        limit: Limit::Steps(max_steps),
        start: start_key,
    })
}

fn close(points: Vec<Vector>, rule: Termination, start: PixelKey, step: usize) -> Shape {
    log::debug!(
        "walk: boundary at {} closed by {:?} after {} steps, {} points",
        start,
        rule,
        step + 1,
        points.len()
    );
    Shape::new(points, rule)
}
