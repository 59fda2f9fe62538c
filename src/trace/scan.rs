//! Blob discovery: find the next unclaimed boundary pixel.

use crate::pixel::{Pixel, PixelGrid};

use super::Visited;

/// Raster-scan from `(row, col)` for the next start pixel.
///
/// A start is an edge pixel that is not visited and has no visited cell
/// in its neighborhood, so a blob whose boundary was already walked is
/// never entered again. The start is marked visited before it is returned.
///
/// The scan finishes the row it begins in, then continues every following
/// row from column 0.
pub fn scan(grid: &PixelGrid, visited: &mut Visited, row: i64, col: i64) -> Option<Pixel> {
    let height = grid.height() as i64;
    let width = grid.width() as i64;

    for i in row.max(0)..height {
        let first_col = if i == row { col.max(0) } else { 0 };
        for j in first_col..width {
            let point = grid.pixel(i, j);

            if !point.is_edge {
                continue;
            }
            if visited.contains(&point.key()) {
                continue;
            }
            if point.neighbors.iter().any(|n| visited.contains(&n.key())) {
                continue;
            }

            visited.insert(point.key());
            log::trace!("scan: start pixel {}", point.key());
            return Some(point);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::{grid_from_art, PixelKey};

    #[test]
    fn finds_first_edge_in_raster_order() {
        let grid = grid_from_art(&["....", "..##", ".###"]);
        let mut visited = Visited::default();
        let start = scan(&grid, &mut visited, 0, 0).unwrap();
        assert_eq!(start.key(), PixelKey::new(1, 2));
        assert!(visited.contains(&start.key()));
    }

    #[test]
    fn skips_pixels_next_to_visited_cells() {
        let grid = grid_from_art(&["###", "###"]);
        let mut visited = Visited::default();
        visited.insert(PixelKey::new(0, 0));
        // Every edge pixel touches (0,0) except the ones in column 2.
        let start = scan(&grid, &mut visited, 0, 0).unwrap();
        assert_eq!(start.key(), PixelKey::new(0, 2));
    }

    #[test]
    fn resumes_mid_row_then_wraps_to_column_zero() {
        let grid = grid_from_art(&["...#", "....", "#..."]);
        let mut visited = Visited::default();
        let first = scan(&grid, &mut visited, 0, 0).unwrap();
        assert_eq!(first.key(), PixelKey::new(0, 3));
        let second = scan(&grid, &mut visited, first.row, first.col).unwrap();
        assert_eq!(second.key(), PixelKey::new(2, 0));
        assert!(scan(&grid, &mut visited, second.row, second.col).is_none());
    }

    #[test]
    fn empty_grid_has_no_start() {
        let grid = grid_from_art(&["...", "..."]);
        let mut visited = Visited::default();
        assert!(scan(&grid, &mut visited, 0, 0).is_none());
        assert!(visited.is_empty());
    }
}
