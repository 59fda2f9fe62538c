//! Pixel classification over a decoded RGBA raster.
//!
//! A [`PixelGrid`] never changes its raster after construction. The 3x3
//! neighborhood of each queried coordinate is computed once and memoized
//! for the lifetime of the grid. Coordinates outside the raster read as
//! background, so a blob touching the image border still has an edge.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use image::RgbaImage;

use crate::config::WHITE;
use crate::error::TraceError;
use crate::vector::Vector;

/// Identity of a grid cell. Displays as `"col,row"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PixelKey {
    pub col: i64,
    pub row: i64,
}

impl PixelKey {
    pub const fn new(row: i64, col: i64) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for PixelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.col, self.row)
    }
}

/// One cell of a 3x3 neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub row: i64,
    pub col: i64,
    /// Offset inside the neighborhood, 0..=2.
    pub row_local: u8,
    pub col_local: u8,
    pub background: bool,
    pub out_of_bounds: bool,
}

impl Neighbor {
    pub fn key(&self) -> PixelKey {
        PixelKey::new(self.row, self.col)
    }
}

/// A grid cell together with its neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub row: i64,
    pub col: i64,
    pub black: bool,
    /// Black with at least one background cell in its neighborhood.
    pub is_edge: bool,
    /// Row-major `(row-1..=row+1) x (col-1..=col+1)`, index 4 is the pixel itself.
    pub neighbors: [Neighbor; 9],
}

impl Pixel {
    pub fn key(&self) -> PixelKey {
        PixelKey::new(self.row, self.col)
    }

    /// Position as a point: x = column, y = row.
    pub fn position(&self) -> Vector {
        Vector::new(self.col as f64, self.row as f64)
    }
}

/// Read-only view of an RGBA buffer with black/white classification.
#[derive(Debug)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    data: Vec<u8>,
    background: [u8; 3],
    neighborhoods: RefCell<HashMap<PixelKey, Pixel>>,
}

impl PixelGrid {
    /// Wrap a row-major RGBA buffer (4 bytes per pixel).
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, TraceError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(TraceError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
            background: WHITE,
            neighborhoods: RefCell::new(HashMap::new()),
        })
    }

    pub fn from_image(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
            background: WHITE,
            neighborhoods: RefCell::new(HashMap::new()),
        }
    }

    /// Use `rgb` instead of pure white as the background color.
    pub fn with_background(mut self, rgb: [u8; 3]) -> Self {
        self.background = rgb;
        self.neighborhoods.get_mut().clear();
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn in_bounds(&self, row: i64, col: i64) -> bool {
        row >= 0 && col >= 0 && row < self.height as i64 && col < self.width as i64
    }

    /// Out of bounds, or RGB equal to the background color.
    pub fn is_background(&self, row: i64, col: i64) -> bool {
        if !self.in_bounds(row, col) {
            return true;
        }
        let i = (row as usize * self.width as usize + col as usize) * 4;
        self.data[i..i + 3] == self.background
    }

    pub fn is_black(&self, row: i64, col: i64) -> bool {
        !self.is_background(row, col)
    }

    pub fn is_edge(&self, row: i64, col: i64) -> bool {
        self.pixel(row, col).is_edge
    }

    /// The cell at `(row, col)` with its neighborhood, memoized.
    pub fn pixel(&self, row: i64, col: i64) -> Pixel {
        let key = PixelKey::new(row, col);
        if let Some(pixel) = self.neighborhoods.borrow().get(&key) {
            return *pixel;
        }
        let pixel = self.compute(row, col);
        self.neighborhoods.borrow_mut().insert(key, pixel);
        pixel
    }

    /// Number of memoized neighborhoods.
    pub fn cached(&self) -> usize {
        self.neighborhoods.borrow().len()
    }

    fn compute(&self, row: i64, col: i64) -> Pixel {
        let neighbors: [Neighbor; 9] = std::array::from_fn(|j| {
            let row_local = (j / 3) as u8;
            let col_local = (j % 3) as u8;
            let r = row - 1 + row_local as i64;
            let c = col - 1 + col_local as i64;
            Neighbor {
                row: r,
                col: c,
                row_local,
                col_local,
                background: self.is_background(r, c),
                out_of_bounds: !self.in_bounds(r, c),
            }
        });
        let black = self.is_black(row, col);
        let touches_background = neighbors.iter().any(|n| n.background);
        Pixel {
            row,
            col,
            black,
            is_edge: black && touches_background,
            neighbors,
        }
    }
}

/// Build a grid from ASCII art: `#` is black, anything else white.
#[cfg(test)]
pub(crate) fn grid_from_art(rows: &[&str]) -> PixelGrid {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.len()) as u32;
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for row in rows {
        assert_eq!(row.len() as u32, width, "ragged art row {:?}", row);
        for ch in row.chars() {
            let v = if ch == '#' { 0 } else { 255 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    PixelGrid::new(width, height, data).unwrap()
}
