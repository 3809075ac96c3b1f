//! Atlas grid and tile UV mapping.
//!
//! An atlas is split into `rows` x `cols` equal tiles. Row 0 is the top row
//! and V grows downwards. Each tile is divided vertically into a front-view
//! sprite (upper part) and a top-view sprite (lower part), or both sprites
//! cover the whole tile in full-overlap mode.

use crate::split::SplitMode;

/// A normalized texture coordinate `[u, v]`.
pub type Uv = [f64; 2];

/// Grid dimensions of an atlas. Both dimensions are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AtlasGrid {
    rows: u32,
    cols: u32,
}

impl AtlasGrid {
    /// Create a grid; zero dimensions are raised to 1.
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows: rows.max(1),
            cols: cols.max(1),
        }
    }

    /// Number of tile rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of tile columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Clamp a row index into `0..rows`.
    pub fn clamp_row(&self, row: i64) -> u32 {
        row.clamp(0, i64::from(self.rows) - 1) as u32
    }

    /// Clamp a column index into `0..cols`.
    pub fn clamp_col(&self, col: i64) -> u32 {
        col.clamp(0, i64::from(self.cols) - 1) as u32
    }

    /// Map the tile at (`row`, `col`) to its front and top UV rectangles.
    ///
    /// Out-of-range indices are clamped to the nearest tile.
    pub fn map_tile(&self, row: i64, col: i64, split: SplitMode) -> TileUvs {
        map_tile(*self, row, col, split)
    }
}

impl Default for AtlasGrid {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Front and top sprite rectangles of one tile, as min/max corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileUvs {
    pub front_min: Uv,
    pub front_max: Uv,
    pub top_min: Uv,
    pub top_max: Uv,
}

impl TileUvs {
    /// Height of the front rectangle in V.
    pub fn front_height(&self) -> f64 {
        self.front_max[1] - self.front_min[1]
    }

    /// Height of the top rectangle in V.
    pub fn top_height(&self) -> f64 {
        self.top_max[1] - self.top_min[1]
    }
}

/// Compute the UV rectangles of one atlas tile.
pub fn map_tile(grid: AtlasGrid, row: i64, col: i64, split: SplitMode) -> TileUvs {
    let row = f64::from(grid.clamp_row(row));
    let col = f64::from(grid.clamp_col(col));

    let tile_width = 1.0 / f64::from(grid.cols);
    let tile_height = 1.0 / f64::from(grid.rows);

    let u0 = col * tile_width;
    let u1 = (col + 1.0) * tile_width;
    let v0 = row * tile_height;
    let v1 = (row + 1.0) * tile_height;

    if split.is_full_overlap() {
        return TileUvs {
            front_min: [u0, v0],
            front_max: [u1, v1],
            top_min: [u0, v0],
            top_max: [u1, v1],
        };
    }

    // Keep the split inside the tile when rounding pushes it past v1.
    let v_split = (v0 + tile_height * split.front_ratio()).min(v1);

    TileUvs {
        front_min: [u0, v0],
        front_max: [u1, v_split],
        top_min: [u0, v_split],
        top_max: [u1, v1],
    }
}
