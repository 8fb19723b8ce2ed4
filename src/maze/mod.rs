//! Maze grid: cell kinds, the built-in layout and grid → world mapping.
//!
//! A maze is a rectangular grid of `CellKind`s with a fixed `cell_size`. The
//! grid is centred on the world origin so that `grid_to_world` of the middle
//! cell lands close to `(0, y, 0)`.
//!
//! # Example:
//!
//! ```ignore
//! let grid = MazeGrid::classic();
//! let exit = grid.exit_cell().expect("classic maze has an exit");
//! let pos = grid.grid_to_world(exit, 0.5);
//! ```
pub mod loader;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Edge length of one cell in the built-in layout.
pub const DEFAULT_CELL_SIZE: f32 = 2.0;

/// Numeric codes used by maze definitions.
pub mod codes {
    pub const OPEN: u8 = 0;
    pub const WALL: u8 = 1;
    pub const EXIT: u8 = 9;
}

/// The built-in 15x15 layout. Exit sits at row 13, column 13.
pub const CLASSIC_LAYOUT: [[u8; 15]; 15] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1],
    [1, 0, 1, 0, 1, 0, 1, 1, 1, 1, 0, 1, 0, 1, 1],
    [1, 0, 1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 1],
    [1, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 0, 1, 0, 1],
    [1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 1, 0, 1],
    [1, 0, 1, 1, 0, 1, 1, 1, 1, 0, 1, 0, 1, 0, 1],
    [1, 0, 0, 1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 1],
    [1, 1, 0, 1, 1, 1, 1, 0, 1, 0, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 1],
    [1, 0, 1, 1, 1, 0, 1, 1, 1, 1, 1, 0, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 9, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// Kind of a single maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Open,
    Wall,
    Exit,
}

impl CellKind {
    /// Decode a numeric cell code. Unknown codes yield `None`.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            codes::OPEN => Some(CellKind::Open),
            codes::WALL => Some(CellKind::Wall),
            codes::EXIT => Some(CellKind::Exit),
            _ => None,
        }
    }

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            CellKind::Open => codes::OPEN,
            CellKind::Wall => codes::WALL,
            CellKind::Exit => codes::EXIT,
        }
    }
}

/// Integer `(row, column)` address of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    pub row: usize,
    pub col: usize,
}

impl GridCoord {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Rectangular, immutable grid of cells.
///
/// Cells are stored row-major. Construct through `MazeGrid::classic`,
/// `MazeGrid::from_codes` or the RON loader; every constructor guarantees
/// all rows share the same width.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeGrid {
    cells: Vec<CellKind>,
    rows: usize,
    cols: usize,
    cell_size: f32,
}

impl MazeGrid {
    /// The built-in layout with the default cell size.
    #[must_use]
    pub fn classic() -> Self {
        let cells = CLASSIC_LAYOUT
            .iter()
            .flat_map(|row| row.iter())
            .map(|&c| CellKind::from_code(c).unwrap_or(CellKind::Wall))
            .collect();
        Self { cells, rows: CLASSIC_LAYOUT.len(), cols: CLASSIC_LAYOUT[0].len(), cell_size: DEFAULT_CELL_SIZE }
    }

    /// Build a grid from numeric rows.
    ///
    /// # Errors
    /// Returns an error when the grid is empty, rows have different lengths,
    /// a code is unknown or `cell_size` is not a positive finite number.
    pub fn from_codes(rows: &[Vec<u8>], cell_size: f32) -> Result<Self, Box<dyn std::error::Error>> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(format!("cell size must be positive, got {cell_size}").into());
        }
        let Some(first) = rows.first() else {
            return Err("maze has no rows".into());
        };
        let cols = first.len();
        if cols == 0 {
            return Err("maze rows are empty".into());
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(format!("row {r} has {} cells, expected {cols}", row.len()).into());
            }
            for (c, &code) in row.iter().enumerate() {
                let kind = CellKind::from_code(code)
                    .ok_or_else(|| format!("unknown cell code {code} at ({r}, {c})"))?;
                cells.push(kind);
            }
        }

        Ok(Self { cells, rows: rows.len(), cols, cell_size })
    }

    #[must_use]
    pub fn rows(&self) -> usize { self.rows }

    #[must_use]
    pub fn cols(&self) -> usize { self.cols }

    #[must_use]
    pub fn cell_size(&self) -> f32 { self.cell_size }

    #[must_use]
    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Kind of the cell at `coord`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, coord: GridCoord) -> Option<CellKind> {
        if !self.contains(coord) {
            return None;
        }
        self.cells.get(coord.row * self.cols + coord.col).copied()
    }

    /// Iterate all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, CellKind)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &k)| (GridCoord::new(i / self.cols, i % self.cols), k))
    }

    /// The last exit cell in row-major order, if any.
    #[must_use]
    pub fn exit_cell(&self) -> Option<GridCoord> {
        self.iter().filter(|(_, k)| *k == CellKind::Exit).map(|(c, _)| c).last()
    }

    /// Map a grid cell to the world-space centre of that cell at height `y`.
    ///
    /// x follows the column axis and z follows the row axis; each axis is
    /// centred using its own grid dimension.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn grid_to_world(&self, coord: GridCoord, y: f32) -> Vec3 {
        Vec3::new(
            axis_to_world(coord.col, self.cols, self.cell_size),
            y,
            axis_to_world(coord.row, self.rows, self.cell_size),
        )
    }
}

/// `index * cell - (dimension * cell) / 2 + cell / 2`
#[inline]
#[allow(clippy::cast_precision_loss)]
pub fn axis_to_world(index: usize, dimension: usize, cell_size: f32) -> f32 {
    index as f32 * cell_size - (dimension as f32 * cell_size) / 2.0 + cell_size / 2.0
}
