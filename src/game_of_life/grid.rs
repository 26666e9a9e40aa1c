//! Flat boolean cell grid with toroidal neighbourhoods

use crate::error::{ensure_dimensions, PipelineError, PipelineResult};
use serde::{Deserialize, Serialize};

/// Row-major grid of alive/dead cells, index = x + y * width
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellGrid {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<bool>,
}

impl CellGrid {
    /// Create a grid of dead cells
    pub fn new(width: usize, height: usize) -> PipelineResult<Self> {
        ensure_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![false; width * height],
        })
    }

    /// Wrap a flat cell vector, checking it against the geometry
    pub fn from_flat(width: usize, height: usize, cells: Vec<bool>) -> PipelineResult<Self> {
        ensure_dimensions(width, height)?;
        if cells.len() != width * height {
            return Err(PipelineError::GeometryMismatch {
                expected: width * height,
                actual: cells.len(),
            });
        }
        Ok(Self { width, height, cells })
    }

    /// Create a grid from rows of cells
    pub fn from_rows(rows: Vec<Vec<bool>>) -> PipelineResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        ensure_dimensions(width, height)?;

        for row in &rows {
            if row.len() != width {
                return Err(PipelineError::GeometryMismatch {
                    expected: width,
                    actual: row.len(),
                });
            }
        }

        Self::from_flat(width, height, rows.into_iter().flatten().collect())
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        x + y * self.width
    }

    /// Cell value at (x, y); out of range reads as dead
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[self.index(x, y)]
    }

    /// Set the cell at (x, y)
    pub fn set(&mut self, x: usize, y: usize, alive: bool) -> PipelineResult<()> {
        if x >= self.width || y >= self.height {
            return Err(PipelineError::GeometryMismatch {
                expected: self.cells.len(),
                actual: self.index(x, y),
            });
        }
        let idx = self.index(x, y);
        self.cells[idx] = alive;
        Ok(())
    }

    /// The eight Moore neighbours of (x, y), wrapped onto the torus.
    ///
    /// With a width or height of 1 the same cell shows up more than once.
    pub fn wrapped_neighbors(&self, x: usize, y: usize) -> [(usize, usize); 8] {
        let left = (x + self.width - 1) % self.width;
        let right = (x + 1) % self.width;
        let up = (y + self.height - 1) % self.height;
        let down = (y + 1) % self.height;
        let x = x % self.width;
        let y = y % self.height;

        [
            (left, up),
            (x, up),
            (right, up),
            (left, y),
            (right, y),
            (left, down),
            (x, down),
            (right, down),
        ]
    }

    /// Count living neighbours on the torus
    pub fn count_neighbors(&self, x: usize, y: usize) -> u8 {
        self.wrapped_neighbors(x, y)
            .iter()
            .filter(|&&(nx, ny)| self.cells[self.index(nx, ny)])
            .count() as u8
    }

    /// Coordinates of every living cell
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(|(i, _)| (i % self.width, i / self.width))
            .collect()
    }

    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Check if the grid has no living cells
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }
}
