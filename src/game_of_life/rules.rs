//! Conway's rules on a torus

use super::CellGrid;
use crate::error::PipelineResult;
use rayon::prelude::*;

/// Game of Life transition function
pub struct LifeEngine;

impl LifeEngine {
    /// Advance the grid one generation.
    ///
    /// Neighbour counts are taken from `current` only, so every cell sees the
    /// same generation.
    pub fn step(current: &CellGrid) -> CellGrid {
        let cells: Vec<bool> = (0..current.height)
            .into_par_iter()
            .flat_map_iter(|y| {
                (0..current.width).map(move |x| {
                    Self::should_be_alive(current.get(x, y), current.count_neighbors(x, y))
                })
            })
            .collect();

        CellGrid {
            width: current.width,
            height: current.height,
            cells,
        }
    }

    /// Flat-slice form of [`LifeEngine::step`]
    pub fn step_cells(cells: &[bool], width: usize, height: usize) -> PipelineResult<Vec<bool>> {
        let grid = CellGrid::from_flat(width, height, cells.to_vec())?;
        Ok(Self::step(&grid).cells)
    }

    /// Evolve the grid for multiple generations
    pub fn evolve_generations(mut grid: CellGrid, generations: usize) -> CellGrid {
        for _ in 0..generations {
            grid = Self::step(&grid);
        }
        grid
    }

    /// Birth on exactly 3, survival on 2 or 3
    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        matches!((current_state, neighbor_count), (_, 3) | (true, 2))
    }
}
