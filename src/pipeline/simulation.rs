//! Free-running evolution seeded from a single captured frame

use crate::bridge::{self, RenderStyle};
use crate::error::PipelineResult;
use crate::game_of_life::{CellGrid, LifeEngine};
use crate::raster::RasterBuffer;

/// A grid captured from a silhouette and then left to evolve on its own
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: CellGrid,
    generation: u64,
    pixel_size: usize,
    width: usize,
    height: usize,
}

impl Simulation {
    /// Sample the silhouette into a starting grid
    pub fn seed(silhouette: &RasterBuffer, pixel_size: usize) -> PipelineResult<Self> {
        Ok(Self {
            grid: bridge::to_grid(silhouette, pixel_size)?,
            generation: 0,
            pixel_size,
            width: silhouette.width(),
            height: silhouette.height(),
        })
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Step once and return the new grid
    pub fn advance(&mut self) -> &CellGrid {
        self.grid = LifeEngine::step(&self.grid);
        self.generation += 1;
        &self.grid
    }

    /// Draw the current grid at the captured frame size
    pub fn render(&self, style: &RenderStyle) -> PipelineResult<RasterBuffer> {
        let mut raster = RasterBuffer::new(self.width, self.height)?;
        bridge::to_raster(&self.grid, &mut raster, self.pixel_size, style)?;
        Ok(raster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blinker_simulation() {
        // 5x5 cells of 2px; horizontal blinker on the middle row
        let mut silhouette = RasterBuffer::filled(10, 10, [255, 255, 255, 255]).unwrap();
        silhouette.fill_rect(2, 4, 6, 2, [0, 0, 0, 255]);

        let mut sim = Simulation::seed(&silhouette, 2).unwrap();
        let start = sim.grid().clone();
        assert_eq!(start.living_cells(), vec![(1, 2), (2, 2), (3, 2)]);

        let vertical = sim.advance().clone();
        assert_eq!(vertical.living_cells(), vec![(2, 1), (2, 2), (2, 3)]);
        sim.advance();

        assert_eq!(sim.generation(), 2);
        assert_eq!(sim.grid(), &start);

        let frame = sim.render(&RenderStyle::default()).unwrap();
        assert_eq!((frame.width(), frame.height()), (10, 10));
        assert!(frame.is_filled(2, 4));
        assert!(!frame.is_filled(4, 2));
    }

    #[test]
    fn test_seed_rejects_zero_pixel_size() {
        let silhouette = RasterBuffer::new(4, 4).unwrap();
        assert!(Simulation::seed(&silhouette, 0).is_err());
    }
}
