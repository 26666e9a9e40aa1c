//! Conversion between binarised rasters and cell grids

use crate::error::{ensure_pixel_size, PipelineError, PipelineResult};
use crate::game_of_life::CellGrid;
use crate::raster::RasterBuffer;
use serde::{Deserialize, Serialize};

/// A block-aligned filled rectangle, in raster pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Colours used when drawing a grid onto a raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStyle {
    pub fill: [u8; 4],
    pub background: [u8; 4],
}

impl Default for RenderStyle {
    fn default() -> Self {
        // The background's first channel must not read as filled
        Self {
            fill: [0, 0, 0, 255],
            background: [255, 255, 255, 0],
        }
    }
}

/// Logical grid size for a raster, counting partial edge blocks as cells
pub fn grid_dimensions(width: usize, height: usize, pixel_size: usize) -> (usize, usize) {
    (width.div_ceil(pixel_size), height.div_ceil(pixel_size))
}

/// Sample one cell per block: alive when the block's top-left pixel is filled
pub fn to_grid(raster: &RasterBuffer, pixel_size: usize) -> PipelineResult<CellGrid> {
    ensure_pixel_size(pixel_size)?;
    let (cols, rows) = grid_dimensions(raster.width(), raster.height(), pixel_size);

    let cells = (0..rows)
        .flat_map(|y| (0..cols).map(move |x| (x, y)))
        .map(|(x, y)| raster.is_filled(x * pixel_size, y * pixel_size))
        .collect();

    CellGrid::from_flat(cols, rows, cells)
}

/// Draw commands for every living cell
pub fn fill_rects(grid: &CellGrid, pixel_size: usize) -> Vec<FillRect> {
    grid.living_cells()
        .into_iter()
        .map(|(x, y)| FillRect {
            x: x * pixel_size,
            y: y * pixel_size,
            width: pixel_size,
            height: pixel_size,
        })
        .collect()
}

/// Clear `raster` to the background and paint each living cell as a block
pub fn to_raster(
    grid: &CellGrid,
    raster: &mut RasterBuffer,
    pixel_size: usize,
    style: &RenderStyle,
) -> PipelineResult<()> {
    ensure_pixel_size(pixel_size)?;
    let (cols, rows) = grid_dimensions(raster.width(), raster.height(), pixel_size);
    if (grid.width, grid.height) != (cols, rows) {
        return Err(PipelineError::GeometryMismatch {
            expected: cols * rows,
            actual: grid.cells.len(),
        });
    }

    raster.clear(style.background);
    for rect in fill_rects(grid, pixel_size) {
        raster.fill_rect(rect.x, rect.y, rect.width, rect.height, style.fill);
    }

    Ok(())
}
