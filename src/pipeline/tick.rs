//! One frame through the whole pipeline

use crate::bridge::{self, RenderStyle};
use crate::config::PixelizationConfig;
use crate::error::PipelineResult;
use crate::game_of_life::{CellGrid, LifeEngine};
use crate::raster::{ImageProcessor, RasterBuffer};
use log::debug;
use std::time::Instant;

/// Everything produced by a single tick
#[derive(Debug, Clone)]
pub struct TickOutput {
    /// Configuration snapshot the tick ran with
    pub config: PixelizationConfig,
    /// Frame after pixelation, thresholding and optional fill removal
    pub silhouette: RasterBuffer,
    /// Cells sampled from the silhouette
    pub grid: CellGrid,
    /// One generation after `grid`
    pub next: CellGrid,
    /// `next` drawn as blocks, same size as the input frame
    pub display: RasterBuffer,
}

/// Stateless per-frame transform: frame + config -> display raster
#[derive(Debug, Clone, Default)]
pub struct FramePipeline {
    style: RenderStyle,
}

impl FramePipeline {
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Run the image processing stage on `frame` in place
    pub fn silhouette(frame: &mut RasterBuffer, config: &PixelizationConfig) -> PipelineResult<()> {
        config.validate()?;
        ImageProcessor::pixelate(frame, config.pixel_size)?;
        ImageProcessor::threshold(frame, config.threshold);
        if config.remove_fill {
            ImageProcessor::remove_fill(frame, config.pixel_size)?;
        }
        Ok(())
    }

    /// Process one frame: silhouette, sample, step, render
    pub fn process_tick(
        &self,
        mut frame: RasterBuffer,
        config: PixelizationConfig,
    ) -> PipelineResult<TickOutput> {
        let start = Instant::now();

        Self::silhouette(&mut frame, &config)?;
        let grid = bridge::to_grid(&frame, config.pixel_size)?;
        let next = LifeEngine::step(&grid);

        let mut display = RasterBuffer::new(frame.width(), frame.height())?;
        bridge::to_raster(&next, &mut display, config.pixel_size, &self.style)?;

        debug!(
            "tick {}x{} px={} threshold={} remove_fill={}: {} -> {} alive in {:?}",
            frame.width(),
            frame.height(),
            config.pixel_size,
            config.threshold,
            config.remove_fill,
            grid.living_count(),
            next.living_count(),
            start.elapsed()
        );

        Ok(TickOutput {
            config,
            silhouette: frame,
            grid,
            next,
            display,
        })
    }
}
