//! Video frames to Game of Life
//!
//! A raw frame is pixelated, thresholded to black and white and optionally
//! hollowed out, sampled into a cell grid, advanced one generation on a
//! torus and drawn back as blocks.

pub mod bridge;
pub mod config;
pub mod error;
pub mod game_of_life;
pub mod pipeline;
pub mod raster;
pub mod utils;

pub use config::{PixelizationConfig, Settings, SharedConfig};
pub use error::{PipelineError, PipelineResult};
pub use game_of_life::{CellGrid, LifeEngine};
pub use pipeline::{FramePipeline, TickOutput};
pub use raster::{ImageProcessor, RasterBuffer};

/// Run one frame through the pipeline with the default render style
pub fn process_tick(frame: RasterBuffer, config: PixelizationConfig) -> PipelineResult<TickOutput> {
    FramePipeline::default().process_tick(frame, config)
}
