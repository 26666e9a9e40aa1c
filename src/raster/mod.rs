//! Raster buffers and the image processing stage

pub mod buffer;
pub mod processor;

pub use buffer::{RasterBuffer, CHANNELS, PIXEL_EMPTY, PIXEL_FILLED};
pub use processor::ImageProcessor;
