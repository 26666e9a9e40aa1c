//! Per-frame pipeline, free-running simulation and the driving loop

pub mod driver;
pub mod frames;
pub mod simulation;
pub mod tick;

pub use driver::{DisplaySurface, Driver, FrameSource, RunStats};
pub use frames::{load_frame, save_frame, ImageSequence, PngDirectory};
pub use simulation::Simulation;
pub use tick::{FramePipeline, TickOutput};
