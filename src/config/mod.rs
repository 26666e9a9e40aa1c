//! Configuration management for the frame pipeline

pub mod settings;

pub use settings::{
    CliOverrides, OutputConfig, PixelizationConfig, Settings, SharedConfig, SimulationConfig,
    THRESHOLD_MAX, THRESHOLD_STEP,
};
