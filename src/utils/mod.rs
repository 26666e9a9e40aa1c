//! Terminal output helpers and the log backend

pub mod display;
pub mod logger;

pub use display::{Color, ColorOutput, GridFormatter};
