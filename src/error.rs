//! Error types for the frame pipeline

use thiserror::Error;

/// Contract violations raised by the raster and grid operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("geometry mismatch: expected {expected} elements, got {actual}")]
    GeometryMismatch { expected: usize, actual: usize },

    #[error("invalid dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: usize, height: usize },

    #[error("invalid pixel size {0}: must be at least 1")]
    InvalidPixelSize(usize),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

/// Reject zero-sized geometry
pub fn ensure_dimensions(width: usize, height: usize) -> PipelineResult<()> {
    if width == 0 || height == 0 {
        return Err(PipelineError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Reject a zero block edge
pub fn ensure_pixel_size(pixel_size: usize) -> PipelineResult<()> {
    if pixel_size == 0 {
        return Err(PipelineError::InvalidPixelSize(pixel_size));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guards() {
        assert!(ensure_dimensions(3, 2).is_ok());
        assert_eq!(
            ensure_dimensions(0, 2),
            Err(PipelineError::InvalidDimensions { width: 0, height: 2 })
        );
        assert!(ensure_pixel_size(1).is_ok());
        assert_eq!(ensure_pixel_size(0), Err(PipelineError::InvalidPixelSize(0)));
    }

    #[test]
    fn test_error_messages() {
        let err = PipelineError::GeometryMismatch { expected: 16, actual: 12 };
        assert_eq!(err.to_string(), "geometry mismatch: expected 16 elements, got 12");
    }
}
