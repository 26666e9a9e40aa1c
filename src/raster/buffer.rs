//! RGBA pixel storage shared by every pipeline stage

use crate::error::{ensure_dimensions, PipelineError, PipelineResult};

/// Bytes per pixel (red, green, blue, alpha)
pub const CHANNELS: usize = 4;

/// Channel value of a filled (black) pixel
pub const PIXEL_FILLED: u8 = 0;

/// Channel value of an empty (white) pixel
pub const PIXEL_EMPTY: u8 = 255;

/// A width x height RGBA8 raster, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RasterBuffer {
    /// Create a raster with every pixel set to `color`
    pub fn filled(width: usize, height: usize, color: [u8; 4]) -> PipelineResult<Self> {
        ensure_dimensions(width, height)?;
        let data = color
            .iter()
            .copied()
            .cycle()
            .take(width * height * CHANNELS)
            .collect();
        Ok(Self { width, height, data })
    }

    /// Create a fully transparent black raster
    pub fn new(width: usize, height: usize) -> PipelineResult<Self> {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Wrap raw RGBA bytes, checking the length against the geometry
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> PipelineResult<Self> {
        ensure_dimensions(width, height)?;
        let expected = width * height * CHANNELS;
        if data.len() != expected {
            return Err(PipelineError::GeometryMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels (not bytes)
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Byte offset of the pixel at (x, y)
    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * CHANNELS
    }

    /// RGBA value at (x, y)
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = self.offset(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Overwrite the RGBA value at (x, y)
    pub fn set_pixel(&mut self, x: usize, y: usize, color: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&color);
    }

    /// Paint every pixel with `color`
    pub fn clear(&mut self, color: [u8; 4]) {
        for px in self.data.chunks_exact_mut(CHANNELS) {
            px.copy_from_slice(&color);
        }
    }

    /// Fill an axis-aligned rectangle, clipped to the raster
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: [u8; 4]) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for row in y.min(y_end)..y_end {
            for col in x.min(x_end)..x_end {
                self.set_pixel(col, row, color);
            }
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// True when the pixel's first channel marks it filled
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        self.data[self.offset(x, y)] == PIXEL_FILLED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_creation() {
        let raster = RasterBuffer::filled(3, 2, [1, 2, 3, 4]).unwrap();
        assert_eq!(raster.width(), 3);
        assert_eq!(raster.height(), 2);
        assert_eq!(raster.as_bytes().len(), 24);
        assert_eq!(raster.pixel(2, 1), [1, 2, 3, 4]);
    }

    #[test]
    fn test_from_rgba_validates_length() {
        let err = RasterBuffer::from_rgba(2, 2, vec![0; 15]).unwrap_err();
        assert_eq!(err, PipelineError::GeometryMismatch { expected: 16, actual: 15 });

        assert!(RasterBuffer::from_rgba(0, 2, vec![]).is_err());
        assert!(RasterBuffer::from_rgba(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut raster = RasterBuffer::new(4, 4).unwrap();
        raster.fill_rect(2, 2, 5, 5, [9, 9, 9, 9]);

        assert_eq!(raster.pixel(3, 3), [9, 9, 9, 9]);
        assert_eq!(raster.pixel(2, 2), [9, 9, 9, 9]);
        assert_eq!(raster.pixel(1, 1), [0, 0, 0, 0]);

        // Entirely outside: nothing happens
        raster.fill_rect(10, 10, 2, 2, [1, 1, 1, 1]);
        assert!(raster.as_bytes().iter().all(|&b| b == 0 || b == 9));

        raster.fill_rect(1, 0, usize::MAX, usize::MAX, [5, 5, 5, 5]);
        assert_eq!(raster.pixel(3, 3), [5, 5, 5, 5]);
        assert_eq!(raster.pixel(0, 3), [0, 0, 0, 0]);
    }
}
