//! Frame normalisation: pixelation, thresholding and fill removal
//!
//! Every operation edits the raster in place. A raster that exists is
//! already geometrically valid, so the only runtime check is the block
//! edge length, made once on entry.

use super::buffer::{RasterBuffer, CHANNELS, PIXEL_EMPTY, PIXEL_FILLED};
use crate::error::{ensure_pixel_size, PipelineResult};
use rayon::prelude::*;

/// Image processing stage of the frame pipeline
pub struct ImageProcessor;

impl ImageProcessor {
    /// Nearest-neighbour downsample by `1/pixel_size` followed by an upsample
    /// back to the original size.
    ///
    /// Each `pixel_size` x `pixel_size` block takes the colour of its top-left
    /// pixel. Blocks on the right and bottom edges may be partial when the
    /// dimensions are not multiples of `pixel_size`.
    pub fn pixelate(raster: &mut RasterBuffer, pixel_size: usize) -> PipelineResult<()> {
        ensure_pixel_size(pixel_size)?;
        if pixel_size == 1 {
            return Ok(());
        }

        let (width, height) = (raster.width(), raster.height());
        for block_y in (0..height).step_by(pixel_size) {
            for block_x in (0..width).step_by(pixel_size) {
                let sample = raster.pixel(block_x, block_y);
                raster.fill_rect(block_x, block_y, pixel_size, pixel_size, sample);
            }
        }

        Ok(())
    }

    /// Binarise the raster: a pixel whose RGB mean is strictly below
    /// `threshold` becomes filled (0), everything else empty (255).
    ///
    /// Alpha is left alone and `threshold` is not clamped.
    pub fn threshold(raster: &mut RasterBuffer, threshold: i32) {
        let limit = 3 * i64::from(threshold);

        raster
            .as_bytes_mut()
            .par_chunks_exact_mut(CHANNELS)
            .for_each(|px| {
                let sum = i64::from(px[0]) + i64::from(px[1]) + i64::from(px[2]);
                let color = if sum < limit { PIXEL_FILLED } else { PIXEL_EMPTY };
                px[0] = color;
                px[1] = color;
                px[2] = color;
            });
    }

    /// Hollow out filled shapes for a wireframe effect.
    ///
    /// A filled pixel is cleared when none of its four neighbours, taken
    /// `pixel_size` pixels away along the flat buffer (left/right) or
    /// `pixel_size` rows away (up/down), is empty. Neighbours outside the
    /// buffer are skipped. Left/right offsets are flat-index offsets, so near
    /// a row edge they land on the adjacent row.
    pub fn remove_fill(raster: &mut RasterBuffer, pixel_size: usize) -> PipelineResult<()> {
        ensure_pixel_size(pixel_size)?;

        let pixel_count = raster.pixel_count();
        let row_stride = raster.width().checked_mul(pixel_size);
        let snapshot = raster.as_bytes().to_vec();

        raster
            .as_bytes_mut()
            .par_chunks_exact_mut(CHANNELS)
            .enumerate()
            .filter(|(p, _)| snapshot[p * CHANNELS] == PIXEL_FILLED)
            .for_each(|(p, px)| {
                // Offsets that overflow are off-grid, like negative ones
                let neighbours = [
                    p.checked_sub(pixel_size),
                    p.checked_add(pixel_size),
                    row_stride.and_then(|s| p.checked_sub(s)),
                    row_stride.and_then(|s| p.checked_add(s)),
                ];

                let touches_empty = neighbours
                    .into_iter()
                    .flatten()
                    .filter(|&n| n < pixel_count)
                    .any(|n| snapshot[n * CHANNELS] == PIXEL_EMPTY);

                if !touches_empty {
                    px[0] = PIXEL_EMPTY;
                    px[1] = PIXEL_EMPTY;
                    px[2] = PIXEL_EMPTY;
                }
            });

        Ok(())
    }
}
