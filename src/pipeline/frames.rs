//! File-backed frame source and display surface

use super::driver::{DisplaySurface, FrameSource};
use super::tick::TickOutput;
use crate::raster::RasterBuffer;
use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::RgbaImage;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Decode an image file into a raster, resized to `width` x `height`
pub fn load_frame<P: AsRef<Path>>(path: P, width: usize, height: usize) -> Result<RasterBuffer> {
    let path = path.as_ref();
    let img = image::open(path)
        .with_context(|| format!("Failed to decode frame: {}", path.display()))?
        .to_rgba8();

    let (w, h) = (u32::try_from(width)?, u32::try_from(height)?);
    let img = if img.dimensions() == (w, h) {
        img
    } else {
        image::imageops::resize(&img, w, h, FilterType::Triangle)
    };

    Ok(RasterBuffer::from_rgba(width, height, img.into_raw())?)
}

/// Encode a raster as PNG
pub fn save_frame<P: AsRef<Path>>(raster: &RasterBuffer, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let img = RgbaImage::from_raw(
        u32::try_from(raster.width())?,
        u32::try_from(raster.height())?,
        raster.as_bytes().to_vec(),
    )
    .context("Raster does not fit its declared dimensions")?;

    img.save(path)
        .with_context(|| format!("Failed to write frame: {}", path.display()))
}

/// Frames read one by one from a list of image files
pub struct ImageSequence {
    paths: VecDeque<PathBuf>,
    width: usize,
    height: usize,
}

impl ImageSequence {
    pub fn new(paths: Vec<PathBuf>, width: usize, height: usize) -> Self {
        Self {
            paths: paths.into(),
            width,
            height,
        }
    }
}

impl FrameSource for ImageSequence {
    fn next_frame(&mut self) -> Result<Option<RasterBuffer>> {
        match self.paths.pop_front() {
            Some(path) => load_frame(&path, self.width, self.height).map(Some),
            None => Ok(None),
        }
    }
}

/// Writes each tick's display raster as `frame_NNNN.png`
pub struct PngDirectory {
    directory: PathBuf,
    save_silhouette: bool,
    written: Vec<PathBuf>,
}

impl PngDirectory {
    pub fn new<P: Into<PathBuf>>(directory: P, save_silhouette: bool) -> Self {
        Self {
            directory: directory.into(),
            save_silhouette,
            written: Vec::new(),
        }
    }

    /// Write a single raster under the given frame number
    pub fn write(&mut self, index: usize, raster: &RasterBuffer) -> Result<()> {
        let path = self.directory.join(format!("frame_{:04}.png", index));
        save_frame(raster, &path)?;
        self.written.push(path);
        Ok(())
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl DisplaySurface for PngDirectory {
    fn present(&mut self, tick: usize, output: &TickOutput) -> Result<()> {
        if self.save_silhouette {
            let path = self.directory.join(format!("silhouette_{:04}.png", tick));
            save_frame(&output.silhouette, &path)?;
            self.written.push(path);
        }
        self.write(tick, &output.display)
    }
}
