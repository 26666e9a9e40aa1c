//! End-to-end checks of the frame pipeline through the public API

use pixel_life::bridge::{self, RenderStyle};
use pixel_life::config::{PixelizationConfig, SharedConfig};
use pixel_life::pipeline::{DisplaySurface, Driver, FrameSource, FramePipeline, TickOutput};
use pixel_life::{CellGrid, ImageProcessor, LifeEngine, PipelineError, RasterBuffer};

/// Deterministic grey-level noise
fn noise_frame(width: usize, height: usize, seed: u32) -> RasterBuffer {
    let mut state = seed;
    let mut data = Vec::with_capacity(width * height * 4);
    for _ in 0..width * height {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let v = (state >> 16) as u8;
        data.extend_from_slice(&[v, v.wrapping_add(17), v.wrapping_sub(9), 255]);
    }
    RasterBuffer::from_rgba(width, height, data).unwrap()
}

#[test]
fn test_step_output_length_matches_input() {
    for (w, h) in [(1, 7), (7, 1), (13, 9), (32, 32)] {
        let cells: Vec<bool> = (0..w * h).map(|i| (i * 7) % 5 < 2).collect();
        let next = LifeEngine::step_cells(&cells, w, h).unwrap();
        assert_eq!(next.len(), w * h);
    }
}

#[test]
fn test_center_cell_alone_dies() {
    let cells = [false, false, false, false, true, false, false, false, false];
    assert_eq!(LifeEngine::step_cells(&cells, 3, 3).unwrap(), vec![false; 9]);
}

#[test]
fn test_block_is_fixed_point_on_large_torus() {
    let mut grid = CellGrid::new(20, 20).unwrap();
    for (x, y) in [(9, 9), (10, 9), (9, 10), (10, 10)] {
        grid.set(x, y, true).unwrap();
    }
    assert_eq!(LifeEngine::step(&grid), grid);
}

#[test]
fn test_blinker_has_period_two() {
    let mut grid = CellGrid::new(9, 9).unwrap();
    for x in 3..6 {
        grid.set(x, 4, true).unwrap();
    }
    let once = LifeEngine::step(&grid);
    assert_ne!(once, grid);
    assert_eq!(once.living_cells(), vec![(4, 3), (4, 4), (4, 5)]);
    assert_eq!(LifeEngine::step(&once), grid);
}

#[test]
fn test_remove_fill_twice_equals_once() {
    for size in [1, 2, 3] {
        let mut once = noise_frame(17, 11, 42);
        ImageProcessor::threshold(&mut once, 128);
        ImageProcessor::remove_fill(&mut once, size).unwrap();

        let mut twice = once.clone();
        ImageProcessor::remove_fill(&mut twice, size).unwrap();
        assert_eq!(once, twice, "pixel size {}", size);
    }
}

#[test]
fn test_grid_raster_grid_is_idempotent() {
    for (w, h, size) in [(24, 16, 4), (25, 17, 4), (10, 10, 1)] {
        let mut frame = noise_frame(w, h, 7);
        ImageProcessor::pixelate(&mut frame, size).unwrap();
        ImageProcessor::threshold(&mut frame, 120);

        let grid = bridge::to_grid(&frame, size).unwrap();
        let mut rendered = RasterBuffer::new(w, h).unwrap();
        bridge::to_raster(&grid, &mut rendered, size, &RenderStyle::default()).unwrap();

        assert_eq!(bridge::to_grid(&rendered, size).unwrap(), grid);
    }
}

#[test]
fn test_pipeline_never_resizes() {
    let pipeline = FramePipeline::default();
    for size in [1, 3, 4, 7] {
        let config = PixelizationConfig { pixel_size: size, threshold: 110, remove_fill: true };
        let out = pipeline.process_tick(noise_frame(30, 21, size as u32), config).unwrap();
        assert_eq!((out.display.width(), out.display.height()), (30, 21));
        assert_eq!(out.next.cells.len(), out.grid.cells.len());
        assert_eq!(out.next, LifeEngine::step(&out.grid));
    }
}

#[test]
fn test_degenerate_configuration_is_rejected_up_front() {
    assert_eq!(
        SharedConfig::new(PixelizationConfig { pixel_size: 0, threshold: 100, remove_fill: true })
            .unwrap_err(),
        PipelineError::InvalidPixelSize(0)
    );
    assert!(RasterBuffer::new(0, 10).is_err());
}

struct Frames(Vec<RasterBuffer>);

impl FrameSource for Frames {
    fn next_frame(&mut self) -> anyhow::Result<Option<RasterBuffer>> {
        Ok(self.0.pop())
    }
}

struct Collect(Vec<TickOutput>);

impl DisplaySurface for Collect {
    fn present(&mut self, _tick: usize, output: &TickOutput) -> anyhow::Result<()> {
        self.0.push(output.clone());
        Ok(())
    }
}

#[test]
fn test_driver_applies_changes_between_ticks() {
    let config = SharedConfig::default();
    let driver = Driver::new(FramePipeline::default(), config.clone(), 60).unpaced();

    let mut source = Frames(vec![noise_frame(10, 10, 1), noise_frame(10, 10, 2)]);
    let mut surface = Collect(Vec::new());

    let first = driver.run(&mut source, &mut surface).unwrap();
    assert_eq!(first.ticks, 2);

    driver.config().set_pixel_size(2).unwrap();
    driver.config().toggle_remove_fill();

    let mut source = Frames(vec![noise_frame(10, 10, 3)]);
    driver.run(&mut source, &mut surface).unwrap();

    let last = surface.0.last().unwrap();
    assert_eq!(last.config.pixel_size, 2);
    assert!(!last.config.remove_fill);
    assert_eq!((last.grid.width, last.grid.height), (5, 5));
}
