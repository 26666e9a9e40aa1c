//! External collaborators and the loop that drives ticks

use super::tick::{FramePipeline, TickOutput};
use crate::config::SharedConfig;
use crate::raster::RasterBuffer;
use crate::utils::GridFormatter;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// Supplies one raw frame per tick; `None` ends the run
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<RasterBuffer>>;
}

/// Receives the result of every tick
pub trait DisplaySurface {
    fn present(&mut self, tick: usize, output: &TickOutput) -> Result<()>;
}

/// Summary of a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub ticks: usize,
    pub skipped_frames: usize,
}

/// Frame-driven loop: pull a frame, snapshot the config, process, present,
/// then wait for the next tick.
pub struct Driver {
    pipeline: FramePipeline,
    config: SharedConfig,
    frame_interval: Duration,
    max_ticks: Option<usize>,
}

impl Driver {
    pub fn new(pipeline: FramePipeline, config: SharedConfig, frame_rate: u32) -> Self {
        let frame_interval = if frame_rate == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs(1) / frame_rate
        };
        Self {
            pipeline,
            config,
            frame_interval,
            max_ticks: None,
        }
    }

    /// Stop after `max_ticks` ticks even if frames remain
    pub fn with_max_ticks(mut self, max_ticks: usize) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    /// Run without pacing, as fast as frames arrive
    pub fn unpaced(mut self) -> Self {
        self.frame_interval = Duration::ZERO;
        self
    }

    /// Handle for event sources that change settings between ticks
    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    pub fn run<S, D>(&self, source: &mut S, surface: &mut D) -> Result<RunStats>
    where
        S: FrameSource + ?Sized,
        D: DisplaySurface + ?Sized,
    {
        let mut stats = RunStats::default();
        info!("Starting frame loop at {:?} per tick", self.frame_interval);

        // A tick without a frame still elapses and counts toward the limit
        while self
            .max_ticks
            .map_or(true, |max| stats.ticks + stats.skipped_frames < max)
        {
            let tick_start = Instant::now();

            match source.next_frame() {
                Ok(Some(frame)) => {
                    let config = self.config.snapshot();
                    let output = self
                        .pipeline
                        .process_tick(frame, config)
                        .with_context(|| format!("Tick {} failed", stats.ticks))?;

                    surface
                        .present(stats.ticks, &output)
                        .with_context(|| format!("Failed to present tick {}", stats.ticks))?;
                    debug!("{}", GridFormatter::format_tick_summary(stats.ticks, &output));
                    stats.ticks += 1;
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("Skipping tick {}: no frame ({:#})", stats.ticks, e);
                    stats.skipped_frames += 1;
                }
            }

            let elapsed = tick_start.elapsed();
            if let Some(remaining) = self.frame_interval.checked_sub(elapsed) {
                std::thread::sleep(remaining);
            } else {
                debug!("Tick took {:?}, longer than the frame interval", elapsed);
            }
        }

        info!(
            "Frame loop finished after {} ticks ({} skipped frames)",
            stats.ticks, stats.skipped_frames
        );
        Ok(stats)
    }
}
