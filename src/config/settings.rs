//! Configuration settings for the frame pipeline

use crate::bridge::RenderStyle;
use crate::error::{ensure_dimensions, ensure_pixel_size, PipelineError, PipelineResult};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Threshold change applied by one increment/decrement event
pub const THRESHOLD_STEP: i32 = 5;

/// Upper soft bound for interactive threshold changes
pub const THRESHOLD_MAX: i32 = 255;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub pixelation: PixelizationConfig,
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub render: RenderStyle,
    pub output: OutputConfig,
}

/// Tunable image processing parameters, read once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelizationConfig {
    pub pixel_size: usize,
    pub threshold: i32,
    pub remove_fill: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub width: usize,
    pub height: usize,
    pub generations: usize,
    pub frame_rate: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub save_silhouette: bool,
}

impl Default for PixelizationConfig {
    fn default() -> Self {
        Self {
            pixel_size: 5,
            threshold: 100,
            remove_fill: true,
        }
    }
}

impl PixelizationConfig {
    /// Reject a configuration the pixel loops cannot run with
    pub fn validate(&self) -> PipelineResult<()> {
        ensure_pixel_size(self.pixel_size)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pixelation: PixelizationConfig::default(),
            simulation: SimulationConfig {
                width: 640,
                height: 480,
                generations: 100,
                frame_rate: 30,
            },
            render: RenderStyle::default(),
            output: OutputConfig {
                directory: PathBuf::from("output/frames"),
                save_silhouette: false,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        self.pixelation.validate()?;
        ensure_dimensions(self.simulation.width, self.simulation.height)?;

        if self.simulation.generations == 0 {
            anyhow::bail!("Number of generations must be positive");
        }

        if self.simulation.frame_rate == 0 {
            return Err(PipelineError::InvalidConfig("frame rate must be positive".into()).into());
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(pixel_size) = cli_overrides.pixel_size {
            self.pixelation.pixel_size = pixel_size;
        }
        if let Some(threshold) = cli_overrides.threshold {
            self.pixelation.threshold = threshold;
        }
        if cli_overrides.keep_fill {
            self.pixelation.remove_fill = false;
        }
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.directory = output_dir.clone();
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub pixel_size: Option<usize>,
    pub threshold: Option<i32>,
    pub keep_fill: bool,
    pub generations: Option<usize>,
    pub output_dir: Option<PathBuf>,
}

/// Pixelation settings shared with an external event source.
///
/// Writers adjust the values between ticks; the pipeline takes one
/// [`snapshot`](SharedConfig::snapshot) per tick so a frame never mixes
/// settings.
#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<PixelizationConfig>>,
}

impl SharedConfig {
    pub fn new(config: PixelizationConfig) -> PipelineResult<Self> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(RwLock::new(config)),
        })
    }

    /// Copy of the current configuration
    pub fn snapshot(&self) -> PixelizationConfig {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn update<F: FnOnce(&mut PixelizationConfig)>(&self, f: F) -> PixelizationConfig {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
        *guard
    }

    pub fn pixel_size(&self) -> usize {
        self.snapshot().pixel_size
    }

    pub fn set_pixel_size(&self, pixel_size: usize) -> PipelineResult<()> {
        ensure_pixel_size(pixel_size)?;
        self.update(|c| c.pixel_size = pixel_size);
        Ok(())
    }

    pub fn threshold(&self) -> i32 {
        self.snapshot().threshold
    }

    /// Raise the threshold by one step unless it already reached the top
    pub fn increment_threshold(&self) -> i32 {
        self.update(|c| {
            if c.threshold < THRESHOLD_MAX {
                c.threshold = (c.threshold + THRESHOLD_STEP).min(THRESHOLD_MAX);
            }
        })
        .threshold
    }

    /// Lower the threshold by one step unless it already reached zero
    pub fn decrement_threshold(&self) -> i32 {
        self.update(|c| {
            if c.threshold > 0 {
                c.threshold = (c.threshold - THRESHOLD_STEP).max(0);
            }
        })
        .threshold
    }

    pub fn remove_fill(&self) -> bool {
        self.snapshot().remove_fill
    }

    pub fn toggle_remove_fill(&self) -> bool {
        self.update(|c| c.remove_fill = !c.remove_fill).remove_fill
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.pixelation.threshold, 100);
        assert!(settings.pixelation.remove_fill);
    }

    #[test]
    fn test_validation_rejects_degenerate_values() {
        let mut settings = Settings::default();
        settings.pixelation.pixel_size = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.simulation.width = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.simulation.frame_rate = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.pixelation.pixel_size = 8;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.pixelation.pixel_size, 8);
        assert_eq!(loaded.render, RenderStyle::default());
    }

    #[test]
    fn test_merge_with_cli() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            pixel_size: Some(3),
            threshold: Some(140),
            keep_fill: true,
            generations: None,
            output_dir: Some(PathBuf::from("out")),
        });

        assert_eq!(settings.pixelation, PixelizationConfig {
            pixel_size: 3,
            threshold: 140,
            remove_fill: false,
        });
        assert_eq!(settings.simulation.generations, 100);
        assert_eq!(settings.output.directory, PathBuf::from("out"));
    }

    #[test]
    fn test_threshold_steps_are_soft_bounded() {
        let shared = SharedConfig::new(PixelizationConfig {
            threshold: 250,
            ..Default::default()
        })
        .unwrap();

        assert_eq!(shared.increment_threshold(), 255);
        assert_eq!(shared.increment_threshold(), 255);
        assert_eq!(shared.decrement_threshold(), 250);

        let low = SharedConfig::new(PixelizationConfig {
            threshold: 3,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(low.decrement_threshold(), 0);
        assert_eq!(low.decrement_threshold(), 0);
    }

    #[test]
    fn test_shared_updates_and_snapshot() {
        let shared = SharedConfig::default();
        let handle = shared.clone();

        assert!(handle.set_pixel_size(0).is_err());
        handle.set_pixel_size(10).unwrap();
        assert!(!handle.toggle_remove_fill());

        let snapshot = shared.snapshot();
        assert_eq!(snapshot.pixel_size, 10);
        assert!(!snapshot.remove_fill);

        // Later writes do not reach an existing snapshot
        handle.increment_threshold();
        assert_eq!(snapshot.threshold, 100);
        assert_eq!(shared.threshold(), 105);
    }
}
