//! Command line driver for the video-to-Life pipeline

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use pixel_life::{
    config::{CliOverrides, Settings, SharedConfig},
    game_of_life::{create_example_grids, load_grid_from_file, save_grid_to_file, LifeEngine},
    pipeline::{load_frame, Driver, FramePipeline, ImageSequence, PngDirectory, Simulation},
    utils::{logger, ColorOutput, GridFormatter},
};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "pixel_life")]
#[command(about = "Turn video frames into Game of Life grids")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run each input image through the per-frame pipeline
    Process {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Input frames, processed in order
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Block edge length in pixels (overrides config)
        #[arg(short, long)]
        pixel_size: Option<usize>,

        /// Binarisation threshold (overrides config)
        #[arg(short, long, allow_negative_numbers = true)]
        threshold: Option<i32>,

        /// Keep shapes filled instead of hollowing them
        #[arg(long)]
        keep_fill: bool,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Capture one frame and let it evolve
    Evolve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Frame to seed the simulation from
        #[arg(short, long)]
        input: PathBuf,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Block edge length in pixels (overrides config)
        #[arg(short, long)]
        pixel_size: Option<usize>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Advance a text grid file
    Step {
        /// Grid file ('0'/'1' rows)
        #[arg(short, long)]
        grid: PathBuf,

        /// Number of generations
        #[arg(short = 'n', long, default_value_t = 1)]
        generations: usize,

        /// Where to write the resulting grid
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the resulting grid as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create example configuration and grid files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(if cli.verbose { LevelFilter::Debug } else { LevelFilter::Warn });

    match cli.command {
        Commands::Process { config, input, pixel_size, threshold, keep_fill, output } => {
            let overrides = CliOverrides {
                pixel_size,
                threshold,
                keep_fill,
                generations: None,
                output_dir: output,
            };
            process_command(&config, input, &overrides, cli.verbose)
        }
        Commands::Evolve { config, input, generations, pixel_size, output } => {
            let overrides = CliOverrides {
                pixel_size,
                generations,
                output_dir: output,
                ..Default::default()
            };
            evolve_command(&config, &input, &overrides)
        }
        Commands::Step { grid, generations, output, json } => {
            step_command(&grid, generations, output, json)
        }
        Commands::Setup { directory, force } => setup_command(&directory, force),
    }
}

fn load_settings(config_path: &Path, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        println!("{}", ColorOutput::warning(&format!(
            "Config file {} not found, using defaults", config_path.display()
        )));
        Settings::default()
    };

    settings.merge_with_cli(overrides);
    settings.validate().context("Configuration validation failed")?;
    Ok(settings)
}

fn process_command(
    config_path: &Path,
    inputs: Vec<PathBuf>,
    overrides: &CliOverrides,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("🎞️  Processing frames"));
    let settings = load_settings(config_path, overrides)?;

    if verbose {
        println!("Configuration:");
        println!("  Frame size: {}x{}", settings.simulation.width, settings.simulation.height);
        println!("  Pixel size: {}", settings.pixelation.pixel_size);
        println!("  Threshold: {}", settings.pixelation.threshold);
        println!("  Remove fill: {}", settings.pixelation.remove_fill);
        println!("  Output dir: {}", settings.output.directory.display());
        println!();
    }

    let shared = SharedConfig::new(settings.pixelation)?;
    let driver = Driver::new(
        FramePipeline::new(settings.render),
        shared,
        settings.simulation.frame_rate,
    );

    let mut source = ImageSequence::new(inputs, settings.simulation.width, settings.simulation.height);
    let mut surface = PngDirectory::new(&settings.output.directory, settings.output.save_silhouette);

    let start = Instant::now();
    let stats = driver.run(&mut source, &mut surface)?;

    if stats.skipped_frames > 0 {
        println!("{}", ColorOutput::warning(&format!(
            "Skipped {} unreadable frame(s)", stats.skipped_frames
        )));
    }
    println!("{}", ColorOutput::success(&format!(
        "✅ Processed {} frame(s) in {:.3}s, wrote {} file(s) to {}",
        stats.ticks,
        start.elapsed().as_secs_f64(),
        surface.written().len(),
        settings.output.directory.display()
    )));

    Ok(())
}

fn evolve_command(config_path: &Path, input: &Path, overrides: &CliOverrides) -> Result<()> {
    println!("{}", ColorOutput::info("🧬 Seeding simulation from frame"));
    let settings = load_settings(config_path, overrides)?;

    let mut frame = load_frame(input, settings.simulation.width, settings.simulation.height)?;
    FramePipeline::silhouette(&mut frame, &settings.pixelation)?;

    let mut simulation = Simulation::seed(&frame, settings.pixelation.pixel_size)?;
    println!("{}", GridFormatter::format_statistics(simulation.grid()));

    let mut surface = PngDirectory::new(&settings.output.directory, false);
    surface.write(0, &simulation.render(&settings.render)?)?;

    for _ in 0..settings.simulation.generations {
        simulation.advance();
        let generation = simulation.generation() as usize;
        surface
            .write(generation, &simulation.render(&settings.render)?)
            .with_context(|| format!("Failed to save generation {}", generation))?;

        if simulation.grid().is_empty() {
            println!("{}", ColorOutput::warning(&format!(
                "All cells died at generation {}", generation
            )));
            break;
        }
    }

    println!("{}", ColorOutput::success(&format!(
        "✅ Wrote {} generation(s) to {}",
        surface.written().len(),
        settings.output.directory.display()
    )));

    Ok(())
}

fn step_command(
    grid_path: &Path,
    generations: usize,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let grid = load_grid_from_file(grid_path)?;

    if json {
        let evolved = LifeEngine::evolve_generations(grid, generations);
        println!("{}", serde_json::to_string_pretty(&evolved).context("Failed to serialize grid")?);
        return Ok(());
    }

    println!("Generation 0:");
    println!("{}", GridFormatter::format_grid_compact(&grid));

    let evolved = LifeEngine::evolve_generations(grid, generations);

    println!("Generation {}:", generations);
    println!("{}", GridFormatter::format_grid_with_coords(&evolved));
    println!("{}", GridFormatter::format_statistics(&evolved));

    if let Some(path) = output {
        save_grid_to_file(&evolved, &path)?;
        println!("{}", ColorOutput::success(&format!("Saved to {}", path.display())));
    }

    Ok(())
}

fn setup_command(directory: &Path, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let grids_dir = directory.join("input/grids");
    let frames_dir = directory.join("output/frames");

    for dir in [&config_dir, &grids_dir, &frames_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_grids(&grids_dir).context("Failed to create example grids")?;
    println!("Created example grids in: {}", grids_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit {}", config_path.display());
    println!("2. Run: pixel_life process --input <frame.png>...");

    Ok(())
}
