//! Console formatting utilities

use crate::game_of_life::CellGrid;
use crate::pipeline::TickOutput;

/// Format grids and tick results for the terminal
pub struct GridFormatter;

impl GridFormatter {
    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &CellGrid) -> String {
        let mut output = String::with_capacity(grid.height * (grid.width + 1));
        for row in grid.cells.chunks(grid.width) {
            output.extend(row.iter().map(|&cell| if cell { '█' } else { '·' }));
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &CellGrid) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for x in 0..grid.width {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        for (y, row) in grid.cells.chunks(grid.width).enumerate() {
            output.push_str(&format!("{:2} ", y));
            for &cell in row {
                output.push_str(if cell { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// One-line summary of a processed frame
    pub fn format_tick_summary(tick: usize, output: &TickOutput) -> String {
        let total = output.grid.cells.len();
        format!(
            "tick {:4} | {}x{} cells | px {:2} | thr {:3} | remove_fill={} | alive {:5} -> {:5} ({:.1}%)",
            tick,
            output.grid.width,
            output.grid.height,
            output.config.pixel_size,
            output.config.threshold,
            output.config.remove_fill,
            output.grid.living_count(),
            output.next.living_count(),
            output.next.living_count() as f64 / total as f64 * 100.0
        )
    }

    /// Living cell count and density
    pub fn format_statistics(grid: &CellGrid) -> String {
        let living = grid.living_count();
        format!(
            "Grid Statistics:\n  Size: {}x{}\n  Living cells: {}\n  Density: {:.1}%\n",
            grid.width,
            grid.height,
            living,
            living as f64 / grid.cells.len() as f64 * 100.0
        )
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && std::env::var("TERM").unwrap_or_default() != "dumb"
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PixelizationConfig;
    use crate::raster::RasterBuffer;

    fn sample_grid() -> CellGrid {
        CellGrid::from_rows(vec![
            vec![true, false, true],
            vec![false, true, false],
        ])
        .unwrap()
    }

    #[test]
    fn test_grid_formatting() {
        let grid = sample_grid();

        assert_eq!(GridFormatter::format_grid_compact(&grid), "█·█\n·█·\n");

        let with_coords = GridFormatter::format_grid_with_coords(&grid);
        assert!(with_coords.starts_with("    0 1 2\n"));
        assert!(with_coords.contains(" 1 ··██··"));
    }

    #[test]
    fn test_tick_summary() {
        let grid = sample_grid();
        let output = TickOutput {
            config: PixelizationConfig::default(),
            silhouette: RasterBuffer::new(15, 10).unwrap(),
            grid: grid.clone(),
            next: CellGrid::new(3, 2).unwrap(),
            display: RasterBuffer::new(15, 10).unwrap(),
        };

        let line = GridFormatter::format_tick_summary(7, &output);
        assert!(line.contains("3x2 cells"));
        assert!(line.contains("remove_fill=true"));
        assert!(line.contains("alive     3 ->     0"));
    }

    #[test]
    fn test_statistics() {
        let stats = GridFormatter::format_statistics(&sample_grid());
        assert!(stats.contains("Living cells: 3"));
        assert!(stats.contains("Density: 50.0%"));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));
        assert!(ColorOutput::success("OK").contains("OK"));
    }
}
