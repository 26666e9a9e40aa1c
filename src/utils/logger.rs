// Minimal stderr backend for the `log` facade.
// Level comes from RUST_LOG when set, otherwise from the caller.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::time::{SystemTime, UNIX_EPOCH};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = record.args().to_string();
        eprintln!("{}", format_record(timestamp_millis(), record.level(), record.target(), &msg));
    }

    fn flush(&self) {}
}

fn format_record(ts: u128, level: Level, target: &str, msg: &str) -> String {
    format!("[{}] [{:>5}] {}: {}", ts, level, target, msg)
}

fn timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Parse a RUST_LOG-style value into a level filter
pub fn parse_level(value: &str) -> Option<LevelFilter> {
    let v = value.to_lowercase();
    if v.contains("trace") {
        Some(LevelFilter::Trace)
    } else if v.contains("debug") {
        Some(LevelFilter::Debug)
    } else if v.contains("info") {
        Some(LevelFilter::Info)
    } else if v.contains("warn") {
        Some(LevelFilter::Warn)
    } else if v.contains("error") {
        Some(LevelFilter::Error)
    } else if v.contains("off") {
        Some(LevelFilter::Off)
    } else {
        None
    }
}

/// Install the logger. A second call only adjusts the level.
pub fn init(default_level: LevelFilter) {
    let _ = log::set_logger(&LOGGER);

    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| parse_level(&v))
        .unwrap_or(default_level);
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Some(LevelFilter::Debug));
        assert_eq!(parse_level("pixel_life=warn"), Some(LevelFilter::Warn));
        assert_eq!(parse_level("nonsense"), None);
    }

    #[test]
    fn test_format_record() {
        let line = format_record(12, Level::Info, "pixel_life::pipeline", "started");
        assert_eq!(line, "[12] [ INFO] pixel_life::pipeline: started");
    }
}
