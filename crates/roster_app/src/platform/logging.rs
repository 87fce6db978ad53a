//! Logger setup for the roster terminal app.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{CombinedLogger, Config, ConfigBuilder, SharedLogger, WriteLogger};

pub const DEFAULT_LOG_FILE: &str = "roster.log";

/// Where log records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogDestination {
    /// The configured log file only; keeps the prompt clean.
    #[default]
    File,
    /// The terminal only.
    Terminal,
    /// Terminal and log file.
    Both,
}

impl LogDestination {
    pub fn writes_terminal(self) -> bool {
        matches!(self, LogDestination::Terminal | LogDestination::Both)
    }

    pub fn writes_file(self) -> bool {
        matches!(self, LogDestination::File | LogDestination::Both)
    }
}

/// Installs the global logger. A log file that cannot be created is reported
/// on stderr and skipped.
pub fn initialize(destination: LogDestination, level: LevelFilter, log_file: &Path) {
    let config = build_config(level);
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::with_capacity(2);

    if destination.writes_terminal() {
        loggers.push(roster_logging::terminal_logger(level, config.clone()));
    }
    if destination.writes_file() {
        match File::create(log_file) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(err) => eprintln!("Warning: could not create log file {:?}: {}", log_file, err),
        }
    }

    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
}

/// Only `roster*` targets are logged. Source locations are added once the
/// level reaches debug.
fn build_config(level: LevelFilter) -> Config {
    let location_level = if level >= LevelFilter::Debug {
        LevelFilter::Error
    } else {
        LevelFilter::Off
    };
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .set_location_level(location_level)
        .add_filter_allow_str("roster")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destinations_map_to_backends() {
        assert!(LogDestination::File.writes_file());
        assert!(!LogDestination::File.writes_terminal());
        assert!(LogDestination::Terminal.writes_terminal());
        assert!(!LogDestination::Terminal.writes_file());
        assert!(LogDestination::Both.writes_file() && LogDestination::Both.writes_terminal());
    }
}
