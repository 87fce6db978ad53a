//! Layered configuration: defaults, then `roster.ron`, then environment and
//! command-line flags.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use roster_client::DirectorySettings;
use roster_core::FormValidation;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use super::logging::{LogDestination, DEFAULT_LOG_FILE};

pub const DEFAULT_CONFIG_FILE: &str = "roster.ron";

/// Terminal front-end for a REST user directory.
#[derive(Parser, Debug, Default)]
#[command(name = "roster", version)]
pub struct Args {
    /// RON configuration file; a missing file means defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
    /// Collection resource of the user directory.
    #[arg(long, env = "ROSTER_BASE_URL")]
    pub base_url: Option<String>,
    /// Log level (error, warn, info, debug, trace, off).
    #[arg(long, env = "ROSTER_LOG_LEVEL")]
    pub log_level: Option<String>,
    #[arg(long, value_enum)]
    pub log_to: Option<LogDestination>,
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Refuse to submit a form without a name and a plausible email.
    #[arg(long)]
    pub strict_form: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_body_bytes: u64,
    pub log_level: String,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
    pub strict_form: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let directory = DirectorySettings::default();
        Self {
            base_url: directory.base_url.to_string(),
            connect_timeout_secs: directory.connect_timeout.as_secs(),
            request_timeout_secs: directory.request_timeout.as_secs(),
            max_body_bytes: directory.max_bytes,
            log_level: "info".to_string(),
            log_destination: LogDestination::default(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            strict_form: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid base url {url:?}: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Reads `path`, falling back to defaults when it does not exist.
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    ron::from_str(&raw).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

impl AppConfig {
    /// Flags (and their environment fallbacks) win over file values.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(base_url) = &args.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(level) = &args.log_level {
            self.log_level = level.clone();
        }
        if let Some(destination) = args.log_to {
            self.log_destination = destination;
        }
        if let Some(log_file) = &args.log_file {
            self.log_file = log_file.clone();
        }
        if args.strict_form {
            self.strict_form = true;
        }
    }

    pub fn directory_settings(&self) -> Result<DirectorySettings, ConfigError> {
        let base_url = Url::parse(&self.base_url).map_err(|source| ConfigError::BaseUrl {
            url: self.base_url.clone(),
            source,
        })?;
        Ok(DirectorySettings {
            base_url,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_body_bytes,
        })
    }

    pub fn form_validation(&self) -> FormValidation {
        if self.strict_form {
            FormValidation::RequireFields
        } else {
            FormValidation::Permissive
        }
    }

    /// Unknown level names fall back to `Info`.
    pub fn level(&self) -> LevelFilter {
        roster_logging::parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.base_url, roster_client::DEFAULT_BASE_URL);
    }

    #[test]
    fn file_values_override_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &path,
            r#"(
                base_url: "http://localhost:3000/users",
                request_timeout_secs: 5,
                log_destination: both,
                log_file: "logs/roster.log",
                strict_form: true,
            )"#,
        )
        .unwrap();

        let config = load(&path).unwrap();

        assert_eq!(config.base_url, "http://localhost:3000/users");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.log_file, PathBuf::from("logs/roster.log"));
        assert_eq!(config.form_validation(), FormValidation::RequireFields);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "(base_url: 42").unwrap();

        assert!(matches!(load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn args_override_file_values() {
        let mut config = AppConfig {
            base_url: "http://from-file/users".to_string(),
            ..AppConfig::default()
        };
        let args = Args {
            base_url: Some("http://from-flag/users".to_string()),
            log_level: Some("debug".to_string()),
            log_to: Some(LogDestination::Terminal),
            log_file: Some(PathBuf::from("/tmp/flag.log")),
            strict_form: true,
            ..Args::default()
        };

        config.apply_args(&args);

        assert_eq!(config.base_url, "http://from-flag/users");
        assert_eq!(config.level(), LevelFilter::Debug);
        assert_eq!(config.log_destination, LogDestination::Terminal);
        assert_eq!(config.log_file, PathBuf::from("/tmp/flag.log"));
        assert!(config.strict_form);
    }

    #[test]
    fn directory_settings_reject_bad_url() {
        let config = AppConfig {
            base_url: "not a url".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.directory_settings(),
            Err(ConfigError::BaseUrl { .. })
        ));
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        let config = AppConfig {
            log_level: "chatty".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.level(), LevelFilter::Info);
    }
}
