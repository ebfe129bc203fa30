//! Configuration system
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::stats::{BucketPeriod, TimeUnit};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub bucket: BucketConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input file configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Directory holding the numbered log files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// How many `log-<i>.txt` files to read from `data_dir`
    #[serde(default = "default_file_count")]
    pub file_count: usize,

    /// Explicit file list; overrides `data_dir`/`file_count` when non-empty
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_file_count() -> usize {
    10
}

impl InputConfig {
    /// Resolve the configured input to a concrete file list
    pub fn resolve_files(&self) -> Vec<PathBuf> {
        if !self.files.is_empty() {
            return self.files.clone();
        }
        (1..=self.file_count)
            .map(|i| self.data_dir.join(format!("log-{i}.txt")))
            .collect()
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            file_count: default_file_count(),
            files: Vec::new(),
        }
    }
}

/// Bucket width configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BucketConfig {
    #[serde(default = "default_period")]
    pub period: i64,

    #[serde(default = "default_unit")]
    pub unit: TimeUnit,
}

fn default_period() -> i64 {
    1
}

fn default_unit() -> TimeUnit {
    TimeUnit::Minutes
}

impl BucketConfig {
    /// The configured width as a [`BucketPeriod`]
    ///
    /// # Panics
    /// Panics if the configured period is not positive
    pub fn bucket_period(&self) -> BucketPeriod {
        BucketPeriod::new(self.period, self.unit)
    }
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            period: default_period(),
            unit: default_unit(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("logstat").join("config.toml")),
            Some(PathBuf::from("./logstat.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(data_dir) = std::env::var("LOGSTAT_DATA_DIR") {
            self.input.data_dir = PathBuf::from(data_dir);
        }
        if let Ok(count) = std::env::var("LOGSTAT_FILE_COUNT") {
            if let Ok(c) = count.parse() {
                self.input.file_count = c;
            }
        }
        if let Ok(period) = std::env::var("LOGSTAT_BUCKET_PERIOD") {
            if let Ok(p) = period.parse() {
                self.bucket.period = p;
            }
        }
        if let Ok(unit) = std::env::var("LOGSTAT_BUCKET_UNIT") {
            if let Ok(u) = unit.parse() {
                self.bucket.unit = u;
            }
        }
        if let Ok(level) = std::env::var("LOGSTAT_LOG_LEVEL") {
            self.logging.level = level;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            bucket: BucketConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# logstat Configuration
#
# Environment variables override these settings:
# - LOGSTAT_DATA_DIR
# - LOGSTAT_FILE_COUNT
# - LOGSTAT_BUCKET_PERIOD
# - LOGSTAT_BUCKET_UNIT
# - LOGSTAT_LOG_LEVEL

[input]
# Directory holding the numbered log files
data_dir = "data"

# How many log-<i>.txt files to read from data_dir
file_count = 10

# Explicit file list; overrides data_dir/file_count when non-empty
# files = ["data/log-1.txt", "data/log-2.txt"]

[bucket]
# Bucket width: <period> <unit>
period = 1

# One of: milliseconds, seconds, minutes, hours
unit = "minutes"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.input.file_count, 10);
        assert_eq!(config.input.data_dir, PathBuf::from("data"));
        assert_eq!(config.bucket.bucket_period().millis(), 60_000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_resolve_files_from_dir_and_count() {
        let config = InputConfig {
            data_dir: PathBuf::from("/var/log/app"),
            file_count: 3,
            files: Vec::new(),
        };
        assert_eq!(
            config.resolve_files(),
            vec![
                PathBuf::from("/var/log/app/log-1.txt"),
                PathBuf::from("/var/log/app/log-2.txt"),
                PathBuf::from("/var/log/app/log-3.txt"),
            ]
        );
    }

    #[test]
    fn test_explicit_files_win() {
        let config = InputConfig {
            files: vec![PathBuf::from("a.log"), PathBuf::from("b.log")],
            ..InputConfig::default()
        };
        assert_eq!(
            config.resolve_files(),
            vec![PathBuf::from("a.log"), PathBuf::from("b.log")]
        );
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            [input]
            data_dir = "logs"
            file_count = 2

            [bucket]
            period = 30
            unit = "seconds"
        "#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.input.data_dir, PathBuf::from("logs"));
        assert_eq!(config.input.file_count, 2);
        assert_eq!(config.bucket.bucket_period().millis(), 30_000);
        // Unspecified section falls back to defaults
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_default_config_template_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.input.file_count, 10);
        assert_eq!(config.bucket.bucket_period().millis(), 60_000);
    }
}
