//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::storage::Zone;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub time: TimeConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where log files live
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
    /// Root of the year/month/day tree, used when no path is given
    pub root: Option<String>,
}

impl DataConfig {
    pub fn root_path(&self) -> Option<PathBuf> {
        self.root.as_ref().map(PathBuf::from)
    }
}

/// How calendar values are interpreted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeConfig {
    #[serde(default)]
    pub zone: Zone,
}

/// Synthetic log generator settings
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_servers")]
    pub servers: usize,

    #[serde(default = "default_cpus_per_server")]
    pub cpus_per_server: u16,

    #[serde(default = "default_interval")]
    pub interval_secs: u64,
}

fn default_servers() -> usize {
    1000
}

fn default_cpus_per_server() -> u16 {
    2
}

fn default_interval() -> u64 {
    60 // one sample per minute
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            servers: default_servers(),
            cpus_per_server: default_cpus_per_server(),
            interval_secs: default_interval(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
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

        Self::from_toml(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        // Try default config locations
        let config_paths = [
            dirs::config_dir().map(|p| p.join("cpulog").join("config.toml")),
            Some(PathBuf::from("/etc/cpulog/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(root) = std::env::var("CPULOG_DATA_DIR") {
            self.data.root = Some(root);
        }

        if let Ok(zone) = std::env::var("CPULOG_TIMEZONE") {
            match zone.parse() {
                Ok(z) => self.time.zone = z,
                Err(e) => tracing::warn!("Ignoring CPULOG_TIMEZONE: {}", e),
            }
        }

        if let Ok(level) = std::env::var("CPULOG_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("CPULOG_LOG_FORMAT") {
            self.logging.format = format;
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
    r#"# cpulog Configuration
#
# Environment variables override these settings:
# - CPULOG_DATA_DIR
# - CPULOG_TIMEZONE
# - CPULOG_LOG_LEVEL
# - CPULOG_LOG_FORMAT

[data]
# Root of the <year>/<month>/<day>.txt tree, used when no path is given
# root = "/var/log/cpulog"

[time]
# Zone for query dates and output: local or utc
zone = "local"

[generator]
# Number of simulated servers (at most 64516)
servers = 1000

# Cores per server
cpus_per_server = 2

# Seconds between samples
interval_secs = 60

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.data.root.is_none());
        assert_eq!(config.time.zone, Zone::Local);
        assert_eq!(config.generator.servers, 1000);
        assert_eq!(config.generator.cpus_per_server, 2);
        assert_eq!(config.generator.interval_secs, 60);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_default_config_parses() {
        let config = Config::from_toml(&generate_default_config()).unwrap();
        assert_eq!(config.time.zone, Zone::Local);
        assert_eq!(config.generator.servers, 1000);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml(
            r#"
            [data]
            root = "/srv/logs"

            [time]
            zone = "utc"
            "#,
        )
        .unwrap();

        assert_eq!(config.data.root_path(), Some(PathBuf::from("/srv/logs")));
        assert_eq!(config.time.zone, Zone::Utc);
        assert_eq!(config.generator.interval_secs, 60);
    }

    #[test]
    fn test_invalid_zone_rejected() {
        assert!(Config::from_toml("[time]\nzone = \"mars\"\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[generator]\nservers = 5\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.generator.servers, 5);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
