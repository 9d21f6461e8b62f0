//! Dashboard configuration.
//!
//! Settings come from built-in defaults, then an optional `dashboard.toml`,
//! then a handful of environment overrides:
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8050
//!
//! [data]
//! path = "comparison_data_analog_sensors.xlsx"
//! timestamp_column = "TIMESTAMP"
//! bucket_minutes = 5
//!
//! [[data.channels]]
//! column = "TempC_target_1331"
//! label = "IRT 1331"
//! ```

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::io::DEFAULT_TIMESTAMP_COLUMN;
use crate::models::{default_channels, Channel};
use crate::transformations::DEFAULT_BUCKET_MINUTES;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_VAR: &str = "DASHBOARD_CONFIG";

const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{var} must be a valid port number, got '{value}'")]
    InvalidPort { var: String, value: String },

    #[error("Invalid bind address '{0}'")]
    InvalidAddress(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Full dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Source file and how to read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    #[serde(default = "default_timestamp_column")]
    pub timestamp_column: String,
    #[serde(default = "default_channels")]
    pub channels: Vec<Channel>,
    #[serde(default = "default_bucket_minutes")]
    pub bucket_minutes: NonZeroU32,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_data_path() -> PathBuf {
    PathBuf::from("comparison_data_analog_sensors.xlsx")
}

fn default_timestamp_column() -> String {
    DEFAULT_TIMESTAMP_COLUMN.to_string()
}

fn default_bucket_minutes() -> NonZeroU32 {
    DEFAULT_BUCKET_MINUTES
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            timestamp_column: default_timestamp_column(),
            channels: default_channels(),
            bucket_minutes: default_bucket_minutes(),
        }
    }
}

impl DashboardConfig {
    /// Parse configuration from TOML text and validate it.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Find `dashboard.toml` in the standard locations.
    ///
    /// Searches, in order:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn find_default_file() -> Option<PathBuf> {
        [
            PathBuf::from("dashboard.toml"),
            PathBuf::from("backend/dashboard.toml"),
            PathBuf::from("../dashboard.toml"),
        ]
        .into_iter()
        .find(|p| p.exists())
    }

    /// Resolve the configuration the server starts with.
    ///
    /// `DASHBOARD_CONFIG` wins over the default search; without any file the
    /// built-in defaults are used. `HOST`, `PORT` and `DATA_PATH` override the
    /// result.
    pub fn load() -> Result<Self, ConfigError> {
        let file = env::var_os(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .or_else(Self::find_default_file);

        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `HOST`, `PORT` and `DATA_PATH` overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidPort {
                var: "PORT".to_string(),
                value: port.clone(),
            })?;
        }
        if let Some(path) = lookup("DATA_PATH") {
            self.data.path = PathBuf::from(path);
        }
        self.validate()
    }

    /// Check invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bucket = self.data.bucket_minutes.get();
        if MINUTES_PER_DAY % bucket != 0 {
            return Err(ConfigError::Invalid(format!(
                "bucket_minutes must divide {} so buckets start at midnight, got {}",
                MINUTES_PER_DAY, bucket
            )));
        }
        if self.data.channels.is_empty() {
            return Err(ConfigError::Invalid("at least one channel is required".to_string()));
        }
        for (i, channel) in self.data.channels.iter().enumerate() {
            if channel.column.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("channel {} has an empty column", i)));
            }
            if self.data.channels[..i].iter().any(|c| c.column == channel.column) {
                return Err(ConfigError::Invalid(format!(
                    "channel column '{}' is listed twice",
                    channel.column
                )));
            }
            if channel.column == self.data.timestamp_column {
                return Err(ConfigError::Invalid(format!(
                    "channel column '{}' is the timestamp column",
                    channel.column
                )));
            }
        }
        Ok(())
    }

    /// Socket address built from `server.host` and `server.port`.
    pub fn bind_address(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse().map_err(|_| ConfigError::InvalidAddress(addr))
    }
}
