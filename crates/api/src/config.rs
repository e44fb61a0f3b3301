//! Environment configuration for the API binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use homestock_observability::{LogFormat, LogSettings};

pub const BIND_ADDR_VAR: &str = "HOMESTOCK_BIND_ADDR";
pub const DATA_FILE_VAR: &str = "HOMESTOCK_DATA_FILE";
pub const LOG_FORMAT_VAR: &str = "HOMESTOCK_LOG_FORMAT";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a socket address: `{value}`")]
    InvalidBindAddr { var: &'static str, value: String },

    #[error("{var} is set but empty")]
    EmptyDataFile { var: &'static str },

    #[error("{var}: {source}")]
    InvalidLogFormat {
        var: &'static str,
        #[source]
        source: homestock_observability::ParseLogFormatError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// JSON snapshot file; `None` keeps everything in memory.
    pub data_file: Option<PathBuf>,
    pub log: LogSettings,
}

impl ApiConfig {
    /// Read configuration from the process environment (after loading `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_addr = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr {
                var: BIND_ADDR_VAR,
                value: raw_addr.clone(),
            })?;

        let data_file = match lookup(DATA_FILE_VAR) {
            Some(path) if path.trim().is_empty() => {
                return Err(ConfigError::EmptyDataFile { var: DATA_FILE_VAR });
            }
            Some(path) => Some(PathBuf::from(path.trim())),
            None => None,
        };

        let format = match lookup(LOG_FORMAT_VAR) {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|source| ConfigError::InvalidLogFormat {
                    var: LOG_FORMAT_VAR,
                    source,
                })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            data_file,
            log: LogSettings {
                format,
                ..LogSettings::default()
            },
        })
    }
}
