//! Configuration module for the game catalog backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

/// Invalid configuration value.
#[derive(Debug)]
pub enum ConfigError {
    /// `CATALOG_BIND_ADDR` is not a socket address
    InvalidBindAddr {
        value: String,
        source: AddrParseError,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidBindAddr { value, source } => {
                write!(f, "invalid CATALOG_BIND_ADDR '{}': {}", value, source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidBindAddr { source, .. } => Some(source),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the JSON document holding games and stats
    pub data_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let data_path = env::var("CATALOG_DATA_PATH")
            .unwrap_or_else(|_| "./data/games.json".to_string())
            .into();

        let bind_addr = parse_bind_addr(
            &env::var("CATALOG_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
        )?;

        let log_level = env::var("CATALOG_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            data_path,
            bind_addr,
            log_level,
        })
    }
}

fn parse_bind_addr(value: &str) -> Result<SocketAddr, ConfigError> {
    value
        .parse()
        .map_err(|source| ConfigError::InvalidBindAddr {
            value: value.to_string(),
            source,
        })
}
