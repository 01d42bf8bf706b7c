//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development. Every variable has a default so a bare
//! `cargo run` comes up on localhost with file storage under `./data`.

use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub data_dir: PathBuf,
    pub uploads_dir: PathBuf,
    pub log_level: Level,
    /// Shared secret for signing bearer tokens. Anyone holding it can mint
    /// valid tokens, so override the default outside local development.
    pub jwt_secret: String,
    pub token_ttl_days: i64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3001".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let data_dir = std::env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));

        let uploads_dir = std::env::var("UPLOADS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./uploads"));

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let jwt_secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| "gaushala-fresh-secret-key-2025".to_string());

        let token_ttl_days_str =
            std::env::var("TOKEN_TTL_DAYS").unwrap_or_else(|_| "7".to_string());
        let token_ttl_days = token_ttl_days_str.parse::<i64>().map_err(|_| {
            ConfigError::InvalidValue(
                "TOKEN_TTL_DAYS".to_string(),
                format!("'{}' is not a number of days", token_ttl_days_str),
            )
        })?;

        Ok(Self {
            bind_address,
            data_dir,
            uploads_dir,
            log_level,
            jwt_secret,
            token_ttl_days,
        })
    }
}
