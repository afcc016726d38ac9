//! Configuration management for the Folk MCP Server.
//!
//! This module handles loading and validating configuration from environment variables.
//! It avoids polluting stdout (which MCP uses for communication) by loading the .env
//! file through `dotenvy`, which never prints.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use tracing_subscriber::EnvFilter;

/// Base URL of the public Folk REST API.
pub const DEFAULT_FOLK_API_URL: &str = "https://api.folk.app/v1";

/// Configuration for the Folk MCP Server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Folk API base URL
    pub folk_api_url: String,

    /// Folk API key, sent as a bearer token
    pub folk_api_key: String,

    /// HTTP request timeout in seconds (default: 30)
    pub request_timeout: u64,

    /// Log level used when `RUST_LOG` is unset (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `FOLK_API_KEY`: API key for authentication
    ///
    /// Optional environment variables:
    /// - `FOLK_API_BASE_URL`: Base URL for the Folk API (default: `https://api.folk.app/v1`)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 30)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let folk_api_key = env::var("FOLK_API_KEY")
            .map_err(|_| ConfigError::MissingVar("FOLK_API_KEY".to_string()))?;

        if folk_api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "FOLK_API_KEY".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let folk_api_url =
            env::var("FOLK_API_BASE_URL").unwrap_or_else(|_| DEFAULT_FOLK_API_URL.to_string());

        if !folk_api_url.starts_with("http://") && !folk_api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "FOLK_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 30)?;
        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be at least 1 second".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            folk_api_url,
            folk_api_key,
            request_timeout,
            log_level,
        })
    }

    /// Log filter for the subscriber. `RUST_LOG` wins over `log_level`.
    pub fn log_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level))
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            folk_api_url: DEFAULT_FOLK_API_URL.to_string(),
            folk_api_key: String::new(),
            request_timeout: 30,
            log_level: "info".to_string(),
        }
    }
}
