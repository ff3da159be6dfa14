//! Configuration management for the lead-capture client.
//!
//! Values come from environment variables, with an optional `.env` file
//! loaded first through `dotenvy` (which never prints to stdout).

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::time::Duration;

/// Configuration for the lead-capture client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Webhook endpoint that receives the lead payload
    pub webhook_url: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Seconds before a success/error status reverts to idle (default: 5)
    pub status_reset_secs: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `LEAD_WEBHOOK_URL`: endpoint the form posts to
    ///
    /// Optional environment variables:
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `STATUS_RESET_SECS`: auto-revert delay in seconds (default: 5)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let webhook_url = env::var("LEAD_WEBHOOK_URL")
            .map_err(|_| ConfigError::MissingVar("LEAD_WEBHOOK_URL".to_string()))?;

        if !webhook_url.starts_with("http://") && !webhook_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "LEAD_WEBHOOK_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let status_reset_secs = Self::parse_env_u64("STATUS_RESET_SECS", 5)?;

        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            webhook_url,
            request_timeout,
            status_reset_secs,
            log_level,
        })
    }

    /// The auto-revert delay as a `Duration`.
    pub fn status_reset_delay(&self) -> Duration {
        Duration::from_secs(self.status_reset_secs)
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
            webhook_url: String::new(),
            request_timeout: 10,
            status_reset_secs: 5,
            log_level: "error".to_string(),
        }
    }
}
