//! Error types for the lead-capture core.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Phone validation errors live in [`crate::domain::ValidationError`].

use thiserror::Error;

/// Errors that can occur when posting a lead to the webhook.
///
/// The form state machine treats every variant the same way; the distinction
/// only matters for logs.
#[derive(Error, Debug)]
pub enum SubmissionError {
    /// Transport-level failure (DNS, connect, TLS, reading the body)
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Webhook answered with a non-success status code
    #[error("Webhook error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to encode the payload
    #[error("JSON encode error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with SubmissionError
pub type SubmissionResult<T> = Result<T, SubmissionError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
