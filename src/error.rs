//! Error types for the Folk MCP Server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Remote failures keep the HTTP status and the message from the Folk error body;
//! `InvalidRequest` marks arguments rejected before any request was sent.

use thiserror::Error;

/// Errors that can occur when interacting with the Folk API.
#[derive(Error, Debug)]
pub enum FolkApiError {
    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("Folk API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found (HTTP 404)
    #[error("Folk API error (status 404): {0}")]
    NotFound(String),

    /// Arguments failed validation; no request was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl FolkApiError {
    /// HTTP status reported by the Folk API, if the request reached it.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            _ => None,
        }
    }

    /// Whether the error was raised locally before any request was made.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }

    /// Whether the remote resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<crate::domain::ValidationError> for FolkApiError {
    fn from(err: crate::domain::ValidationError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
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

/// Convenience type alias for Results with FolkApiError
pub type FolkApiResult<T> = Result<T, FolkApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
