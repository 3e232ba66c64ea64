//! Error types for tubegrab
//!
//! This module provides error handling for the library, including:
//! - Domain-specific error variants (extraction, timeout, empty result, etc.)
//! - HTTP status code mapping for API integration
//! - Structured error responses with machine-readable error codes

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for tubegrab operations
pub type Result<T> = std::result::Result<T, Error>;

/// The step of a download in which an extractor fault occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Metadata-only query (id and title)
    Metadata,
    /// Full media download into the capture buffer
    Download,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Metadata => f.write_str("metadata"),
            Stage::Download => f.write_str("download"),
        }
    }
}

/// Main error type for tubegrab
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "format")
        key: Option<String>,
    },

    /// The request carried no URL (missing, empty, or whitespace only)
    #[error("no video URL was provided")]
    MissingUrl,

    /// The extractor finished without a fault but produced zero bytes
    #[error("the downloaded file is empty: {url}")]
    EmptyResult {
        /// The source URL that produced no bytes
        url: String,
    },

    /// The extraction tool reported a failure
    #[error("{stage} failed: {message}")]
    Extraction {
        /// Which phase of the download failed
        stage: Stage,
        /// The tool's own description of the failure
        message: String,
    },

    /// A phase exceeded its configured time limit
    #[error("{stage} timed out after {timeout_ms}ms")]
    Timeout {
        /// Which phase of the download timed out
        stage: Stage,
        /// The configured limit in milliseconds
        timeout_ms: u64,
    },

    /// External tool execution failed (yt-dlp could not be started, etc.)
    #[error("external tool error: {0}")]
    ExternalTool(String),

    /// Operation not supported (missing binary, etc.)
    #[error("not supported: {0}")]
    NotSupported(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// API error response format
///
/// This structure is returned by API endpoints when an error occurs.
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "extraction_failed",
///     "message": "metadata failed: ERROR: Unsupported URL",
///     "details": {
///       "stage": "metadata"
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "missing_url", "empty_result")
    ///
    /// The browser page switches on this to pick between a prompt, a
    /// warning, and the generic error message.
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Create a "validation error" error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new("validation_error", message)
    }

    /// Create an "internal server error"
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }
}

/// Convert errors to HTTP status codes for API responses
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - Client error (invalid input)
            Error::Config { .. } => 400,
            Error::MissingUrl => 400,

            // 422 Unprocessable Entity - finished, but nothing to hand back
            Error::EmptyResult { .. } => 422,

            // 500 Internal Server Error - Server-side issues
            Error::Io(_) => 500,
            Error::Serialization(_) => 500,
            Error::ApiServerError(_) => 500,
            Error::Other(_) => 500,

            // 501 Not Implemented - No extractor available
            Error::NotSupported(_) => 501,

            // 502 Bad Gateway - The upstream site or tool failed
            Error::Extraction { .. } => 502,

            // 503 Service Unavailable
            Error::ExternalTool(_) => 503,

            // 504 Gateway Timeout
            Error::Timeout { .. } => 504,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::MissingUrl => "missing_url",
            Error::EmptyResult { .. } => "empty_result",
            Error::Extraction { .. } => "extraction_failed",
            Error::Timeout { .. } => "timeout",
            Error::ExternalTool(_) => "external_tool_error",
            Error::NotSupported(_) => "not_supported",
            Error::Io(_) => "io_error",
            Error::Serialization(_) => "serialization_error",
            Error::ApiServerError(_) => "api_server_error",
            Error::Other(_) => "internal_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.to_string();

        let details = match &error {
            Error::Config { key: Some(key), .. } => Some(serde_json::json!({
                "key": key,
            })),
            Error::EmptyResult { url } => Some(serde_json::json!({
                "url": url,
            })),
            Error::Extraction { stage, .. } => Some(serde_json::json!({
                "stage": stage,
            })),
            Error::Timeout { stage, timeout_ms } => Some(serde_json::json!({
                "stage": stage,
                "timeout_ms": timeout_ms,
            })),
            _ => None,
        };

        ApiError {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        }
    }
}
