//! Error types for Figma API calls.
//!
//! Messages never include the access token.

use reqwest::StatusCode;
use thiserror::Error;

/// Result type for Figma operations.
pub type FigmaResult<T> = Result<T, FigmaError>;

/// Errors that can occur while talking to the Figma REST API.
#[derive(Debug, Error)]
pub enum FigmaError {
    /// No access token was configured.
    #[error("Figma access token not configured (set FIGMA_ACCESS_TOKEN or figma.access_token)")]
    MissingToken,

    /// The HTTP client could not be built.
    #[error("failed to create HTTP client: {source}")]
    Client {
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The configured base URL cannot carry an API path.
    #[error("invalid Figma API base URL: {url}")]
    InvalidBaseUrl {
        /// The offending URL.
        url: String,
    },

    /// The request could not be sent or the body could not be read.
    #[error("Figma request failed: {source}")]
    Request {
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status.
    #[error("Figma API error: {}", .status.canonical_reason().unwrap_or("Unknown status"))]
    Api {
        /// HTTP status returned by the API.
        status: StatusCode,
    },

    /// The response body was not the expected JSON.
    #[error("failed to decode Figma response: {source}")]
    Decode {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A tool argument was rejected before any request was made.
    #[error("{message}")]
    InvalidArgument {
        /// Description of what's wrong.
        message: String,
    },
}

impl FigmaError {
    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
