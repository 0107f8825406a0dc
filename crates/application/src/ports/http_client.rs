//! HTTP client port

use async_trait::async_trait;
use thiserror::Error;

use gencheck_domain::{ApiRequest, ApiResponse};

/// Transport-level failures. A response with any status code is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpClientError {
    /// The target URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// No response within the configured timeout.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Timeout that elapsed.
        timeout_ms: u64,
    },

    /// The server refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// Any other connection failure (DNS, TLS, reset).
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

/// Port for sending requests to the service under test.
///
/// Paths in [`ApiRequest`] are relative; the implementation owns the base URL.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends the request and returns status, body and elapsed time.
    ///
    /// # Errors
    ///
    /// Returns `HttpClientError` when no response could be obtained.
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, HttpClientError>;
}
