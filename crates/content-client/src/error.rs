//! Error types for backend API calls.

use thiserror::Error;

/// Error type for API operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend reported failure (envelope without a success flag)
    #[error("API error: {0}")]
    Api(String),
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
