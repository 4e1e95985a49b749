//! Auth error types.

use thiserror::Error;

/// Error type for auth operations.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend rejected the credentials
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Login response body did not match the expected shape
    #[error("Malformed login response: {0}")]
    MalformedResponse(String),

    /// Session persistence failed
    #[error("Storage error: {0}")]
    Storage(#[from] session_store::StorageError),
}

/// Result type for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;
