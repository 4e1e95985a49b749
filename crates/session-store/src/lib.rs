//! Durable session persistence for the uzhavan client.
//!
//! This crate owns the on-device session state: the auth token, user id,
//! role, and serialized user profile that gate every protected screen.
//! Storage is a flat key/value abstraction with a JSON-file backend;
//! screens always take a fresh snapshot via [`SessionStore::load`] rather
//! than reading a cached global.

mod file;
mod keys;
mod session;
mod traits;

pub use file::FileStorage;
pub use keys::StorageKeys;
pub use session::{Session, SessionGuard, SessionStore, UserProfile};
pub use traits::KeyValueStorage;

use thiserror::Error;

/// Error type for storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend storage error
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Encoding/decoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
