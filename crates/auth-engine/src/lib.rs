//! Authentication for the uzhavan client.
//!
//! This crate provides:
//! - PIN login against the backend
//! - Session persistence through the session store on success
//! - Role-derived navigation destination after login
//! - Logout and session status

mod engine;
mod error;

pub use engine::{AuthEngine, AuthStatus, LoginOutcome};
pub use error::{AuthError, AuthResult};
