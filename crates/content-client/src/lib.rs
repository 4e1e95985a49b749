//! Remote content client for the uzhavan backend.
//!
//! This crate provides:
//! - The detail fetcher with its legacy-endpoint fallback chain
//! - The response-envelope success contract
//! - Social counters with optimistic like/share mutation
//! - The once-per-mount view-count reporter

mod client;
mod counters;
mod envelope;
mod error;
mod view;

pub use client::{ContentClient, DetailFetch, DEFAULT_PRIMARY_RESOURCE, DEFAULT_SECONDARY_RESOURCE};
pub use counters::{ShareMessage, SocialCounters};
pub use envelope::Envelope;
pub use error::{ApiError, ApiResult};
pub use view::ViewReporter;
