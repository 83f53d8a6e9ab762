//! HTTP implementations of the external provider traits.
//!
//! The provider traits in `peermatch-core` are synchronous to keep the
//! matching core embeddable in synchronous contexts. These implementations
//! bridge async HTTP calls to that interface by blocking on an internally
//! owned Tokio runtime, reused across calls.
//!
//! Every failure maps onto [`peermatch_core::ProviderError`]; nothing here
//! panics or retries, and callers fold the error into their documented
//! fallbacks.

#![forbid(unsafe_code)]

mod bridge;
mod config;
mod embedding;
mod generative;
mod moderation;

pub use bridge::ProviderBuildError;
pub use config::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, HttpProviderConfig};
pub use embedding::HttpEmbeddingProvider;
pub use generative::HttpGenerativeProvider;
pub use moderation::HttpModerationProvider;
