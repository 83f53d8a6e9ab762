//! Core domain types for the Peermatch engine.
//!
//! These models project persisted peer-support profiles and groups into
//! read-only views, render them as deterministic embedding text, and define
//! the trait seams behind which external providers (embedding, generation,
//! moderation) and profile storage live. Constructors return `Result` to
//! surface invalid input early; provider failures are modelled as values so
//! callers can fold them into documented fallbacks instead of propagating.

#![forbid(unsafe_code)]

mod group;
mod profile;
mod provider;
mod store;
mod topic;
mod verdict;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use group::{GroupKind, GroupMeta, GroupMetaError};
pub use profile::{ProfileView, SupportStyle};
pub use provider::{EmbeddingProvider, GenerativeProvider, ModerationProvider, ProviderError};
pub use store::{ProfileStore, ProfileStoreError};
pub use topic::{Taxonomy, TopicId};
pub use verdict::{SafetyReason, SafetyVerdict};

#[cfg(feature = "store-sqlite")]
pub use store::{SqliteProfileStore, SqliteProfileStoreError};
