//! Facade crate for the Peermatch peer-support matching engine.
//!
//! This crate re-exports the core domain types and exposes the optional HTTP
//! providers and SQLite profile store behind feature flags.

#![forbid(unsafe_code)]

pub use peermatch_core::{
    EmbeddingProvider, GenerativeProvider, GroupKind, GroupMeta, GroupMetaError,
    ModerationProvider, ProfileStore, ProfileStoreError, ProfileView, ProviderError, SafetyReason,
    SafetyVerdict, SupportStyle, Taxonomy, TopicId,
};
pub use peermatch_safety::{DistressClassifier, ModerationPipeline, SafetyLexicon};
pub use peermatch_scorer::{
    CompatibilityWeights, FitLabel, FitThresholds, score_user_group, score_user_user,
};
pub use peermatch_semantic::{
    EmbeddingRecord, MatchThresholds, SemanticIndex, cosine_similarity, keyword_matches,
    keyword_score, top_matches,
};

#[cfg(feature = "store-sqlite")]
pub use peermatch_core::{SqliteProfileStore, SqliteProfileStoreError};

#[cfg(feature = "providers-http")]
pub use peermatch_providers::{
    HttpEmbeddingProvider, HttpGenerativeProvider, HttpModerationProvider, HttpProviderConfig,
};
