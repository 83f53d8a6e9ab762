//! Semantic matching for the Peermatch engine.
//!
//! Holds embedding records for users and groups, computes cosine and
//! keyword similarity, and produces ranked recommendations. Every external
//! provider failure degrades along a documented fallback chain (vector
//! match, then keyword match, then a fixed default ordering) so that
//! recommendation requests never fail outright.

#![forbid(unsafe_code)]

mod index;
mod record;
mod similarity;

pub use index::{MatchThresholds, SemanticIndex};
pub use record::EmbeddingRecord;
pub use similarity::{cosine_similarity, keyword_matches, keyword_score, top_matches};
