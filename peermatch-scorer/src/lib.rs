//! Embedding-free compatibility scoring.
//!
//! Deterministic 0 to 100 scores over structured profile fields, used for
//! group listings and peer pages where embeddings are unavailable or as a
//! secondary signal beside semantic matches. The weights and label
//! cut-points are tuning values carried in configuration structs; tests
//! assert relative ordering rather than exact outputs.

#![forbid(unsafe_code)]

mod group;
mod user;
mod weights;

pub use group::score_user_group;
pub use user::score_user_user;
pub use weights::{CompatibilityWeights, FitLabel, FitThresholds, WeightsError};
