//! Safety classification for the Peermatch engine.
//!
//! A deterministic local classifier over versioned lexicon data tables,
//! plus a moderation pipeline that consults an optional external provider
//! first. Moderation always produces a verdict; provider failures fall
//! back to the local classifier.

#![forbid(unsafe_code)]

mod classifier;
mod lexicon;

pub use classifier::{DistressClassifier, ModerationPipeline};
pub use lexicon::{LexiconError, SafetyLexicon};
