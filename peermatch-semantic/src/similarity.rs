//! Similarity primitives: cosine over vectors, Jaccard over keywords.

use std::cmp::Ordering;
use std::collections::HashSet;

/// Words carrying no matching signal, removed before the Jaccard overlap.
const STOP_WORDS: [&str; 16] = [
    "i", "am", "a", "an", "the", "is", "are", "my", "to", "and", "or", "for", "with", "in", "on",
    "at",
];

/// Cosine similarity between two vectors.
///
/// Returns `0.0` ("no similarity") for empty, length-mismatched, or
/// zero-magnitude inputs rather than erroring; degraded inputs then simply
/// fail the downstream score thresholds.
///
/// # Examples
/// ```
/// use peermatch_semantic::cosine_similarity;
///
/// let similarity = cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]);
/// assert!((similarity - 1.0).abs() < 1e-6);
/// assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
/// assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "cosine similarity is inherently floating point"
)]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }
    let mut dot = 0.0_f32;
    let mut norm_a = 0.0_f32;
    let mut norm_b = 0.0_f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Filter scored candidates to those at or above `threshold`, sort by
/// score descending (stable, so equal scores keep candidate order), and
/// truncate to `top_n`.
#[must_use]
pub fn top_matches<K>(scored: Vec<(K, f32)>, top_n: usize, threshold: f32) -> Vec<(K, f32)> {
    let mut matches: Vec<(K, f32)> = scored
        .into_iter()
        .filter(|(_, score)| *score >= threshold)
        .collect();
    matches.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    matches.truncate(top_n);
    matches
}

/// Jaccard similarity over lowercased, whitespace-tokenized words with the
/// stop-word set removed.
///
/// Returns `0.0` when either side has no significant words left. Symmetric
/// in its arguments.
///
/// # Examples
/// ```
/// use peermatch_semantic::keyword_score;
///
/// let score = keyword_score("anxiety about exams", "exams and anxiety");
/// assert!(score > 0.5);
/// assert_eq!(keyword_score("the a an", "anything"), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "Jaccard ratio over small word sets"
)]
pub fn keyword_score(text_a: &str, text_b: &str) -> f32 {
    let words_a = significant_words(text_a);
    let words_b = significant_words(text_b);
    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }
    let intersection = words_a.intersection(&words_b).count();
    let union = words_a.union(&words_b).count();
    if union == 0 {
        return 0.0;
    }
    intersection as f32 / union as f32
}

/// Rank keyword candidates against a query text.
///
/// Scores every candidate with [`keyword_score`] and applies the same
/// filter-sort-truncate shape as [`top_matches`].
#[must_use]
pub fn keyword_matches<K>(
    query: &str,
    candidates: Vec<(K, String)>,
    top_n: usize,
    threshold: f32,
) -> Vec<(K, f32)> {
    let scored: Vec<(K, f32)> = candidates
        .into_iter()
        .map(|(key, text)| {
            let score = keyword_score(query, &text);
            (key, score)
        })
        .collect();
    top_matches(scored, top_n, threshold)
}

fn significant_words(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .map(str::to_lowercase)
        .filter(|word| !STOP_WORDS.contains(&word.as_str()))
        .collect()
}
