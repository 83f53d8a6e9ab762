//! Property-based tests for the similarity primitives.
//!
//! These assert invariants that must hold for all inputs, complementing the
//! example-based unit tests inside the crate.
//!
//! # Invariants tested
//!
//! - **Keyword symmetry:** `keyword_score(a, b) == keyword_score(b, a)`.
//! - **Keyword range:** keyword scores stay within `[0.0, 1.0]`.
//! - **Cosine self-similarity:** a non-zero vector scores `1.0` against
//!   itself.
//! - **Top-match bounds:** results respect `top_n`, the threshold, and
//!   descending order.

#![expect(
    clippy::float_arithmetic,
    reason = "property assertions compare floating point values"
)]

use proptest::prelude::*;

use peermatch_semantic::{cosine_similarity, keyword_score, top_matches};

/// Vectors with enough magnitude for a meaningful cosine.
fn nonzero_vector() -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-10.0_f32..10.0, 1..16)
        .prop_filter("vector must have non-trivial magnitude", |v| {
            v.iter().map(|x| x * x).sum::<f32>().sqrt() > 1e-2
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: keyword similarity does not depend on argument order.
    #[test]
    fn keyword_score_is_symmetric(a in ".{0,60}", b in ".{0,60}") {
        let forward = keyword_score(&a, &b);
        let backward = keyword_score(&b, &a);
        prop_assert!(
            (forward - backward).abs() < f32::EPSILON,
            "keyword_score not symmetric: {forward} vs {backward}"
        );
    }

    /// Property: keyword scores are a ratio of set sizes and stay in range.
    #[test]
    fn keyword_score_stays_in_unit_range(a in ".{0,60}", b in ".{0,60}") {
        let score = keyword_score(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score), "score {score} out of range");
    }

    /// Property: every non-zero vector is maximally similar to itself.
    #[test]
    fn cosine_self_similarity_is_one(v in nonzero_vector()) {
        let similarity = cosine_similarity(&v, &v);
        prop_assert!(
            (similarity - 1.0).abs() < 1e-3,
            "self-similarity was {similarity}"
        );
    }

    /// Property: top matches honour `top_n`, the threshold, and ordering.
    #[test]
    fn top_matches_respects_bounds(
        scored in proptest::collection::vec((0_u64..100, 0.0_f32..1.0), 0..32),
        top_n in 0_usize..10,
        threshold in 0.0_f32..1.0,
    ) {
        let matches = top_matches(scored, top_n, threshold);
        prop_assert!(matches.len() <= top_n);
        prop_assert!(matches.iter().all(|(_, score)| *score >= threshold));
        prop_assert!(
            matches
                .iter()
                .zip(matches.iter().skip(1))
                .all(|(higher, lower)| higher.1 >= lower.1),
            "matches not sorted descending: {matches:?}"
        );
    }
}
