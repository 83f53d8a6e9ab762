//! Peer-to-peer compatibility scoring.

use std::collections::HashSet;

use peermatch_core::{ProfileView, TopicId};

use crate::weights::CompatibilityWeights;

/// Score how compatible two members are, from their structured profile
/// fields alone.
///
/// The score is a weighted sum of six terms: topic Jaccard overlap, a
/// shared conversational language, overlapping cultural background, equal
/// international-freshman status, graduation years within one of each
/// other, and an identical non-empty degree programme. Fully symmetric:
/// swapping the arguments never changes the score.
///
/// # Examples
/// ```
/// use peermatch_core::ProfileView;
/// use peermatch_scorer::{CompatibilityWeights, score_user_user};
///
/// let a = ProfileView::new("Maya").with_topic_ids(["anxiety"]);
/// let b = ProfileView::new("Wei").with_topic_ids(["anxiety"]);
/// let weights = CompatibilityWeights::default();
/// assert_eq!(score_user_user(&a, &b, &weights), score_user_user(&b, &a, &weights));
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "weighted sum is clamped to [0, 100] before the integer cast"
)]
pub fn score_user_user(a: &ProfileView, b: &ProfileView, weights: &CompatibilityWeights) -> u8 {
    let mut total = topic_jaccard(&a.topics, &b.topics) * weights.peer_topics;
    if !a.all_languages().is_disjoint(&b.all_languages()) {
        total += weights.peer_language;
    }
    if !a.cultural_background.is_disjoint(&b.cultural_background) {
        total += weights.peer_culture;
    }
    if a.is_international_freshman == b.is_international_freshman {
        total += weights.peer_status;
    }
    if years_adjacent(a.graduation_year, b.graduation_year) {
        total += weights.peer_year;
    }
    if degrees_match(a.degree_program.as_deref(), b.degree_program.as_deref()) {
        total += weights.peer_degree;
    }
    total.round().clamp(0.0, 100.0) as u8
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "Jaccard ratio over small topic sets"
)]
fn topic_jaccard(a: &[TopicId], b: &[TopicId]) -> f32 {
    let set_a: HashSet<&TopicId> = a.iter().collect();
    let set_b: HashSet<&TopicId> = b.iter().collect();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    intersection as f32 / union as f32
}

fn years_adjacent(a: Option<u16>, b: Option<u16>) -> bool {
    match (a, b) {
        (Some(year_a), Some(year_b)) => year_a.abs_diff(year_b) <= 1,
        _ => false,
    }
}

fn degrees_match(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(degree_a), Some(degree_b)) => !degree_a.is_empty() && degree_a == degree_b,
        _ => false,
    }
}
