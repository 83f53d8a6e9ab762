//! Member-to-group compatibility scoring.

use std::collections::HashSet;

use peermatch_core::{GroupMeta, ProfileView, Taxonomy, TopicId};

use crate::weights::CompatibilityWeights;

/// Keywords shorter than this carry no matching signal.
const MIN_KEYWORD_LEN: usize = 4;

/// Cap on counted topic-label keywords in the group text.
const KEYWORD_CAP: usize = 3;

/// Cap on counted group-name words in the issue text.
const ISSUE_WORD_CAP: usize = 2;

/// Score how well a group fits a member, from structured fields and plain
/// text only.
///
/// Three terms: topic overlap normalised by the smaller topic set, the
/// member's topic-label keywords found in the group's name and
/// description, and words from the group name found in the member's most
/// recent issue text. Without issue text, a member who has any topics
/// receives a flat partial credit in place of the issue term.
///
/// # Examples
/// ```
/// use peermatch_core::{GroupMeta, ProfileView};
/// use peermatch_scorer::{CompatibilityWeights, score_user_group};
///
/// let member = ProfileView::new("Maya").with_topic_ids(["academic_problems"]);
/// let group = GroupMeta::new("Academic Pressure")
///     .expect("non-empty name")
///     .with_topic_ids(["academic_problems"]);
/// let score = score_user_group(&member, &group, None, &CompatibilityWeights::default());
/// assert!(score >= 50);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "weighted sum over small counts, clamped to [0, 100] before the cast"
)]
pub fn score_user_group(
    profile: &ProfileView,
    group: &GroupMeta,
    last_issue: Option<&str>,
    weights: &CompatibilityWeights,
) -> u8 {
    let mut total = topic_overlap(&profile.topics, &group.topics) * weights.group_topics;

    let group_text = format!("{} {}", group.name, group.description).to_lowercase();
    let keyword_hits = topic_label_keywords(&profile.topics)
        .iter()
        .filter(|keyword| group_text.contains(keyword.as_str()))
        .count()
        .min(KEYWORD_CAP);
    total += keyword_hits as f32 / KEYWORD_CAP as f32 * weights.group_keywords;

    match last_issue {
        Some(issue) => {
            let issue_text = issue.to_lowercase();
            let name_hits = significant_words(&group.name)
                .iter()
                .filter(|word| issue_text.contains(word.as_str()))
                .count()
                .min(ISSUE_WORD_CAP);
            total += name_hits as f32 / ISSUE_WORD_CAP as f32 * weights.group_issue;
        }
        None if !profile.topics.is_empty() => {
            total += weights.group_issue_fallback;
        }
        None => {}
    }

    total.round().clamp(0.0, 100.0) as u8
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "overlap ratio over small topic sets"
)]
fn topic_overlap(user: &[TopicId], group: &[TopicId]) -> f32 {
    if user.is_empty() || group.is_empty() {
        return 0.0;
    }
    let user_set: HashSet<&TopicId> = user.iter().collect();
    let group_set: HashSet<&TopicId> = group.iter().collect();
    let overlap = user_set.intersection(&group_set).count();
    let smaller = user_set.len().min(group_set.len());
    overlap as f32 / smaller as f32
}

/// Lowercased words of at least [`MIN_KEYWORD_LEN`] characters drawn from
/// the taxonomy labels of the given topics.
fn topic_label_keywords(topics: &[TopicId]) -> HashSet<String> {
    let taxonomy = Taxonomy::global();
    topics
        .iter()
        .flat_map(|topic| {
            taxonomy
                .label(topic)
                .split_whitespace()
                .map(str::to_lowercase)
                .collect::<Vec<_>>()
        })
        .filter(|word| word.chars().count() >= MIN_KEYWORD_LEN)
        .collect()
}

fn significant_words(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .map(str::to_lowercase)
        .filter(|word| word.chars().count() >= MIN_KEYWORD_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn weights() -> CompatibilityWeights {
        CompatibilityWeights::default()
    }

    #[fixture]
    fn academic_member() -> ProfileView {
        ProfileView::new("Maya").with_topic_ids(["academic_problems", "test_anxiety"])
    }

    #[fixture]
    fn academic_group() -> GroupMeta {
        GroupMeta::new("Academic Pressure")
            .expect("non-empty name")
            .with_description("Support for grades and exam stress")
            .with_topic_ids(["academic_problems", "time_management"])
    }

    #[fixture]
    fn unrelated_group() -> GroupMeta {
        GroupMeta::new("Budget Kitchen")
            .expect("non-empty name")
            .with_description("Cooking on a student budget")
            .with_topic_ids(["financial_stress"])
    }

    #[rstest]
    fn overlapping_group_outscores_disjoint_group(
        academic_member: ProfileView,
        academic_group: GroupMeta,
        unrelated_group: GroupMeta,
    ) {
        let close = score_user_group(&academic_member, &academic_group, None, &weights());
        let far = score_user_group(&academic_member, &unrelated_group, None, &weights());
        assert!(close > far, "expected {close} > {far}");
    }

    #[rstest]
    fn issue_text_mentioning_the_group_raises_the_score(
        academic_member: ProfileView,
        academic_group: GroupMeta,
    ) {
        let with_issue = score_user_group(
            &academic_member,
            &academic_group,
            Some("The academic pressure this term is overwhelming"),
            &weights(),
        );
        let without_issue =
            score_user_group(&academic_member, &academic_group, None, &weights());
        assert!(with_issue > without_issue, "expected {with_issue} > {without_issue}");
    }

    #[rstest]
    fn missing_issue_text_awards_flat_credit_only_with_topics(academic_group: GroupMeta) {
        let topicless = ProfileView::new("Sam");
        let with_topics = ProfileView::new("Maya").with_topic_ids(["loneliness_isolation"]);
        let base = score_user_group(&topicless, &academic_group, None, &weights());
        let credited = score_user_group(&with_topics, &academic_group, None, &weights());
        assert_eq!(base, 0);
        assert_eq!(credited, 10);
    }

    #[rstest]
    fn unrelated_issue_text_adds_nothing(
        academic_member: ProfileView,
        academic_group: GroupMeta,
    ) {
        let unrelated = score_user_group(
            &academic_member,
            &academic_group,
            Some("thinking about the weekend"),
            &weights(),
        );
        let fallback = score_user_group(&academic_member, &academic_group, None, &weights());
        // The flat credit only applies without issue text, so an unrelated
        // issue scores below the no-issue case.
        assert!(unrelated < fallback, "expected {unrelated} < {fallback}");
    }

    #[rstest]
    fn empty_topic_sets_score_zero_overlap() {
        assert_eq!(topic_overlap(&[], &[]), 0.0);
    }
}
