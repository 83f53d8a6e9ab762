#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Property-based tests for the compatibility scorer.
//!
//! # Invariants tested
//!
//! - **Symmetry:** `score_user_user(a, b) == score_user_user(b, a)` for
//!   all profiles.
//! - **Range:** peer and group scores never exceed 100.
//! - **Self-score dominance:** no peer scores higher against a profile
//!   than the profile scores against itself.

use proptest::prelude::*;

use peermatch_core::{GroupMeta, ProfileView};
use peermatch_scorer::{CompatibilityWeights, score_user_group, score_user_user};

fn profile_strategy() -> impl Strategy<Value = ProfileView> {
    let topic_pool = vec![
        "anxiety",
        "depression",
        "academic_problems",
        "homesickness",
        "culture_shock",
        "loneliness_isolation",
    ];
    let language_pool = vec!["English", "Hindi", "Mandarin", "Spanish"];
    let degree_pool = vec!["physics", "economics", "computer_science"];
    (
        proptest::sample::subsequence(topic_pool, 0..=4),
        proptest::sample::subsequence(language_pool, 0..=3),
        any::<bool>(),
        proptest::option::of(2024_u16..2031),
        proptest::option::of(proptest::sample::select(degree_pool)),
    )
        .prop_map(|(topics, languages, freshman, year, degree)| {
            let mut profile = ProfileView::new("P")
                .with_topic_ids(topics)
                .with_languages(languages);
            profile.is_international_freshman = freshman;
            profile.graduation_year = year;
            profile.degree_program = degree.map(String::from);
            profile
        })
}

fn group_strategy() -> impl Strategy<Value = GroupMeta> {
    let topic_pool = vec!["anxiety", "academic_problems", "homesickness"];
    (
        proptest::sample::select(vec!["Anxiety Circle", "Academic Pressure", "Far From Home"]),
        proptest::sample::subsequence(topic_pool, 0..=3),
    )
        .prop_map(|(name, topics)| {
            GroupMeta::new(name)
                .expect("pool names are non-empty")
                .with_topic_ids(topics)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: peer compatibility does not depend on argument order.
    #[test]
    fn peer_score_is_symmetric(a in profile_strategy(), b in profile_strategy()) {
        let weights = CompatibilityWeights::default();
        prop_assert_eq!(
            score_user_user(&a, &b, &weights),
            score_user_user(&b, &a, &weights)
        );
    }

    /// Property: no peer outscores the profile's own self-score.
    #[test]
    fn self_score_dominates(a in profile_strategy(), b in profile_strategy()) {
        let weights = CompatibilityWeights::default();
        prop_assert!(
            score_user_user(&a, &b, &weights) <= score_user_user(&a, &a.clone(), &weights)
        );
    }

    /// Property: both scores stay within the 0 to 100 range.
    #[test]
    fn scores_stay_in_range(
        a in profile_strategy(),
        b in profile_strategy(),
        group in group_strategy(),
        issue in proptest::option::of(".{0,40}"),
    ) {
        let weights = CompatibilityWeights::default();
        prop_assert!(score_user_user(&a, &b, &weights) <= 100);
        prop_assert!(score_user_group(&a, &group, issue.as_deref(), &weights) <= 100);
    }
}
