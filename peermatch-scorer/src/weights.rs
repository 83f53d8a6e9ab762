//! Scoring weights, label cut-points, and their validation.

/// Error raised by [`CompatibilityWeights::validate`].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum WeightsError {
    /// A weight was negative or not finite.
    #[error("weight '{name}' must be finite and non-negative, got {value}")]
    InvalidWeight {
        /// Field name of the offending weight.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A weight family sums above the score ceiling.
    #[error("{family} weights sum to {total}, above the ceiling of 100")]
    ExcessiveTotal {
        /// Which weight family overflowed.
        family: &'static str,
        /// The offending sum.
        total: f32,
    },
}

/// Weights for both compatibility scores.
///
/// All values are empirical tuning constants; the defaults are the
/// production values. Peer weights apply to [`score_user_user`] and group
/// weights to [`score_user_group`].
///
/// [`score_user_user`]: crate::score_user_user
/// [`score_user_group`]: crate::score_user_group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompatibilityWeights {
    /// Peer score: topic Jaccard overlap.
    pub peer_topics: f32,
    /// Peer score: shared conversational language.
    pub peer_language: f32,
    /// Peer score: overlapping cultural background.
    pub peer_culture: f32,
    /// Peer score: matching international-freshman status.
    pub peer_status: f32,
    /// Peer score: graduation years within one of each other.
    pub peer_year: f32,
    /// Peer score: identical non-empty degree programme.
    pub peer_degree: f32,
    /// Group score: topic overlap against the smaller topic set.
    pub group_topics: f32,
    /// Group score: topic-label keywords found in the group text.
    pub group_keywords: f32,
    /// Group score: group-name words found in the member's issue text.
    pub group_issue: f32,
    /// Group score: flat credit when no issue text exists but the member
    /// has topics.
    pub group_issue_fallback: f32,
}

impl Default for CompatibilityWeights {
    fn default() -> Self {
        Self {
            peer_topics: 60.0,
            peer_language: 10.0,
            peer_culture: 10.0,
            peer_status: 10.0,
            peer_year: 5.0,
            peer_degree: 5.0,
            group_topics: 50.0,
            group_keywords: 30.0,
            group_issue: 20.0,
            group_issue_fallback: 10.0,
        }
    }
}

impl CompatibilityWeights {
    /// Check that every weight is usable and each family stays within the
    /// 0 to 100 score range.
    ///
    /// # Errors
    /// Returns [`WeightsError`] for a negative or non-finite weight, or
    /// when a family's weights sum above 100.
    #[expect(clippy::float_arithmetic, reason = "weight totals are summed once")]
    pub fn validate(&self) -> Result<(), WeightsError> {
        let fields = [
            ("peer_topics", self.peer_topics),
            ("peer_language", self.peer_language),
            ("peer_culture", self.peer_culture),
            ("peer_status", self.peer_status),
            ("peer_year", self.peer_year),
            ("peer_degree", self.peer_degree),
            ("group_topics", self.group_topics),
            ("group_keywords", self.group_keywords),
            ("group_issue", self.group_issue),
            ("group_issue_fallback", self.group_issue_fallback),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(WeightsError::InvalidWeight { name, value });
            }
        }
        let peer_total = self.peer_topics
            + self.peer_language
            + self.peer_culture
            + self.peer_status
            + self.peer_year
            + self.peer_degree;
        if peer_total > 100.0 {
            return Err(WeightsError::ExcessiveTotal {
                family: "peer",
                total: peer_total,
            });
        }
        let group_total = self.group_topics + self.group_keywords + self.group_issue;
        if group_total > 100.0 {
            return Err(WeightsError::ExcessiveTotal {
                family: "group",
                total: group_total,
            });
        }
        Ok(())
    }
}

/// Score cut-points that map a compatibility score onto a [`FitLabel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitThresholds {
    /// Scores at or above this are labelled "Best Fit".
    pub best_fit: u8,
    /// Scores at or above this (but below `best_fit`) are "Good Fit".
    pub good_fit: u8,
}

impl FitThresholds {
    /// Cut-points used when listing groups for a member.
    pub const GROUP_FIT: Self = Self {
        best_fit: 70,
        good_fit: 40,
    };

    /// Stricter cut-points used on peer-to-peer pages.
    pub const PEER_FIT: Self = Self {
        best_fit: 80,
        good_fit: 60,
    };

    /// Label a score against these cut-points.
    #[must_use]
    pub const fn label(&self, score: u8) -> FitLabel {
        if score >= self.best_fit {
            FitLabel::BestFit
        } else if score >= self.good_fit {
            FitLabel::GoodFit
        } else {
            FitLabel::New
        }
    }
}

/// How a scored match is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FitLabel {
    /// Strong structured-field compatibility.
    BestFit,
    /// Moderate compatibility.
    GoodFit,
    /// Below both cut-points; shown without a fit badge.
    New,
}

impl FitLabel {
    /// Display wording for the label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BestFit => "Best Fit",
            Self::GoodFit => "Good Fit",
            Self::New => "New",
        }
    }
}

impl std::fmt::Display for FitLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
