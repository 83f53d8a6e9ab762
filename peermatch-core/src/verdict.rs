//! Safety verdicts attached to user-authored text before it is persisted.

/// Why a piece of text was flagged, or `Ok` when it was not.
///
/// # Examples
/// ```
/// use peermatch_core::SafetyReason;
///
/// assert_eq!(SafetyReason::SevereDistress.as_str(), "severe_distress");
/// assert_eq!(
///     "offensive_language".parse::<SafetyReason>(),
///     Ok(SafetyReason::OffensiveLanguage)
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SafetyReason {
    /// No concern detected.
    #[default]
    Ok,
    /// Text indicates the author may be in severe distress.
    SevereDistress,
    /// Text contains offensive or abusive language.
    OffensiveLanguage,
}

impl SafetyReason {
    /// Return the reason as a stable snake_case `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::SevereDistress => "severe_distress",
            Self::OffensiveLanguage => "offensive_language",
        }
    }
}

impl std::fmt::Display for SafetyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SafetyReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ok" => Ok(Self::Ok),
            "severe_distress" => Ok(Self::SevereDistress),
            "offensive_language" => Ok(Self::OffensiveLanguage),
            _ => Err(format!("unknown safety reason '{s}'")),
        }
    }
}

/// Outcome of classifying one piece of user-authored text.
///
/// `allowed` and `reason` vary independently: severely distressed text is
/// allowed through but flagged so a human can follow up, while offensive
/// text is blocked outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SafetyVerdict {
    /// Whether the text may be persisted and shown to peers.
    pub allowed: bool,
    /// The concern detected, if any.
    pub reason: SafetyReason,
}

impl SafetyVerdict {
    /// Verdict for text with no detected concern.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            allowed: true,
            reason: SafetyReason::Ok,
        }
    }

    /// Verdict for text that signals severe distress: allowed, flagged.
    #[must_use]
    pub const fn distress() -> Self {
        Self {
            allowed: true,
            reason: SafetyReason::SevereDistress,
        }
    }

    /// Verdict for offensive text: blocked.
    #[must_use]
    pub const fn offensive() -> Self {
        Self {
            allowed: false,
            reason: SafetyReason::OffensiveLanguage,
        }
    }

    /// Whether any concern was detected.
    #[must_use]
    pub const fn is_flagged(self) -> bool {
        !matches!(self.reason, SafetyReason::Ok)
    }
}

impl Default for SafetyVerdict {
    fn default() -> Self {
        Self::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SafetyVerdict::ok(), true, false)]
    #[case(SafetyVerdict::distress(), true, true)]
    #[case(SafetyVerdict::offensive(), false, true)]
    fn verdict_axes_vary_independently(
        #[case] verdict: SafetyVerdict,
        #[case] allowed: bool,
        #[case] flagged: bool,
    ) {
        assert_eq!(verdict.allowed, allowed);
        assert_eq!(verdict.is_flagged(), flagged);
    }

    #[rstest]
    #[case(SafetyReason::Ok)]
    #[case(SafetyReason::SevereDistress)]
    #[case(SafetyReason::OffensiveLanguage)]
    fn reason_round_trips_through_str(#[case] reason: SafetyReason) {
        assert_eq!(reason.as_str().parse::<SafetyReason>(), Ok(reason));
    }
}
