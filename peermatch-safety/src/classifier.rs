//! The distress classifier and the moderation pipeline around it.

use std::sync::Arc;

use peermatch_core::{ModerationProvider, SafetyVerdict};

use crate::lexicon::SafetyLexicon;

/// Deterministic local safety classifier.
///
/// Pure per call: lowercases the text, checks the offensive patterns and
/// profanity words first, then the severe-distress keywords. Offensive
/// text is blocked; distressed text is allowed through but flagged so the
/// caller can surface support resources.
///
/// # Examples
/// ```
/// use peermatch_core::SafetyReason;
/// use peermatch_safety::DistressClassifier;
///
/// let classifier = DistressClassifier::default();
/// let verdict = classifier.classify("I want to end my life");
/// assert!(verdict.allowed);
/// assert_eq!(verdict.reason, SafetyReason::SevereDistress);
/// ```
#[derive(Debug, Clone)]
pub struct DistressClassifier {
    lexicon: SafetyLexicon,
}

impl Default for DistressClassifier {
    fn default() -> Self {
        Self {
            lexicon: SafetyLexicon::global().clone(),
        }
    }
}

impl DistressClassifier {
    /// Build a classifier over a specific lexicon.
    #[must_use]
    pub const fn with_lexicon(lexicon: SafetyLexicon) -> Self {
        Self { lexicon }
    }

    /// Classify one piece of user-authored text.
    ///
    /// The offensive check takes precedence: text that is both offensive
    /// and distressed is blocked.
    #[must_use]
    pub fn classify(&self, text: &str) -> SafetyVerdict {
        let lowercased = text.to_lowercase();
        if self.lexicon.is_offensive(&lowercased) {
            return SafetyVerdict::offensive();
        }
        if self.lexicon.is_distressed(&lowercased) {
            return SafetyVerdict::distress();
        }
        SafetyVerdict::ok()
    }

    /// Validate member-supplied group names and topics.
    ///
    /// Uses the looser plain-substring profanity check, so embedded
    /// profanity is rejected even inside longer words. Distress keywords
    /// are not checked here.
    #[must_use]
    pub fn check_group_text(&self, text: &str) -> SafetyVerdict {
        if self.lexicon.contains_profanity(text) {
            return SafetyVerdict::offensive();
        }
        SafetyVerdict::ok()
    }

    /// The lexicon backing this classifier.
    #[must_use]
    pub const fn lexicon(&self) -> &SafetyLexicon {
        &self.lexicon
    }
}

/// Moderation with an optional external provider in front of the local
/// classifier.
///
/// The provider, when configured, is consulted first; any provider failure
/// falls back to the local [`DistressClassifier`], so moderation always
/// produces a verdict.
pub struct ModerationPipeline {
    provider: Option<Arc<dyn ModerationProvider>>,
    classifier: DistressClassifier,
}

impl ModerationPipeline {
    /// Pipeline using only the local classifier.
    #[must_use]
    pub const fn new(classifier: DistressClassifier) -> Self {
        Self {
            provider: None,
            classifier,
        }
    }

    /// Consult `provider` before the local classifier.
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn ModerationProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Moderate one piece of text, never failing.
    #[must_use]
    pub fn moderate(&self, text: &str) -> SafetyVerdict {
        if let Some(provider) = &self.provider {
            match provider.moderate(text) {
                Ok(verdict) => return verdict,
                Err(err) => {
                    log::debug!("moderation provider unavailable ({err}); using local classifier");
                }
            }
        }
        self.classifier.classify(text)
    }
}

impl Default for ModerationPipeline {
    fn default() -> Self {
        Self::new(DistressClassifier::default())
    }
}

impl std::fmt::Debug for ModerationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModerationPipeline")
            .field("has_provider", &self.provider.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peermatch_core::{ProviderError, SafetyReason};
    use rstest::rstest;

    #[rstest]
    #[case("I want to end my life", true, SafetyReason::SevereDistress)]
    #[case("you are an idiot", false, SafetyReason::OffensiveLanguage)]
    #[case("I love this class", true, SafetyReason::Ok)]
    fn classifier_handles_the_canonical_scenarios(
        #[case] text: &str,
        #[case] allowed: bool,
        #[case] reason: SafetyReason,
    ) {
        let verdict = DistressClassifier::default().classify(text);
        assert_eq!(verdict.allowed, allowed);
        assert_eq!(verdict.reason, reason);
    }

    #[rstest]
    fn offensive_takes_precedence_over_distress() {
        let verdict =
            DistressClassifier::default().classify("you idiot, I want to end my life");
        assert!(!verdict.allowed);
        assert_eq!(verdict.reason, SafetyReason::OffensiveLanguage);
    }

    #[rstest]
    #[case("Hellscape Survivors", false)]
    #[case("Homework Helpers", true)]
    fn group_text_check_rejects_embedded_profanity(#[case] text: &str, #[case] allowed: bool) {
        let verdict = DistressClassifier::default().check_group_text(text);
        assert_eq!(verdict.allowed, allowed);
    }

    #[rstest]
    fn classification_is_case_insensitive() {
        let verdict = DistressClassifier::default().classify("YOU ARE AN IDIOT");
        assert_eq!(verdict.reason, SafetyReason::OffensiveLanguage);
    }

    struct BlockingProvider;

    impl ModerationProvider for BlockingProvider {
        fn moderate(&self, _text: &str) -> Result<SafetyVerdict, ProviderError> {
            Ok(SafetyVerdict::offensive())
        }
    }

    struct FailingProvider;

    impl ModerationProvider for FailingProvider {
        fn moderate(&self, _text: &str) -> Result<SafetyVerdict, ProviderError> {
            Err(ProviderError::Timeout { timeout_secs: 10 })
        }
    }

    #[rstest]
    fn pipeline_prefers_the_provider_verdict() {
        let pipeline = ModerationPipeline::default().with_provider(Arc::new(BlockingProvider));
        let verdict = pipeline.moderate("I love this class");
        assert!(!verdict.allowed);
    }

    #[rstest]
    fn pipeline_falls_back_when_the_provider_fails() {
        let pipeline = ModerationPipeline::default().with_provider(Arc::new(FailingProvider));
        let verdict = pipeline.moderate("I love this class");
        assert!(verdict.allowed);
        assert_eq!(verdict.reason, SafetyReason::Ok);
    }
}
