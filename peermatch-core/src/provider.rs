//! Trait seams for external model providers.
//!
//! All providers are synchronous and fallible by value: a failed call is a
//! routine outcome that the matching layer folds into a documented fallback
//! (keyword matching, local lexicon checks), never a reason to abort a
//! request.

use crate::verdict::SafetyVerdict;

/// Failure modes shared by all external providers.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider is configured off for this deployment.
    #[error("provider is disabled")]
    Disabled,
    /// No API credential was supplied.
    #[error("provider credential is missing")]
    MissingCredential,
    /// The remote service answered with a non-success status.
    #[error("provider returned HTTP status {status}")]
    Http {
        /// HTTP status code from the remote service.
        status: u16,
    },
    /// The request exceeded the configured deadline.
    #[error("provider request timed out after {timeout_secs}s")]
    Timeout {
        /// Deadline that was exceeded, in seconds.
        timeout_secs: u64,
    },
    /// Transport-level failure before a response arrived.
    #[error("provider request failed: {message}")]
    Network {
        /// Human-readable transport error.
        message: String,
    },
    /// The response arrived but could not be interpreted.
    #[error("provider response was malformed: {message}")]
    Malformed {
        /// What was wrong with the payload.
        message: String,
    },
}

/// Turns text into a dense embedding vector.
///
/// Implementations must be cheap to call concurrently; the semantic index
/// shares one provider across requests.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed `text` into a dense vector.
    ///
    /// # Errors
    /// Returns a [`ProviderError`] when the provider is unavailable or its
    /// response cannot be used. Callers fall back to keyword matching.
    fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError>;
}

/// Generates free-form text from a prompt, used for conversation starters
/// and similar prompts around a match.
pub trait GenerativeProvider: Send + Sync {
    /// Generate a completion for `prompt`, bounded by `max_tokens`.
    ///
    /// # Errors
    /// Returns a [`ProviderError`] when the provider is unavailable; callers
    /// substitute a fixed template.
    fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, ProviderError>;
}

/// Classifies user-authored text for safety concerns.
pub trait ModerationProvider: Send + Sync {
    /// Classify `text`, returning a verdict.
    ///
    /// # Errors
    /// Returns a [`ProviderError`] when the provider is unavailable; callers
    /// fall back to the local lexicon classifier.
    fn moderate(&self, text: &str) -> Result<SafetyVerdict, ProviderError>;
}
