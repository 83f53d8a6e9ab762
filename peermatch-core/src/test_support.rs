//! Shared test doubles and fixtures.
//!
//! Available to this crate's unit tests and, behind the `test-support`
//! feature, to downstream crates' test suites.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::profile::{ProfileView, SupportStyle};
use crate::provider::{EmbeddingProvider, ProviderError};

/// Embedding provider that returns the same vector for every input.
#[derive(Debug, Clone)]
pub struct FixedEmbeddingProvider {
    vector: Vec<f32>,
}

impl FixedEmbeddingProvider {
    /// Provider returning `vector` for every call.
    #[must_use]
    pub fn new(vector: Vec<f32>) -> Self {
        Self { vector }
    }
}

impl EmbeddingProvider for FixedEmbeddingProvider {
    fn embed(&self, _text: &str) -> Result<Vec<f32>, ProviderError> {
        Ok(self.vector.clone())
    }
}

/// Embedding provider that always fails, exercising fallback paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableEmbeddingProvider;

impl EmbeddingProvider for UnavailableEmbeddingProvider {
    fn embed(&self, _text: &str) -> Result<Vec<f32>, ProviderError> {
        Err(ProviderError::Disabled)
    }
}

/// Embedding provider that maps exact input texts to fixed vectors and
/// fails for anything else. Records every call for assertion.
#[derive(Debug, Default)]
pub struct KeyedEmbeddingProvider {
    vectors: HashMap<String, Vec<f32>>,
    calls: Mutex<Vec<String>>,
}

impl KeyedEmbeddingProvider {
    /// Register a vector for an exact input text.
    #[must_use]
    pub fn with_vector(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.into(), vector);
        self
    }

    /// Texts this provider has been asked to embed, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

impl EmbeddingProvider for KeyedEmbeddingProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(text.to_owned());
        }
        self.vectors
            .get(text)
            .cloned()
            .ok_or_else(|| ProviderError::Malformed {
                message: format!("no registered vector for '{text}'"),
            })
    }
}

/// A fully populated sample profile.
#[must_use]
pub fn sample_profile() -> ProfileView {
    ProfileView::new("Maya")
        .international_freshman()
        .with_preferred_language("English")
        .with_topic_ids(["anxiety", "academic_problems"])
        .with_languages(["English", "Hindi"])
        .with_cultural_background(["South Asian"])
        .with_support_style(SupportStyle::Mixed)
        .with_graduation_year(2027)
        .with_degree_program("computer_science")
        .with_interests(["hiking", "cooking"])
}

/// A second sample profile overlapping [`sample_profile`] on topics and
/// language but differing elsewhere.
#[must_use]
pub fn overlapping_profile() -> ProfileView {
    ProfileView::new("Wei")
        .international_freshman()
        .with_preferred_language("Mandarin")
        .with_topic_ids(["anxiety", "homesickness"])
        .with_languages(["English", "Mandarin"])
        .with_cultural_background(["East Asian"])
        .with_support_style(SupportStyle::Listening)
        .with_graduation_year(2026)
}

/// A sample profile sharing nothing with [`sample_profile`].
#[must_use]
pub fn disjoint_profile() -> ProfileView {
    ProfileView::new("Sam")
        .with_preferred_language("Spanish")
        .with_topic_ids(["financial_stress"])
        .with_languages(["Spanish"])
        .with_cultural_background(["Latin American"])
        .with_support_style(SupportStyle::Sharing)
        .with_graduation_year(2024)
        .with_degree_program("economics")
}
