//! HTTP embedding provider against a feature-extraction inference API.

use peermatch_core::{EmbeddingProvider, ProviderError};
use serde::{Deserialize, Serialize};

use crate::bridge::{SyncHttp, convert_reqwest_error};
use crate::config::HttpProviderConfig;

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    inputs: &'a str,
    options: EmbeddingOptions,
}

#[derive(Debug, Serialize)]
struct EmbeddingOptions {
    wait_for_model: bool,
}

/// Feature-extraction endpoints answer either a flat vector or a batch of
/// one row per input.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EmbeddingResponse {
    Nested(Vec<Vec<f32>>),
    Flat(Vec<f32>),
}

impl EmbeddingResponse {
    fn into_vector(self) -> Result<Vec<f32>, ProviderError> {
        match self {
            Self::Flat(vector) => Ok(vector),
            Self::Nested(rows) => rows.into_iter().next().ok_or(ProviderError::Malformed {
                message: "embedding response contained no rows".to_owned(),
            }),
        }
    }
}

/// [`EmbeddingProvider`] backed by an HTTP feature-extraction API.
///
/// Sends the text with `wait_for_model` set so cold models spin up within
/// the request deadline instead of answering with an error status.
///
/// # Examples
/// ```no_run
/// use peermatch_core::EmbeddingProvider;
/// use peermatch_providers::{HttpEmbeddingProvider, HttpProviderConfig};
///
/// let config = HttpProviderConfig::new(
///     "https://api-inference.example.com/pipeline/feature-extraction/all-MiniLM-L6-v2",
/// )
/// .with_token("hf_token");
/// let provider = HttpEmbeddingProvider::with_config(config)?;
/// let vector = provider.embed("I am an international freshman student.")?;
/// assert!(!vector.is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct HttpEmbeddingProvider {
    http: SyncHttp,
    config: HttpProviderConfig,
}

impl HttpEmbeddingProvider {
    /// Create a provider with default configuration for `base_url`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to
    /// build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, crate::ProviderBuildError> {
        Self::with_config(HttpProviderConfig::new(base_url))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to
    /// build.
    pub fn with_config(config: HttpProviderConfig) -> Result<Self, crate::ProviderBuildError> {
        let http = SyncHttp::new(&config)?;
        Ok(Self { http, config })
    }

    async fn fetch_embedding(&self, text: &str, token: &str) -> Result<Vec<f32>, ProviderError> {
        let timeout_secs = self.config.timeout.as_secs();
        let payload = EmbeddingRequest {
            inputs: text,
            options: EmbeddingOptions {
                wait_for_model: true,
            },
        };
        let response = self
            .http
            .client()
            .post(&self.config.base_url)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await
            .map_err(|err| convert_reqwest_error(&err, timeout_secs))?
            .error_for_status()
            .map_err(|err| convert_reqwest_error(&err, timeout_secs))?;
        let parsed: EmbeddingResponse =
            response.json().await.map_err(|err| ProviderError::Malformed {
                message: err.to_string(),
            })?;
        parsed.into_vector()
    }
}

impl EmbeddingProvider for HttpEmbeddingProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        if !self.config.enabled {
            return Err(ProviderError::Disabled);
        }
        let Some(token) = self.config.api_token.as_deref() else {
            return Err(ProviderError::MissingCredential);
        };
        self.http.block_on(self.fetch_embedding(text, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn disabled_provider_short_circuits() {
        let provider = HttpEmbeddingProvider::with_config(
            HttpProviderConfig::new("https://x.example.com").disabled(),
        )
        .expect("provider should build");
        assert!(matches!(provider.embed("hi"), Err(ProviderError::Disabled)));
    }

    #[rstest]
    fn missing_token_short_circuits() {
        let provider = HttpEmbeddingProvider::new("https://x.example.com")
            .expect("provider should build");
        assert!(matches!(
            provider.embed("hi"),
            Err(ProviderError::MissingCredential)
        ));
    }

    #[rstest]
    fn request_payload_serialises_with_wait_for_model() {
        let payload = EmbeddingRequest {
            inputs: "hello",
            options: EmbeddingOptions {
                wait_for_model: true,
            },
        };
        let json = serde_json::to_value(&payload).expect("serialise payload");
        assert_eq!(
            json,
            serde_json::json!({
                "inputs": "hello",
                "options": {"wait_for_model": true}
            })
        );
    }

    #[rstest]
    fn flat_response_parses_to_a_vector() {
        let parsed: EmbeddingResponse =
            serde_json::from_str("[0.25, -0.5]").expect("parse flat response");
        assert_eq!(parsed.into_vector().expect("vector"), vec![0.25, -0.5]);
    }

    #[rstest]
    fn nested_response_takes_the_first_row() {
        let parsed: EmbeddingResponse =
            serde_json::from_str("[[1.0, 2.0], [3.0, 4.0]]").expect("parse nested response");
        assert_eq!(parsed.into_vector().expect("vector"), vec![1.0, 2.0]);
    }

    #[rstest]
    fn empty_nested_response_is_malformed() {
        let parsed: EmbeddingResponse =
            serde_json::from_str::<EmbeddingResponse>("[]").expect("parse empty response");
        assert!(matches!(
            parsed.into_vector(),
            Err(ProviderError::Malformed { .. })
        ));
    }
}
