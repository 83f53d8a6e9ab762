//! HTTP generative provider against a chat-completions API.

use peermatch_core::{GenerativeProvider, ProviderError};
use serde::{Deserialize, Serialize};

use crate::bridge::{SyncHttp, convert_reqwest_error};
use crate::config::HttpProviderConfig;

/// Model requested when none is configured.
const DEFAULT_MODEL: &str = "llama-3.3-70b";

/// Sampling temperature for empathetic, varied but on-topic replies.
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_completion_tokens: u32,
    temperature: f32,
    top_p: f32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// [`GenerativeProvider`] backed by an HTTP chat-completions API.
///
/// Used for conversation starters and empathetic follow-ups around a
/// match; callers substitute fixed templates whenever this provider is
/// unavailable.
#[derive(Debug)]
pub struct HttpGenerativeProvider {
    http: SyncHttp,
    config: HttpProviderConfig,
    model: String,
}

impl HttpGenerativeProvider {
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
        Ok(Self {
            http,
            config,
            model: DEFAULT_MODEL.to_owned(),
        })
    }

    /// Request a different model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    async fn fetch_completion(
        &self,
        prompt: &str,
        max_tokens: u32,
        token: &str,
    ) -> Result<String, ProviderError> {
        let timeout_secs = self.config.timeout.as_secs();
        let payload = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_completion_tokens: max_tokens,
            temperature: TEMPERATURE,
            top_p: 1.0,
            stream: false,
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
        let parsed: ChatResponse =
            response.json().await.map_err(|err| ProviderError::Malformed {
                message: err.to_string(),
            })?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_owned())
            .ok_or(ProviderError::Malformed {
                message: "chat response contained no choices".to_owned(),
            })
    }
}

impl GenerativeProvider for HttpGenerativeProvider {
    fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, ProviderError> {
        if !self.config.enabled {
            return Err(ProviderError::Disabled);
        }
        let Some(token) = self.config.api_token.as_deref() else {
            return Err(ProviderError::MissingCredential);
        };
        self.http
            .block_on(self.fetch_completion(prompt, max_tokens, token))
    }
}
