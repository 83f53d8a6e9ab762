//! HTTP moderation provider.

use peermatch_core::{ModerationProvider, ProviderError, SafetyReason, SafetyVerdict};
use serde::{Deserialize, Serialize};

use crate::bridge::{SyncHttp, convert_reqwest_error};
use crate::config::HttpProviderConfig;

#[derive(Debug, Serialize)]
struct ModerationRequest<'a> {
    inputs: &'a str,
}

/// Wire shape of a moderation verdict.
#[derive(Debug, Deserialize)]
struct ModerationResponse {
    allowed: bool,
    reason: String,
}

impl ModerationResponse {
    fn into_verdict(self) -> Result<SafetyVerdict, ProviderError> {
        let reason: SafetyReason =
            self.reason
                .parse()
                .map_err(|message: String| ProviderError::Malformed { message })?;
        Ok(SafetyVerdict {
            allowed: self.allowed,
            reason,
        })
    }
}

/// [`ModerationProvider`] backed by an HTTP classification endpoint.
///
/// The endpoint answers with the same verdict shape as the local
/// classifier; the moderation pipeline consults this provider first and
/// falls back locally on any error.
#[derive(Debug)]
pub struct HttpModerationProvider {
    http: SyncHttp,
    config: HttpProviderConfig,
}

impl HttpModerationProvider {
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

    async fn fetch_verdict(&self, text: &str, token: &str) -> Result<SafetyVerdict, ProviderError> {
        let timeout_secs = self.config.timeout.as_secs();
        let response = self
            .http
            .client()
            .post(&self.config.base_url)
            .bearer_auth(token)
            .json(&ModerationRequest { inputs: text })
            .send()
            .await
            .map_err(|err| convert_reqwest_error(&err, timeout_secs))?
            .error_for_status()
            .map_err(|err| convert_reqwest_error(&err, timeout_secs))?;
        let parsed: ModerationResponse =
            response.json().await.map_err(|err| ProviderError::Malformed {
                message: err.to_string(),
            })?;
        parsed.into_verdict()
    }
}

impl ModerationProvider for HttpModerationProvider {
    fn moderate(&self, text: &str) -> Result<SafetyVerdict, ProviderError> {
        if !self.config.enabled {
            return Err(ProviderError::Disabled);
        }
        let Some(token) = self.config.api_token.as_deref() else {
            return Err(ProviderError::MissingCredential);
        };
        self.http.block_on(self.fetch_verdict(text, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn disabled_provider_short_circuits() {
        let provider = HttpModerationProvider::with_config(
            HttpProviderConfig::new("https://x.example.com").disabled(),
        )
        .expect("provider should build");
        assert!(matches!(
            provider.moderate("hi"),
            Err(ProviderError::Disabled)
        ));
    }

    #[rstest]
    fn missing_token_short_circuits() {
        let provider = HttpModerationProvider::new("https://x.example.com")
            .expect("provider should build");
        assert!(matches!(
            provider.moderate("hi"),
            Err(ProviderError::MissingCredential)
        ));
    }

    #[rstest]
    #[case(r#"{"allowed":true,"reason":"ok"}"#, true, SafetyReason::Ok)]
    #[case(
        r#"{"allowed":true,"reason":"severe_distress"}"#,
        true,
        SafetyReason::SevereDistress
    )]
    #[case(
        r#"{"allowed":false,"reason":"offensive_language"}"#,
        false,
        SafetyReason::OffensiveLanguage
    )]
    fn verdicts_round_trip_from_the_wire(
        #[case] raw: &str,
        #[case] allowed: bool,
        #[case] reason: SafetyReason,
    ) {
        let parsed: ModerationResponse = serde_json::from_str(raw).expect("parse response");
        let verdict = parsed.into_verdict().expect("valid verdict");
        assert_eq!(verdict.allowed, allowed);
        assert_eq!(verdict.reason, reason);
    }

    #[rstest]
    fn unknown_reason_is_malformed() {
        let parsed: ModerationResponse =
            serde_json::from_str(r#"{"allowed":true,"reason":"spam"}"#).expect("parse response");
        assert!(matches!(
            parsed.into_verdict(),
            Err(ProviderError::Malformed { .. })
        ));
    }
}
