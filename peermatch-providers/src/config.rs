//! Shared configuration for the HTTP providers.

use std::time::Duration;

/// Default user agent for provider requests.
pub const DEFAULT_USER_AGENT: &str = "peermatch-engine/0.1";

/// Default request timeout in seconds.
///
/// Provider calls block a request-handling thread, so the deadline is kept
/// short; a slow provider degrades to the local fallback instead.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration shared by all HTTP providers.
#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    /// Endpoint URL for the provider service.
    pub base_url: String,
    /// Bearer credential; a missing token makes every call fail with
    /// `MissingCredential`.
    pub api_token: Option<String>,
    /// Whether the provider is switched on for this deployment.
    pub enabled: bool,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl HttpProviderConfig {
    /// Create a configuration with the given endpoint URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            enabled: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set the bearer credential.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Switch the provider off; every call then reports `Disabled`.
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_pattern() {
        let config = HttpProviderConfig::new("https://provider.example.com")
            .with_token("secret")
            .with_timeout(Duration::from_secs(3))
            .with_user_agent("test-agent/1.0");

        assert_eq!(config.base_url, "https://provider.example.com");
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert!(config.enabled);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }

    #[test]
    fn disabled_switches_the_provider_off() {
        assert!(!HttpProviderConfig::new("https://x.example.com").disabled().enabled);
    }
}
