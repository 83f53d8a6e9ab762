//! Sync-over-async HTTP plumbing shared by the providers.

use std::future::Future;

use peermatch_core::ProviderError;
use reqwest::Client;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use crate::config::HttpProviderConfig;

/// Error type for provider construction failures.
#[derive(Debug, thiserror::Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {source}")]
    HttpClient {
        /// Underlying `reqwest` error.
        #[source]
        source: reqwest::Error,
    },
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {source}")]
    Runtime {
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// HTTP client plus the runtime that drives it from synchronous callers.
///
/// When called from outside any Tokio runtime, the stored `current_thread`
/// runtime is used. Inside a multi-threaded runtime (detected via
/// [`Handle::try_current`]), the caller's handle is used with
/// [`tokio::task::block_in_place`] to avoid nested-runtime panics. Inside
/// a `current_thread` runtime the stored runtime is used as a fallback.
pub(crate) struct SyncHttp {
    client: Client,
    runtime: Runtime,
}

impl SyncHttp {
    pub(crate) fn new(config: &HttpProviderConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|source| ProviderBuildError::HttpClient { source })?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|source| ProviderBuildError::Runtime { source })?;
        Ok(Self { client, runtime })
    }

    pub(crate) const fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            // No runtime detected, or current_thread runtime: use our own.
            _ => self.runtime.block_on(future),
        }
    }
}

impl std::fmt::Debug for SyncHttp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncHttp")
            .field("client", &self.client)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

/// Map a transport error onto the shared provider error taxonomy.
pub(crate) fn convert_reqwest_error(error: &reqwest::Error, timeout_secs: u64) -> ProviderError {
    if error.is_timeout() {
        return ProviderError::Timeout { timeout_secs };
    }
    if let Some(status) = error.status() {
        return ProviderError::Http {
            status: status.as_u16(),
        };
    }
    ProviderError::Network {
        message: error.to_string(),
    }
}
