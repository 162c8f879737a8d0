//! Completion transport seam.
//!
//! The resilience router never talks HTTP directly; it drives a
//! [`CompletionTransport`] and classifies the [`TransportError`] values it
//! gets back. Production wires in the reqwest transport, unit tests wire in
//! scripted outcomes.

use async_trait::async_trait;
use http::HeaderMap;
use relay_config::ProviderConfig;
use relay_core::{ChatCompletion, CompletionRequest};
use secrecy::SecretString;

/// One failed completion attempt, with everything the router needs to
/// classify it: the HTTP status (absent for connection-level failures), the
/// response headers (rate-limit hints live here), and a human-readable
/// message for logs and terminal errors.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    status: Option<u16>,
    headers: HeaderMap,
    message: String,
}

impl TransportError {
    /// An HTTP-level failure with the response status and headers attached.
    #[must_use]
    pub fn http(status: u16, headers: HeaderMap, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            headers,
            message: message.into(),
        }
    }

    /// A failure below the HTTP layer: connect errors, timeouts, or a
    /// response body that does not decode. Carries no status and no headers.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            headers: HeaderMap::new(),
            message: message.into(),
        }
    }

    /// HTTP status of the failed attempt, if one was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Response headers of the failed attempt.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// A header value as a string, if present and visible ASCII.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Human-readable failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A way of obtaining one chat completion from one provider with one
/// credential. Implementations must not retry; rotation and backoff belong
/// to the router.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    /// Submit `request` to `provider` authenticated with `key`.
    async fn complete(
        &self,
        provider: &ProviderConfig,
        key: &SecretString,
        request: &CompletionRequest,
    ) -> Result<ChatCompletion, TransportError>;
}
