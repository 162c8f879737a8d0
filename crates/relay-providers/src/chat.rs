//! OpenAI-compatible chat transport.
//!
//! Every chat provider in this deployment speaks the same wire shape:
//! `POST {base_url}/chat/completions` with a bearer credential. The transport
//! performs exactly one attempt per call; rotation, backoff and hint handling
//! live in the router.

use async_trait::async_trait;
use relay_config::ProviderConfig;
use relay_core::{ChatCompletion, CompletionRequest, RelayError, RelayResult};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, trace};

use crate::transport::{CompletionTransport, TransportError};

const MAX_ERROR_BODY: usize = 600;

/// Reqwest-backed [`CompletionTransport`] for OpenAI-compatible providers.
#[derive(Debug, Clone)]
pub struct HttpChatTransport {
    client: Client,
}

impl HttpChatTransport {
    /// Build a transport with the given per-request timeout.
    ///
    /// # Errors
    /// Returns [`RelayError::Internal`] if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> RelayResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(32)
            .build()
            .map_err(|e| RelayError::internal(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    fn completions_url(provider: &ProviderConfig) -> String {
        format!("{}/chat/completions", provider.base_url().trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionTransport for HttpChatTransport {
    async fn complete(
        &self,
        provider: &ProviderConfig,
        key: &SecretString,
        request: &CompletionRequest,
    ) -> Result<ChatCompletion, TransportError> {
        let url = Self::completions_url(provider);
        trace!(provider = provider.name(), model = %request.model, %url, "submitting completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                TransportError::network(format!("request to {} failed: {e}", provider.name()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            debug!(
                provider = provider.name(),
                status = status.as_u16(),
                "provider returned error status"
            );
            return Err(TransportError::http(
                status.as_u16(),
                headers,
                error_message(&body),
            ));
        }

        response.json::<ChatCompletion>().await.map_err(|e| {
            TransportError::network(format!(
                "cannot decode completion from {}: {e}",
                provider.name()
            ))
        })
    }
}

/// Pull the provider's error message out of an OpenAI-style error body,
/// falling back to the (truncated) raw body.
fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value
            .pointer("/error/message")
            .and_then(serde_json::Value::as_str)
        {
            return message.to_string();
        }
    }
    let mut message = body.trim().to_string();
    if message.len() > MAX_ERROR_BODY {
        message.truncate(MAX_ERROR_BODY);
    }
    if message.is_empty() {
        message.push_str("no response body");
    }
    message
}
