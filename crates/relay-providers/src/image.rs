//! Image generation adapter.
//!
//! Image providers (`kind = "image"`) are an external collaborator boundary
//! with their own wire shape: `POST {base_url}/{model}` with a plain prompt,
//! answered with raw image bytes. The adapter uses the provider's first
//! credential and never rotates; resilience applies to the chat path only.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use relay_config::ProviderConfig;
use relay_core::{RelayError, RelayResult};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Serialize)]
struct ImagePrompt<'a> {
    prompt: &'a str,
}

/// One-shot client for image-kind providers.
#[derive(Debug, Clone)]
pub struct ImageAdapter {
    client: Client,
}

impl ImageAdapter {
    /// Build an adapter with the given per-request timeout.
    ///
    /// # Errors
    /// Returns [`RelayError::Internal`] if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> RelayResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RelayError::internal(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Generate an image and return it base64-encoded.
    ///
    /// # Errors
    /// Returns [`RelayError::Configuration`] if the provider has no
    /// credentials and [`RelayError::UpstreamFatal`] for any upstream
    /// failure; image generation has no retry semantics.
    pub async fn generate(
        &self,
        provider: &ProviderConfig,
        model: &str,
        prompt: &str,
    ) -> RelayResult<String> {
        let key = provider.api_keys().first().ok_or_else(|| {
            RelayError::configuration(format!(
                "image provider '{}' has no API keys configured",
                provider.name()
            ))
        })?;

        let url = format!("{}/{model}", provider.base_url().trim_end_matches('/'));
        debug!(provider = provider.name(), model, "requesting image generation");

        let response = self
            .client
            .post(&url)
            .bearer_auth(key.expose_secret())
            .json(&ImagePrompt { prompt })
            .send()
            .await
            .map_err(|e| {
                RelayError::upstream_fatal(
                    provider.name(),
                    format!("image request failed: {e}"),
                    None,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::upstream_fatal(
                provider.name(),
                format!("image generation failed: {body}"),
                Some(status.as_u16()),
            ));
        }

        let bytes = response.bytes().await.map_err(|e| {
            RelayError::upstream_fatal(
                provider.name(),
                format!("cannot read image bytes: {e}"),
                None,
            )
        })?;

        info!(
            provider = provider.name(),
            model,
            bytes = bytes.len(),
            "image generated"
        );
        Ok(BASE64.encode(&bytes))
    }
}
