//! Provider declarations and the read-only provider registry.
//!
//! Each provider entry in the configuration declares its base URL, an
//! ordered credential list, and whether the provider serves chat or image
//! requests. Credentials are held as [`SecretString`] so they never leak
//! through `Debug` output or log lines.

use relay_core::{RelayError, RelayResult};
use secrecy::SecretString;
use serde::Deserialize;
use std::collections::BTreeMap;

/// What kind of completions a provider serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI-compatible chat completions
    #[default]
    Chat,
    /// Image generation served by a bespoke adapter
    Image,
}

/// A single upstream provider as declared in configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Registry key; filled in after deserialization
    #[serde(skip)]
    name: String,

    /// Base URL of the provider API
    base_url: String,

    /// Kind of completions this provider serves
    #[serde(default)]
    kind: ProviderKind,

    /// Reject non-premium callers at resolution time
    #[serde(default)]
    premium_only: bool,

    /// Ordered credential list; rotation walks it front to back
    #[serde(default)]
    api_keys: Vec<SecretString>,
}

impl ProviderConfig {
    /// Registry key of this provider.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base URL of the provider API.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Kind of completions this provider serves.
    #[must_use]
    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// Whether only premium callers may use this provider.
    #[must_use]
    pub fn premium_only(&self) -> bool {
        self.premium_only
    }

    /// Credentials in rotation order.
    #[must_use]
    pub fn api_keys(&self) -> &[SecretString] {
        &self.api_keys
    }

    /// Number of declared credentials.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.api_keys.len()
    }

    /// Attach the registry key this provider was declared under.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Replace the credential list, preserving order of the iterator.
    pub fn replace_keys(&mut self, keys: impl IntoIterator<Item = String>) {
        self.api_keys = keys.into_iter().map(SecretString::new).collect();
    }
}

/// Read-only lookup table of configured providers.
///
/// Built once from [`crate::RelayConfig`] at startup and shared behind an
/// `Arc` for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, ProviderConfig>,
}

impl ProviderRegistry {
    /// Build a registry from named provider declarations.
    #[must_use]
    pub fn new(providers: BTreeMap<String, ProviderConfig>) -> Self {
        Self { providers }
    }

    /// Resolve a provider by name.
    ///
    /// # Errors
    /// Returns [`RelayError::Configuration`] if the provider is unknown or
    /// declares no credentials, so a misconfigured deployment fails loudly
    /// at the first request instead of deep inside the dispatch path.
    pub fn resolve(&self, name: &str) -> RelayResult<&ProviderConfig> {
        let provider = self
            .providers
            .get(name)
            .ok_or_else(|| RelayError::configuration(format!("unknown provider '{name}'")))?;
        if provider.api_keys.is_empty() {
            return Err(RelayError::configuration(format!(
                "provider '{name}' has no API keys configured"
            )));
        }
        Ok(provider)
    }

    /// Names of all configured providers, in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }

    /// All configured providers, in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.providers.values()
    }

    /// Number of configured providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
