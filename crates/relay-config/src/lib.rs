//! # Relay Config
//!
//! Typed configuration for the LLM Relay Gateway, loaded once at process
//! start and read-only afterwards.
//!
//! Configuration comes from a TOML file plus environment overrides for
//! credentials (`RELAY_PROVIDER_<NAME>_API_KEYS`, comma-separated), so key
//! material can stay out of the file.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod provider;

pub use provider::{ProviderConfig, ProviderKind, ProviderRegistry};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Top-level gateway configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Logging settings
    #[serde(default)]
    pub telemetry: TelemetrySettings,

    /// Agent loop settings
    #[serde(default)]
    pub agent: AgentSettings,

    /// Endpoints of the external tool collaborators
    #[serde(default)]
    pub tools: ToolEndpoints,

    /// Provider registry, keyed by provider name
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderConfig>,
}

impl RelayConfig {
    /// Load configuration from a TOML file and apply environment overrides.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })?;
        let mut config = Self::from_toml(&raw)?;
        config.apply_env_overrides();
        info!(
            path = %path.display(),
            providers = config.providers.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] on malformed TOML.
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(raw)?;
        for (name, provider) in &mut config.providers {
            provider.set_name(name);
        }
        Ok(config)
    }

    /// Build the read-only provider registry from this configuration.
    #[must_use]
    pub fn provider_registry(&self) -> ProviderRegistry {
        ProviderRegistry::new(self.providers.clone())
    }

    /// Overlay `RELAY_PROVIDER_<NAME>_API_KEYS` (comma-separated) onto the
    /// declared credential lists.
    fn apply_env_overrides(&mut self) {
        for (name, provider) in &mut self.providers {
            let var = format!(
                "RELAY_PROVIDER_{}_API_KEYS",
                name.to_uppercase().replace('-', "_")
            );
            if let Ok(raw) = std::env::var(&var) {
                provider.replace_keys(
                    raw.split(',')
                        .map(str::trim)
                        .filter(|key| !key.is_empty())
                        .map(String::from),
                );
            }
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Socket address to bind
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelemetrySettings {
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable output
    pub json_logs: bool,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Settings for the tool-calling agent loop.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// Provider used for tool-capable completions
    pub provider: String,
    /// Model used for tool-capable completions
    pub model: String,
    /// Safety bound on model turns before the loop fails
    pub max_turns: u32,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            provider: "groq".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            max_turns: 32,
        }
    }
}

/// Base URLs of the external tool collaborator services.
///
/// A tool whose endpoint is left empty is simply not registered.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolEndpoints {
    /// Memory store service (add/search)
    pub memory_url: Option<String>,
    /// Web search service
    pub web_search_url: Option<String>,
    /// Science/computation search service
    pub science_search_url: Option<String>,
    /// OCR service
    pub ocr_url: Option<String>,
    /// File content extraction service
    pub files_url: Option<String>,
    /// Python sandbox service
    pub sandbox_url: Option<String>,
    /// Per-call timeout for tool executors
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl ToolEndpoints {
    /// Default per-call timeout for tool executors.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
}

impl Default for ToolEndpoints {
    fn default() -> Self {
        Self {
            memory_url: None,
            web_search_url: None,
            science_search_url: None,
            ocr_url: None,
            files_url: None,
            sandbox_url: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

/// Configuration loading error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("cannot read config file {path}: {source}")]
    Io {
        /// Path that failed
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML
    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
