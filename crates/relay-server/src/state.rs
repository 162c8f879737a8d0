//! Shared application state.

use relay_agents::{registry_from_endpoints, AgentLoop};
use relay_config::{ProviderRegistry, RelayConfig};
use relay_core::RelayResult;
use relay_providers::{HttpChatTransport, ImageAdapter};
use relay_router::Router;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Timeout applied to each individual upstream HTTP call. Rotation and
/// backoff on top of this belong to the router.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(120);

/// Handles shared by all request handlers. Cheap to clone; everything
/// inside is reference-counted or a reqwest client.
#[derive(Clone)]
pub struct AppState {
    config: Arc<RelayConfig>,
    providers: Arc<ProviderRegistry>,
    router: Router<HttpChatTransport>,
    agent: AgentLoop<HttpChatTransport>,
    image: ImageAdapter,
}

impl AppState {
    /// Assemble every gateway component from loaded configuration.
    ///
    /// # Errors
    /// Returns [`relay_core::RelayError::Internal`] when an HTTP client
    /// cannot be constructed.
    pub fn from_config(config: RelayConfig) -> RelayResult<Self> {
        let providers = Arc::new(config.provider_registry());
        let transport = HttpChatTransport::new(UPSTREAM_TIMEOUT)?;
        let tools = registry_from_endpoints(&config.tools)?;

        info!(
            providers = providers.len(),
            tools = tools.len(),
            agent_provider = %config.agent.provider,
            "gateway state assembled"
        );

        let agent = AgentLoop::new(
            Router::new(transport.clone()),
            tools,
            config.agent.max_turns,
        );

        Ok(Self {
            config: Arc::new(config),
            providers,
            router: Router::new(transport),
            agent,
            image: ImageAdapter::new(UPSTREAM_TIMEOUT)?,
        })
    }

    /// Loaded gateway configuration.
    #[must_use]
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Read-only provider registry.
    #[must_use]
    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    /// Credential-rotating completion router.
    #[must_use]
    pub fn router(&self) -> &Router<HttpChatTransport> {
        &self.router
    }

    /// Tool-calling agent loop.
    #[must_use]
    pub fn agent(&self) -> &AgentLoop<HttpChatTransport> {
        &self.agent
    }

    /// Bespoke image generation adapter.
    #[must_use]
    pub fn image(&self) -> &ImageAdapter {
        &self.image
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("providers", &self.providers.names())
            .finish_non_exhaustive()
    }
}
