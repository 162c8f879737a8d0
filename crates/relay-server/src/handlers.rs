//! HTTP request handlers for the relay API.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use relay_config::{ProviderConfig, ProviderKind};
use relay_core::{
    normalize, sanitize, ChatMessage, CompletionRequest, GatewayReply, MessageRole, RelayError,
    RequestContext,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::ApiError;
use crate::extractors::{JsonBody, RequestId};
use crate::state::AppState;

/// Inbound completion request.
///
/// Field aliases accept the camelCase spellings used by existing callers.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmRequest {
    /// Conversation so far, oldest message first
    pub messages: Vec<ChatMessage>,
    /// Model identifier passed through to the provider
    pub model: String,
    /// Provider registry key
    pub provider: String,
    /// Run the tool-calling agent loop before the final completion
    #[serde(default, alias = "isAgent")]
    pub is_agent: bool,
    /// Premium flag, gates premium-only providers
    #[serde(default, alias = "isPremium")]
    pub is_premium: bool,
    /// Opaque caller identity threaded into memory tools
    #[serde(default, alias = "userId")]
    pub user_id: Option<String>,
}

/// Gateway entry point: `POST /llm`.
///
/// Resolves the provider, optionally materializes the conversation through
/// the agent loop, then normalizes, sanitizes and routes the sequence for
/// the final completion. Image-kind providers short-circuit to the bespoke
/// adapter.
#[instrument(
    skip(state, request_id, request),
    fields(provider = %request.provider, model = %request.model, agent = request.is_agent)
)]
pub async fn completion(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    JsonBody(request): JsonBody<LlmRequest>,
) -> Result<Json<GatewayReply>, ApiError> {
    if request.messages.is_empty() {
        return Err(RelayError::invalid_request("messages must not be empty").into());
    }

    let provider = state.providers().resolve(&request.provider)?;
    if provider.premium_only() && !request.is_premium {
        return Err(RelayError::configuration(format!(
            "provider '{}' is restricted to premium requests",
            provider.name()
        ))
        .into());
    }

    let context = request
        .user_id
        .clone()
        .map_or_else(RequestContext::anonymous, RequestContext::for_user);

    if provider.kind() == ProviderKind::Image {
        let prompt = image_prompt(&request.messages)?;
        let content = state
            .image()
            .generate(provider, &request.model, prompt)
            .await?;
        info!(request_id = %request_id, provider = %provider.name(), "image request served");
        return Ok(Json(GatewayReply::image(content)));
    }

    let mut conversation = request.messages;
    if request.is_agent {
        let agent = &state.config().agent;
        let agent_provider = state.providers().resolve(&agent.provider)?;
        debug!(
            request_id = %request_id,
            agent_provider = %agent_provider.name(),
            agent_model = %agent.model,
            "running agent loop"
        );
        conversation = state
            .agent()
            .run(agent_provider, &agent.model, conversation, &context)
            .await?;
    }

    let messages = sanitize(normalize(conversation));
    let completion = CompletionRequest::new(request.model.as_str(), messages);
    let reply = state.router().complete(provider, &completion).await?;

    info!(request_id = %request_id, provider = %provider.name(), "completion served");
    Ok(Json(GatewayReply::text(reply.text())))
}

/// The image adapter takes a single prompt, the most recent user message.
fn image_prompt(messages: &[ChatMessage]) -> Result<&str, ApiError> {
    messages
        .iter()
        .rev()
        .find(|message| message.role == MessageRole::User && !message.content.is_empty())
        .map(|message| message.content.as_str())
        .ok_or_else(|| RelayError::invalid_request("image request requires a user prompt").into())
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Crate version
    pub version: String,
}

/// Health check endpoint.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Liveness check endpoint.
pub async fn liveness_check() -> impl IntoResponse {
    (StatusCode::OK, "alive")
}

/// Readiness check endpoint; not ready until at least one provider exists.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    if state.providers().is_empty() {
        (StatusCode::SERVICE_UNAVAILABLE, "no providers configured")
    } else {
        (StatusCode::OK, "ready")
    }
}

/// One provider in the admin listing. Never carries key material.
#[derive(Debug, Serialize)]
pub struct ProviderSummary {
    /// Provider registry key
    pub name: String,
    /// Kind of completions served
    pub kind: &'static str,
    /// Number of configured credentials
    pub key_count: usize,
}

impl From<&ProviderConfig> for ProviderSummary {
    fn from(provider: &ProviderConfig) -> Self {
        Self {
            name: provider.name().to_string(),
            kind: match provider.kind() {
                ProviderKind::Chat => "chat",
                ProviderKind::Image => "image",
            },
            key_count: provider.key_count(),
        }
    }
}

/// Admin listing of configured providers.
pub async fn list_providers(State(state): State<AppState>) -> Json<Vec<ProviderSummary>> {
    Json(state.providers().iter().map(ProviderSummary::from).collect())
}
