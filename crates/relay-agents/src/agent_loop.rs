//! The tool-calling agent loop.
//!
//! Extends a single completion call into a bounded multi-turn exchange:
//! each turn the sanitized conversation plus the full tool schema list goes
//! through the router; a reply without tool calls ends the loop, a reply
//! with tool calls executes exactly one tool and feeds its result back.
//!
//! Policy: when a model requests several tool calls in one reply, only the
//! first is honored; the rest are dropped with a warning.

use relay_config::ProviderConfig;
use relay_core::{sanitize, ChatMessage, CompletionRequest, RelayError, RelayResult, RequestContext};
use relay_providers::CompletionTransport;
use relay_router::Router;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::registry::ToolRegistry;

/// Bounded tool-calling loop over a growing conversation.
#[derive(Debug, Clone)]
pub struct AgentLoop<T> {
    router: Router<T>,
    registry: ToolRegistry,
    max_turns: u32,
}

impl<T: CompletionTransport> AgentLoop<T> {
    /// Build the loop over a router and a tool registry.
    #[must_use]
    pub fn new(router: Router<T>, registry: ToolRegistry, max_turns: u32) -> Self {
        Self {
            router,
            registry,
            max_turns,
        }
    }

    /// Run the loop to completion and return the materialized conversation,
    /// final assistant message included.
    ///
    /// # Errors
    /// - [`RelayError::ToolResolution`] when the model requests an
    ///   unregistered tool; the loop aborts without further model calls;
    /// - [`RelayError::ToolExecution`] when a tool executor fails;
    /// - [`RelayError::AgentBudgetExceeded`] when `max_turns` model calls
    ///   did not produce a final answer;
    /// - any router error from the underlying completion calls.
    pub async fn run(
        &self,
        provider: &ProviderConfig,
        model: &str,
        mut conversation: Vec<ChatMessage>,
        context: &RequestContext,
    ) -> RelayResult<Vec<ChatMessage>> {
        let tools = self.registry.definitions();

        for turn in 1..=self.max_turns {
            let request = CompletionRequest::new(model, sanitize(conversation.clone()))
                .with_tools(tools.clone());
            let reply = self.router.complete(provider, &request).await?;

            let Some(call) = reply.first_tool_call().cloned() else {
                debug!(turn, "model produced final answer");
                conversation.push(ChatMessage::assistant(reply.text()));
                return Ok(conversation);
            };

            let dropped = reply.tool_call_count().saturating_sub(1);
            if dropped > 0 {
                warn!(
                    turn,
                    dropped,
                    honored = %call.function.name,
                    "model requested multiple tool calls, honoring only the first"
                );
            }

            let tool = self.registry.resolve(&call.function.name)?;
            info!(turn, tool = tool.name(), "executing tool");

            conversation.push(ChatMessage::assistant_with_tool_calls(
                reply.text(),
                vec![call.clone()],
            ));

            let result = tool.execute(call.parsed_arguments(), context).await?;
            conversation.push(
                ChatMessage::tool(&call.id, render_result(&result))
                    .with_tool_name(&call.function.name),
            );
        }

        Err(RelayError::AgentBudgetExceeded {
            max_turns: self.max_turns,
        })
    }
}

/// Tool results are arbitrary JSON; string results are passed through as-is
/// so the model does not see extra quoting.
fn render_result(result: &Value) -> String {
    match result {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
