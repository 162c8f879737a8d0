//! The tool executor trait.

use async_trait::async_trait;
use relay_core::{RelayResult, RequestContext, ToolDefinition};
use serde_json::Value;

/// An asynchronous tool executor the model can invoke.
///
/// Implementations are external collaborator boundaries (memory store,
/// search services, OCR, code sandbox). The caller identity travels in the
/// explicit [`RequestContext`] parameter, never through ambient state, so
/// concurrent requests for different users cannot cross-contaminate.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Stable tool name, as declared to the model.
    fn name(&self) -> &'static str;

    /// Schema declaration sent to tool-capable models.
    fn definition(&self) -> ToolDefinition;

    /// Execute the tool with the model-supplied arguments.
    ///
    /// # Errors
    /// Returns [`relay_core::RelayError::ToolExecution`] when the underlying
    /// collaborator fails.
    async fn execute(&self, arguments: Value, context: &RequestContext) -> RelayResult<Value>;
}

impl std::fmt::Debug for dyn Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool").field("name", &self.name()).finish()
    }
}
