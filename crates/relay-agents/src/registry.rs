//! Static tool registry.

use relay_core::{RelayError, RelayResult, ToolDefinition};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::tool::Tool;

/// Read-only mapping from tool name to executor.
///
/// Assembled once at startup from the configured endpoints; an unknown name
/// at lookup time is a programming or configuration error, not a transient
/// one.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<&'static str, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its declared name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name(), tool);
    }

    /// Resolve a tool by name.
    ///
    /// # Errors
    /// Returns [`RelayError::ToolResolution`] for an unknown name; the agent
    /// loop aborts on this error without further model calls.
    pub fn resolve(&self, name: &str) -> RelayResult<Arc<dyn Tool>> {
        self.tools
            .get(name)
            .cloned()
            .ok_or_else(|| RelayError::ToolResolution {
                name: name.to_string(),
            })
    }

    /// Schema declarations for every registered tool, in name order.
    #[must_use]
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|tool| tool.definition()).collect()
    }

    /// Registered tool names, in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.tools.keys().copied().collect()
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether no tools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use relay_core::{RelayResult, RequestContext};
    use serde_json::Value;

    struct NoopTool(&'static str);

    #[async_trait]
    impl Tool for NoopTool {
        fn name(&self) -> &'static str {
            self.0
        }

        fn definition(&self) -> ToolDefinition {
            ToolDefinition::function(self.0, "noop", serde_json::json!({"type": "object"}))
        }

        async fn execute(&self, _arguments: Value, _context: &RequestContext) -> RelayResult<Value> {
            Ok(Value::Null)
        }
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(NoopTool("web_search")));
        registry.register(Arc::new(NoopTool("add_memory")));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), ["add_memory", "web_search"]);
        assert_eq!(registry.resolve("web_search").unwrap().name(), "web_search");
    }

    #[test]
    fn test_unknown_tool_is_resolution_error() {
        let registry = ToolRegistry::new();
        let err = registry.resolve("frobnicate").unwrap_err();
        assert_eq!(err.kind(), "tool_resolution");
        assert!(err.to_string().contains("frobnicate"));
    }

    #[test]
    fn test_definitions_follow_name_order() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(NoopTool("web_search")));
        registry.register(Arc::new(NoopTool("add_memory")));

        let names: Vec<String> = registry
            .definitions()
            .into_iter()
            .map(|def| def.function.name)
            .collect();
        assert_eq!(names, ["add_memory", "web_search"]);
    }
}
