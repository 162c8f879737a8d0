//! Tool executors backed by external collaborator services.
//!
//! Every executor POSTs a JSON body to its service and returns the JSON
//! reply as the tool result. Search-style tools cap their result lists so a
//! verbose collaborator cannot flood the model context.

use async_trait::async_trait;
use relay_config::ToolEndpoints;
use relay_core::{RelayError, RelayResult, RequestContext, ToolDefinition};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::registry::ToolRegistry;
use crate::tool::Tool;
use std::sync::Arc;

/// Maximum entries returned by search-style tools.
const MAX_SEARCH_RESULTS: usize = 3;

/// Build the tool registry from the configured collaborator endpoints.
///
/// A tool whose endpoint is absent is simply not registered; the model never
/// sees its schema.
///
/// # Errors
/// Returns [`RelayError::Internal`] if the shared HTTP client cannot be
/// built.
pub fn registry_from_endpoints(endpoints: &ToolEndpoints) -> RelayResult<ToolRegistry> {
    let client = Client::builder()
        .timeout(endpoints.timeout)
        .build()
        .map_err(|e| RelayError::internal(format!("cannot build tool HTTP client: {e}")))?;

    let mut registry = ToolRegistry::new();
    if let Some(url) = &endpoints.memory_url {
        registry.register(Arc::new(MemoryAddTool::new(client.clone(), url)));
        registry.register(Arc::new(MemorySearchTool::new(client.clone(), url)));
    }
    if let Some(url) = &endpoints.web_search_url {
        registry.register(Arc::new(WebSearchTool::new(client.clone(), url)));
    }
    if let Some(url) = &endpoints.science_search_url {
        registry.register(Arc::new(ScienceSearchTool::new(client.clone(), url)));
    }
    if let Some(url) = &endpoints.ocr_url {
        registry.register(Arc::new(OcrTool::new(client.clone(), url)));
    }
    if let Some(url) = &endpoints.files_url {
        registry.register(Arc::new(FilesTool::new(client.clone(), url)));
    }
    if let Some(url) = &endpoints.sandbox_url {
        registry.register(Arc::new(PythonSandboxTool::new(client, url)));
    }
    Ok(registry)
}

async fn post_json(client: &Client, url: &str, tool: &str, body: &Value) -> RelayResult<Value> {
    debug!(tool, url, "invoking tool executor");
    let response = client.post(url).json(body).send().await.map_err(|e| {
        RelayError::ToolExecution {
            name: tool.to_string(),
            message: format!("request failed: {e}"),
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        let detail = response.text().await.unwrap_or_default();
        return Err(RelayError::ToolExecution {
            name: tool.to_string(),
            message: format!("status {}: {detail}", status.as_u16()),
        });
    }

    response.json().await.map_err(|e| RelayError::ToolExecution {
        name: tool.to_string(),
        message: format!("malformed response: {e}"),
    })
}

fn required_str<'a>(arguments: &'a Value, field: &str, tool: &str) -> RelayResult<&'a str> {
    arguments
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| RelayError::ToolExecution {
            name: tool.to_string(),
            message: format!("missing required argument '{field}'"),
        })
}

fn required_user<'a>(context: &'a RequestContext, tool: &str) -> RelayResult<&'a str> {
    context
        .user_id
        .as_deref()
        .ok_or_else(|| RelayError::ToolExecution {
            name: tool.to_string(),
            message: "memory tools require a user identity".to_string(),
        })
}

/// Cap a search reply at [`MAX_SEARCH_RESULTS`] entries. Handles both a bare
/// array and an object with a `results` array; anything else passes through.
fn cap_results(mut value: Value) -> Value {
    match &mut value {
        Value::Array(entries) => entries.truncate(MAX_SEARCH_RESULTS),
        Value::Object(map) => {
            if let Some(Value::Array(entries)) = map.get_mut("results") {
                entries.truncate(MAX_SEARCH_RESULTS);
            }
        }
        _ => {}
    }
    value
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{path}", base.trim_end_matches('/'))
}

macro_rules! endpoint_tool {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            client: Client,
            url: String,
        }

        impl $name {
            /// Create the executor against its collaborator base URL.
            #[must_use]
            pub fn new(client: Client, url: &str) -> Self {
                Self {
                    client,
                    url: url.trim_end_matches('/').to_string(),
                }
            }
        }
    };
}

endpoint_tool! {
    /// Persists a fact about the user in the memory store.
    MemoryAddTool
}

#[async_trait]
impl Tool for MemoryAddTool {
    fn name(&self) -> &'static str {
        "add_memory"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function(
            self.name(),
            "Store a short fact about the user for later conversations.",
            json!({
                "type": "object",
                "properties": {
                    "memory": {
                        "type": "string",
                        "description": "The fact to remember, one sentence"
                    }
                },
                "required": ["memory"]
            }),
        )
    }

    async fn execute(&self, arguments: Value, context: &RequestContext) -> RelayResult<Value> {
        let memory = required_str(&arguments, "memory", self.name())?;
        let user_id = required_user(context, self.name())?;
        post_json(
            &self.client,
            &join_url(&self.url, "add"),
            self.name(),
            &json!({"memory": memory, "user_id": user_id}),
        )
        .await
    }
}

endpoint_tool! {
    /// Retrieves previously stored facts about the user.
    MemorySearchTool
}

#[async_trait]
impl Tool for MemorySearchTool {
    fn name(&self) -> &'static str {
        "search_memory"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function(
            self.name(),
            "Search previously stored facts about the user.",
            json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "What to look for"}
                },
                "required": ["query"]
            }),
        )
    }

    async fn execute(&self, arguments: Value, context: &RequestContext) -> RelayResult<Value> {
        let query = required_str(&arguments, "query", self.name())?;
        let user_id = required_user(context, self.name())?;
        let reply = post_json(
            &self.client,
            &join_url(&self.url, "search"),
            self.name(),
            &json!({"query": query, "user_id": user_id}),
        )
        .await?;
        Ok(cap_results(reply))
    }
}

endpoint_tool! {
    /// Searches the web and returns the top results.
    WebSearchTool
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &'static str {
        "web_search"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function(
            self.name(),
            "Search the web for current information.",
            json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "Search query"}
                },
                "required": ["query"]
            }),
        )
    }

    async fn execute(&self, arguments: Value, _context: &RequestContext) -> RelayResult<Value> {
        let query = required_str(&arguments, "query", self.name())?;
        let reply = post_json(&self.client, &self.url, self.name(), &json!({"query": query})).await?;
        Ok(cap_results(reply))
    }
}

endpoint_tool! {
    /// Queries a scientific computation service.
    ScienceSearchTool
}

#[async_trait]
impl Tool for ScienceSearchTool {
    fn name(&self) -> &'static str {
        "science_search"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function(
            self.name(),
            "Query a computation engine for math, science and factual data.",
            json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "The question or expression"}
                },
                "required": ["query"]
            }),
        )
    }

    async fn execute(&self, arguments: Value, _context: &RequestContext) -> RelayResult<Value> {
        let query = required_str(&arguments, "query", self.name())?;
        post_json(&self.client, &self.url, self.name(), &json!({"query": query})).await
    }
}

endpoint_tool! {
    /// Describes the content of a base64-encoded image.
    OcrTool
}

#[async_trait]
impl Tool for OcrTool {
    fn name(&self) -> &'static str {
        "ocr_tool"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function(
            self.name(),
            "Extract text and a description from a base64-encoded image.",
            json!({
                "type": "object",
                "properties": {
                    "image_b64": {"type": "string", "description": "Base64 image bytes"}
                },
                "required": ["image_b64"]
            }),
        )
    }

    async fn execute(&self, arguments: Value, _context: &RequestContext) -> RelayResult<Value> {
        let image = required_str(&arguments, "image_b64", self.name())?;
        post_json(&self.client, &self.url, self.name(), &json!({"image_b64": image})).await
    }
}

endpoint_tool! {
    /// Extracts text content from an uploaded file.
    FilesTool
}

#[async_trait]
impl Tool for FilesTool {
    fn name(&self) -> &'static str {
        "files_tool"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function(
            self.name(),
            "Extract text content and a detected type from a file.",
            json!({
                "type": "object",
                "properties": {
                    "buffer": {"type": "string", "description": "Base64 file bytes"},
                    "name": {"type": "string", "description": "Original file name"}
                },
                "required": ["buffer", "name"]
            }),
        )
    }

    async fn execute(&self, arguments: Value, _context: &RequestContext) -> RelayResult<Value> {
        let buffer = required_str(&arguments, "buffer", self.name())?;
        let name = required_str(&arguments, "name", self.name())?;
        post_json(
            &self.client,
            &self.url,
            self.name(),
            &json!({"buffer": buffer, "name": name}),
        )
        .await
    }
}

endpoint_tool! {
    /// Runs Python code in an isolated sandbox.
    PythonSandboxTool
}

#[async_trait]
impl Tool for PythonSandboxTool {
    fn name(&self) -> &'static str {
        "python_code_execution"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function(
            self.name(),
            "Execute Python code in a sandbox and return its output.",
            json!({
                "type": "object",
                "properties": {
                    "code": {"type": "string", "description": "Python source to run"}
                },
                "required": ["code"]
            }),
        )
    }

    async fn execute(&self, arguments: Value, _context: &RequestContext) -> RelayResult<Value> {
        let code = required_str(&arguments, "code", self.name())?;
        post_json(&self.client, &self.url, self.name(), &json!({"code": code})).await
    }
}
