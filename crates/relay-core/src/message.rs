//! Canonical chat message and tool-call types.
//!
//! The gateway speaks a single canonical `{role, content}` form internally;
//! the sanitizer rewrites it into what a specific provider accepts.

use serde::{Deserialize, Serialize};

/// Role of a chat message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System message
    System,
    /// User message
    User,
    /// Assistant message
    Assistant,
    /// Tool result message
    Tool,
}

impl Default for MessageRole {
    /// Messages arriving without a role are treated as user messages.
    fn default() -> Self {
        Self::User
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
            Self::Tool => write!(f, "tool"),
        }
    }
}

/// A single message in a conversation.
///
/// Invariant: a message with role [`MessageRole::Tool`] must carry a
/// non-empty `tool_call_id`; sequences violating this are repaired by
/// [`crate::sanitize::sanitize`] before they reach a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the author; defaults to `user` when absent in the payload
    #[serde(default)]
    pub role: MessageRole,

    /// Text content
    #[serde(default)]
    pub content: String,

    /// Identifier of the tool call this message answers (tool messages only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,

    /// Name of the tool that produced this message (tool messages only)
    #[serde(
        default,
        rename = "name",
        alias = "tool_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub tool_name: Option<String>,

    /// Tool calls requested by the assistant in this turn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl ChatMessage {
    /// Create a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
            tool_call_id: None,
            tool_name: None,
            tool_calls: None,
        }
    }

    /// Create a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            tool_call_id: None,
            tool_name: None,
            tool_calls: None,
        }
    }

    /// Create an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            tool_call_id: None,
            tool_name: None,
            tool_calls: None,
        }
    }

    /// Create an assistant message that requests tool calls.
    #[must_use]
    pub fn assistant_with_tool_calls(content: impl Into<String>, calls: Vec<ToolCall>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            tool_call_id: None,
            tool_name: None,
            tool_calls: Some(calls),
        }
    }

    /// Create a tool result message answering the given call id.
    #[must_use]
    pub fn tool(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Tool,
            content: content.into(),
            tool_call_id: Some(tool_call_id.into()),
            tool_name: None,
            tool_calls: None,
        }
    }

    /// Attach the originating tool name.
    #[must_use]
    pub fn with_tool_name(mut self, name: impl Into<String>) -> Self {
        self.tool_name = Some(name.into());
        self
    }

    /// Whether this is a tool message with a usable call id.
    #[must_use]
    pub fn is_valid_tool_message(&self) -> bool {
        self.role == MessageRole::Tool
            && self
                .tool_call_id
                .as_deref()
                .is_some_and(|id| !id.is_empty())
    }
}

/// A tool call requested by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier of this call, echoed back in the tool result
    pub id: String,
    /// Call type; providers currently only emit `"function"`
    #[serde(rename = "type", default = "default_tool_type")]
    pub tool_type: String,
    /// The function to invoke
    pub function: FunctionCall,
}

fn default_tool_type() -> String {
    "function".to_string()
}

impl ToolCall {
    /// Create a function tool call.
    #[must_use]
    pub fn function(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            tool_type: default_tool_type(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }

    /// Parse the call arguments into structured JSON.
    ///
    /// Models occasionally emit invalid JSON for arguments; that degrades to
    /// an empty object rather than failing the whole loop.
    #[must_use]
    pub fn parsed_arguments(&self) -> serde_json::Value {
        serde_json::from_str(&self.function.arguments)
            .unwrap_or_else(|_| serde_json::Value::Object(serde_json::Map::new()))
    }
}

/// Function name and raw JSON arguments inside a tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Function name
    pub name: String,
    /// Arguments as a JSON-encoded string, as providers transmit them
    #[serde(default)]
    pub arguments: String,
}

/// Declaration of a callable tool, sent to tool-capable models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool type; only `"function"` is supported
    #[serde(rename = "type")]
    pub tool_type: String,
    /// Function signature
    pub function: FunctionDefinition,
}

impl ToolDefinition {
    /// Declare a function tool with a JSON-schema parameter object.
    #[must_use]
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: name.into(),
                description: Some(description.into()),
                parameters: Some(parameters),
            },
        }
    }
}

/// Function signature inside a tool definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDefinition {
    /// Function name
    pub name: String,
    /// Human-readable description shown to the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameter JSON Schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

/// Body of a chat-completion call to an OpenAI-compatible provider.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    /// Target model identifier
    pub model: String,
    /// Conversation to complete
    pub messages: Vec<ChatMessage>,
    /// Tools offered to the model, when any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
    /// Tool choice mode (`"auto"` whenever tools are present)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Create a plain completion request.
    #[must_use]
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            tools: None,
            tool_choice: None,
            temperature: None,
        }
    }

    /// Offer tools to the model and let it choose.
    #[must_use]
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tool_choice = Some("auto".to_string());
        self.tools = Some(tools);
        self
    }

    /// Set the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Per-request caller identity, threaded explicitly into tools that need it.
///
/// Never stored in ambient or global state; concurrent requests for
/// different users cannot cross-contaminate identity.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Opaque user identifier supplied by the caller
    pub user_id: Option<String>,
}

impl RequestContext {
    /// Context for an identified user.
    #[must_use]
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    /// Context for an anonymous request.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }
}
