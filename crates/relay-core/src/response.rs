//! Completion response wire shapes and the gateway reply type.

use serde::{Deserialize, Serialize};

use crate::message::{MessageRole, ToolCall};

/// Chat-completion response from an OpenAI-compatible provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletion {
    /// Provider-assigned response id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Model that produced the completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Completion choices; the gateway only consumes the first
    pub choices: Vec<Choice>,
    /// Token accounting, when the provider reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ChatCompletion {
    /// The assistant message of the first choice, if any.
    #[must_use]
    pub fn message(&self) -> Option<&CompletionMessage> {
        self.choices.first().map(|choice| &choice.message)
    }
}

/// One completion choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    /// Position of this choice
    #[serde(default)]
    pub index: u32,
    /// The generated assistant message
    pub message: CompletionMessage,
    /// Why generation stopped (`"stop"`, `"tool_calls"`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Assistant message inside a completion choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionMessage {
    /// Author role; assistant in practice
    #[serde(default = "assistant_role")]
    pub role: MessageRole,
    /// Generated text; absent when the model only requests tools
    #[serde(default)]
    pub content: Option<String>,
    /// Tool calls requested by the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

fn assistant_role() -> MessageRole {
    MessageRole::Assistant
}

impl CompletionMessage {
    /// Text content, empty string when absent.
    #[must_use]
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }

    /// First requested tool call, if any.
    #[must_use]
    pub fn first_tool_call(&self) -> Option<&ToolCall> {
        self.tool_calls.as_ref().and_then(|calls| calls.first())
    }

    /// Number of tool calls requested in this turn.
    #[must_use]
    pub fn tool_call_count(&self) -> usize {
        self.tool_calls.as_ref().map_or(0, Vec::len)
    }
}

/// Token usage reported by a provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Tokens in the completion
    #[serde(default)]
    pub completion_tokens: u32,
    /// Total tokens
    #[serde(default)]
    pub total_tokens: u32,
}

/// Final reply produced by the gateway entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayReply {
    /// Whether `content` is chat text or base64 image bytes
    #[serde(rename = "type")]
    pub kind: ReplyKind,
    /// Reply payload
    pub content: String,
}

impl GatewayReply {
    /// A text reply.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Text,
            content: content.into(),
        }
    }

    /// A base64-encoded image reply.
    #[must_use]
    pub fn image(content: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Image,
            content: content.into(),
        }
    }
}

/// Kind of gateway reply payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyKind {
    /// Chat text
    Text,
    /// Base64-encoded image bytes from the bespoke image provider
    Image,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_completion() {
        let body = serde_json::json!({
            "choices": [{"message": {"content": "hello"}}]
        });
        let completion: ChatCompletion = serde_json::from_value(body).unwrap();
        let message = completion.message().unwrap();
        assert_eq!(message.text(), "hello");
        assert_eq!(message.role, MessageRole::Assistant);
        assert!(message.first_tool_call().is_none());
    }

    #[test]
    fn test_parse_tool_call_completion() {
        let body = serde_json::json!({
            "choices": [{
                "finish_reason": "tool_calls",
                "message": {
                    "content": null,
                    "tool_calls": [
                        {"id": "call_1", "type": "function",
                         "function": {"name": "web_search", "arguments": "{\"query\":\"rust\"}"}},
                        {"id": "call_2", "type": "function",
                         "function": {"name": "ocr_tool", "arguments": "{}"}}
                    ]
                }
            }]
        });
        let completion: ChatCompletion = serde_json::from_value(body).unwrap();
        let message = completion.message().unwrap();
        assert_eq!(message.text(), "");
        assert_eq!(message.tool_call_count(), 2);
        assert_eq!(message.first_tool_call().unwrap().function.name, "web_search");
    }

    #[test]
    fn test_gateway_reply_serialization() {
        let reply = GatewayReply::text("hello");
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json, serde_json::json!({"type": "text", "content": "hello"}));

        let reply = GatewayReply::image("aGk=");
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["type"], "image");
    }
}
