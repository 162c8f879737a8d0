//! Provider sanitizer.
//!
//! Rewrites a canonical message sequence into the shape an OpenAI-compatible
//! chat endpoint accepts. Providers reject tool messages that do not answer
//! a tool call; downgrading an orphaned tool message to an assistant message
//! keeps its content in the conversation instead of discarding it.

use tracing::debug;

use crate::message::{ChatMessage, MessageRole};

/// Sanitize a message sequence for submission to a provider.
///
/// Total and length-preserving: tool messages carrying a `tool_call_id` pass
/// through intact (id and tool name included); tool messages without one are
/// reclassified as assistant messages with identical content; all other
/// roles pass through unchanged.
#[must_use]
pub fn sanitize(messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
    messages
        .into_iter()
        .map(|message| {
            if message.role != MessageRole::Tool || message.is_valid_tool_message() {
                return message;
            }

            debug!(
                tool_name = message.tool_name.as_deref().unwrap_or("unknown"),
                "downgrading orphaned tool message to assistant"
            );
            ChatMessage {
                role: MessageRole::Assistant,
                content: message.content,
                tool_call_id: None,
                tool_name: None,
                tool_calls: None,
            }
        })
        .collect()
}
