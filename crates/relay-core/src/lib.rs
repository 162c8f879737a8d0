//! # Relay Core
//!
//! Core types and message transforms for the LLM Relay Gateway.
//!
//! This crate provides the foundational pieces used throughout the gateway:
//! - Canonical chat message and tool-call types
//! - Completion request/response wire shapes (OpenAI-compatible)
//! - The error taxonomy
//! - The message normalizer and the provider sanitizer

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod message;
pub mod normalize;
pub mod response;
pub mod sanitize;

// Re-export commonly used types
pub use error::{RelayError, RelayResult};
pub use message::{
    ChatMessage, CompletionRequest, FunctionCall, FunctionDefinition, MessageRole, RequestContext,
    ToolCall, ToolDefinition,
};
pub use normalize::normalize;
pub use response::{ChatCompletion, Choice, CompletionMessage, GatewayReply, ReplyKind, Usage};
pub use sanitize::sanitize;
