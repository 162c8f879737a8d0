//! # Relay Providers
//!
//! Upstream transports for the LLM Relay Gateway.
//!
//! Two wire shapes exist in this deployment:
//! - OpenAI-compatible chat completions (`POST {base_url}/chat/completions`),
//!   spoken by every chat provider and driven through credential rotation;
//! - the image adapter (`POST {base_url}/{model}`), a bespoke boundary whose
//!   response is raw image bytes rather than chat JSON.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod chat;
pub mod image;
pub mod transport;

pub use chat::HttpChatTransport;
pub use image::ImageAdapter;
pub use transport::{CompletionTransport, TransportError};
