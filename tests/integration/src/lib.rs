//! Integration tests for the LLM relay gateway.
//!
//! Drives the full axum router with wiremock standing in for upstream
//! providers and tool collaborator services.

pub mod fixtures;
pub mod helpers;
pub mod mock_upstream;

#[cfg(test)]
mod agent_tests;
#[cfg(test)]
mod gateway_tests;
