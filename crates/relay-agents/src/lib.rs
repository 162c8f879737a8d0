//! # Relay Agents
//!
//! The agentic extension of the gateway: a registry of asynchronous tool
//! executors (external collaborator services) and the bounded loop that lets
//! a tool-capable model invoke them before producing its final answer.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod agent_loop;
pub mod executors;
pub mod registry;
pub mod tool;

pub use agent_loop::AgentLoop;
pub use executors::registry_from_endpoints;
pub use registry::ToolRegistry;
pub use tool::Tool;
