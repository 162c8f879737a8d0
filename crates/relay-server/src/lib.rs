//! HTTP surface of the relay gateway.
//!
//! Exposes the `POST /llm` entry point plus health and admin endpoints over
//! shared state holding the provider registry, the resilience router, the
//! agent loop and the image adapter.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod shutdown;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use shutdown::shutdown_signal;
pub use state::AppState;
