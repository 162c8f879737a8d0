//! # LLM Relay Gateway
//!
//! Resilient multi-provider relay for LLM chat completions with an
//! agentic tool-calling loop.
//!
//! ## Usage
//!
//! ```bash
//! # Start with the default configuration file (relay.toml)
//! llm-relay-gateway
//!
//! # Start with an explicit configuration file
//! RELAY_CONFIG=/etc/relay/relay.toml llm-relay-gateway
//!
//! # Overlay credentials from the environment
//! RELAY_PROVIDER_GROQ_API_KEYS=k1,k2 llm-relay-gateway
//! ```

use anyhow::Context;
use relay_config::RelayConfig;
use relay_server::{create_router, shutdown_signal, AppState};
use tracing::info;

const DEFAULT_CONFIG_PATH: &str = "relay.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path =
        std::env::var("RELAY_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = RelayConfig::load(&config_path)
        .with_context(|| format!("loading configuration from {config_path}"))?;

    relay_telemetry::init_tracing(&config.telemetry).context("initializing tracing")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_path,
        "starting LLM relay gateway"
    );

    let bind_addr = config.server.bind_addr.clone();
    let state = AppState::from_config(config).context("assembling gateway state")?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    info!(addr = %bind_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving requests")?;

    info!("relay gateway stopped");
    Ok(())
}
