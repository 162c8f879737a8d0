//! Tracing initialization for the relay gateway.
//!
//! One global subscriber, set up once at process start. `RUST_LOG` wins
//! when present; otherwise the configured default filter applies. Output
//! is either human-readable or JSON lines depending on configuration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use relay_config::TelemetrySettings;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Tracing initialization error.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// A global subscriber was already installed.
    #[error("failed to initialize tracing: {0}")]
    Init(String),
}

/// Install the global tracing subscriber from telemetry settings.
///
/// # Errors
/// Returns [`TelemetryError::Init`] when a subscriber is already set,
/// which indicates the function was called twice.
pub fn init_tracing(settings: &TelemetrySettings) -> Result<(), TelemetryError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| configured_filter(settings));

    let registry = tracing_subscriber::registry();
    if settings.json_logs {
        registry
            .with(fmt::layer().json().with_filter(filter))
            .try_init()
    } else {
        registry.with(fmt::layer().with_filter(filter)).try_init()
    }
    .map_err(|e| TelemetryError::Init(e.to_string()))?;

    info!(
        default_level = %settings.log_level,
        json_logs = settings.json_logs,
        "tracing initialized"
    );
    Ok(())
}

/// Fallback filter built from the configured default level.
fn configured_filter(settings: &TelemetrySettings) -> EnvFilter {
    EnvFilter::new(&settings.log_level)
}
