//! Process shutdown signal handling.

use tokio::signal;
use tracing::info;

/// Resolve when the process receives ctrl-c or SIGTERM.
///
/// # Panics
/// Panics if signal handlers cannot be installed.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!(signal = "ctrl-c", "shutdown signal received"),
        () = terminate => info!(signal = "sigterm", "shutdown signal received"),
    }
}
