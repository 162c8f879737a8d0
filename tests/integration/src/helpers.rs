//! Test helper utilities.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use once_cell::sync::Lazy;
use relay_config::RelayConfig;
use relay_server::{create_router, AppState};
use serde_json::Value;
use tower::ServiceExt;
use tracing_subscriber::EnvFilter;

/// Initialize tracing once per process, gated on `TEST_LOG`.
static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
});

/// Initialize tracing for a test.
pub fn init_tracing() {
    Lazy::force(&TRACING);
}

/// Build the full gateway router from configuration.
pub fn app(config: RelayConfig) -> Router {
    let state = AppState::from_config(config).expect("state assembles");
    create_router(state)
}

/// POST a JSON payload to `/llm`, returning status and parsed body.
pub async fn post_llm(app: &Router, payload: &Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/llm")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .expect("valid request"),
        )
        .await
        .expect("request succeeds");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let body = serde_json::from_slice(&bytes).expect("body is JSON");
    (status, body)
}

/// GET a path and return the response status.
pub async fn get_status(app: &Router, path: &str) -> StatusCode {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(path)
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
        .expect("request succeeds")
        .status()
}
