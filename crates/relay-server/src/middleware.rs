//! Request middleware: request IDs, latency logging, CORS.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tracing::info;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Ensure the request and its response both carry an `x-request-id`.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), String::from);

    // id is either a validated inbound header or a fresh UUID, always a
    // legal header value
    if let Ok(value) = HeaderValue::from_str(&id) {
        request.headers_mut().insert(REQUEST_ID_HEADER, value.clone());
        let mut response = next.run(request).await;
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
        return response;
    }
    next.run(request).await
}

/// One log line per request with method, path, status and latency.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    info!(
        %method,
        path = %path,
        status = response.status().as_u16(),
        latency_ms = %start.elapsed().as_millis(),
        "request handled"
    );
    response
}

/// Permissive CORS layer.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
