//! End-to-end gateway tests covering routing, rotation, and error paths.

use axum::http::StatusCode;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{bearer_token, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::helpers::{app, get_status, init_tracing, post_llm};
use crate::mock_upstream::{chat_reply, mount_keyed_completion};
use crate::{fixtures, mock_upstream};

#[tokio::test]
async fn test_health_and_readiness() {
    init_tracing();
    let app = app(fixtures::rotation_config("https://upstream.invalid/v1"));

    assert_eq!(get_status(&app, "/health").await, StatusCode::OK);
    assert_eq!(get_status(&app, "/live").await, StatusCode::OK);
    assert_eq!(get_status(&app, "/ready").await, StatusCode::OK);
}

#[tokio::test]
async fn test_completion_rotates_to_second_key_after_quota_error() {
    init_tracing();
    let upstream = MockServer::start().await;

    mount_keyed_completion(&upstream, "k1", ResponseTemplate::new(429)).await;
    mount_keyed_completion(
        &upstream,
        "k2",
        ResponseTemplate::new(200).set_body_json(chat_reply("hello")),
    )
    .await;

    let app = app(fixtures::rotation_config(&upstream.uri()));
    let (status, body) = post_llm(
        &app,
        &json!({
            "messages": [{"role": "user", "content": "hi"}],
            "model": "llama-3.3-70b-versatile",
            "provider": "groq",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"type": "text", "content": "hello"}));

    let requests = upstream.received_requests().await.expect("requests recorded");
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_unknown_provider_is_a_configuration_error() {
    init_tracing();
    let app = app(fixtures::rotation_config("https://upstream.invalid/v1"));

    let (status, body) = post_llm(
        &app,
        &json!({
            "messages": [{"role": "user", "content": "hi"}],
            "model": "mistral-large",
            "provider": "mistral",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "configuration_error");
}

#[tokio::test]
async fn test_empty_messages_are_rejected() {
    init_tracing();
    let app = app(fixtures::rotation_config("https://upstream.invalid/v1"));

    let (status, body) = post_llm(
        &app,
        &json!({
            "messages": [],
            "model": "llama-3.3-70b-versatile",
            "provider": "groq",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn test_premium_provider_rejects_standard_request() {
    init_tracing();
    let app = app(fixtures::premium_config("https://upstream.invalid/v1"));

    let (status, body) = post_llm(
        &app,
        &json!({
            "messages": [{"role": "user", "content": "hi"}],
            "model": "qwen-3-coder",
            "provider": "cerebras",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "configuration_error");
    assert!(
        body["detail"].as_str().expect("detail is text").contains("premium"),
        "detail should name the premium restriction: {body}"
    );
}

#[tokio::test]
async fn test_premium_provider_serves_premium_request() {
    init_tracing();
    let upstream = MockServer::start().await;

    mount_keyed_completion(
        &upstream,
        "c1",
        ResponseTemplate::new(200).set_body_json(chat_reply("premium answer")),
    )
    .await;

    let app = app(fixtures::premium_config(&upstream.uri()));
    let (status, body) = post_llm(
        &app,
        &json!({
            "messages": [{"role": "user", "content": "hi"}],
            "model": "qwen-3-coder",
            "provider": "cerebras",
            "isPremium": true,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"type": "text", "content": "premium answer"}));
}

#[tokio::test]
async fn test_image_provider_returns_base64_payload() {
    init_tracing();
    let upstream = MockServer::start().await;
    let image_bytes = b"\x89PNG\r\n\x1a\nimage-bytes".to_vec();

    Mock::given(method("POST"))
        .and(path("/flux-schnell"))
        .and(bearer_token("i1"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(image_bytes.clone()))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = app(fixtures::image_config(&upstream.uri()));
    let (status, body) = post_llm(
        &app,
        &json!({
            "messages": [{"role": "user", "content": "a rusty robot"}],
            "model": "flux-schnell",
            "provider": "cloudflare",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "image");
    let decoded = STANDARD
        .decode(body["content"].as_str().expect("content is base64 text"))
        .expect("content decodes");
    assert_eq!(decoded, image_bytes);
}

#[tokio::test]
async fn test_reasoning_markup_is_stripped_before_routing() {
    init_tracing();
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(wiremock::matchers::body_partial_json(json!({
            "messages": [
                {"role": "assistant", "content": "The answer is 4."},
                {"role": "user", "content": "and doubled?"},
            ],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("8")))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = app(fixtures::rotation_config(&upstream.uri()));
    let (status, body) = post_llm(
        &app,
        &json!({
            "messages": [
                {"role": "assistant", "content": "<think>2 + 2</think>The answer is 4."},
                {"role": "user", "content": "and doubled?"},
            ],
            "model": "llama-3.3-70b-versatile",
            "provider": "groq",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"type": "text", "content": "8"}));
}

#[tokio::test]
async fn test_fatal_upstream_error_is_not_retried() {
    init_tracing();
    let upstream = MockServer::start().await;

    mock_upstream::mount_scripted_completion(&upstream, ResponseTemplate::new(400)).await;

    let app = app(fixtures::rotation_config(&upstream.uri()));
    let (status, body) = post_llm(
        &app,
        &json!({
            "messages": [{"role": "user", "content": "hi"}],
            "model": "llama-3.3-70b-versatile",
            "provider": "groq",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "upstream_fatal");

    let requests = upstream.received_requests().await.expect("requests recorded");
    assert_eq!(requests.len(), 1);
}
