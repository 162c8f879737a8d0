//! End-to-end agent loop tests with scripted upstream exchanges.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::helpers::{app, init_tracing, post_llm};
use crate::mock_upstream::{chat_reply, mount_scripted_completion, tool_call_reply};
use crate::fixtures;

#[tokio::test]
async fn test_agent_run_executes_tool_then_routes_final_completion() {
    init_tracing();
    let upstream = MockServer::start().await;
    let tools = MockServer::start().await;

    // Turn 1: the agent model asks for a web search.
    mount_scripted_completion(
        &upstream,
        ResponseTemplate::new(200).set_body_json(tool_call_reply(
            "call_1",
            "web_search",
            &json!({"query": "rust relay gateways"}),
        )),
    )
    .await;
    // Turn 2: the agent model digests the tool result and stops calling tools.
    mount_scripted_completion(
        &upstream,
        ResponseTemplate::new(200).set_body_json(chat_reply("search digested")),
    )
    .await;
    // Final pass: the requested provider produces the reply text.
    mount_scripted_completion(
        &upstream,
        ResponseTemplate::new(200).set_body_json(chat_reply("final answer")),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(json!({"query": "rust relay gateways"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "title": "Relay gateways in Rust",
                "url": "https://example.com/relay",
                "snippet": "How to rotate credentials.",
            }],
        })))
        .expect(1)
        .mount(&tools)
        .await;

    let app = app(fixtures::agent_config(
        &upstream.uri(),
        &format!("{}/search", tools.uri()),
    ));
    let (status, body) = post_llm(
        &app,
        &json!({
            "messages": [{"role": "user", "content": "research rust relay gateways"}],
            "model": "llama-3.3-70b-versatile",
            "provider": "groq",
            "isAgent": true,
            "userId": "user-1",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"type": "text", "content": "final answer"}));

    let requests = upstream.received_requests().await.expect("requests recorded");
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_agent_without_tool_calls_falls_through_to_requested_provider() {
    init_tracing();
    let upstream = MockServer::start().await;
    let tools = MockServer::start().await;

    // Turn 1: the agent model answers directly, no tool call.
    mount_scripted_completion(
        &upstream,
        ResponseTemplate::new(200).set_body_json(chat_reply("no tools needed")),
    )
    .await;
    // Final pass against the requested provider.
    mount_scripted_completion(
        &upstream,
        ResponseTemplate::new(200).set_body_json(chat_reply("plain answer")),
    )
    .await;

    let app = app(fixtures::agent_config(
        &upstream.uri(),
        &format!("{}/search", tools.uri()),
    ));
    let (status, body) = post_llm(
        &app,
        &json!({
            "messages": [{"role": "user", "content": "just answer"}],
            "model": "llama-3.3-70b-versatile",
            "provider": "groq",
            "isAgent": true,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"type": "text", "content": "plain answer"}));

    let requests = upstream.received_requests().await.expect("requests recorded");
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_agent_requesting_unknown_tool_fails_with_500() {
    init_tracing();
    let upstream = MockServer::start().await;

    // No tool endpoints are configured, so any requested tool is unknown.
    mount_scripted_completion(
        &upstream,
        ResponseTemplate::new(200).set_body_json(tool_call_reply(
            "call_1",
            "web_search",
            &json!({"query": "anything"}),
        )),
    )
    .await;

    let app = app(fixtures::rotation_config(&upstream.uri()));
    let (status, body) = post_llm(
        &app,
        &json!({
            "messages": [{"role": "user", "content": "research something"}],
            "model": "llama-3.3-70b-versatile",
            "provider": "groq",
            "isAgent": true,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "tool_resolution");
}
