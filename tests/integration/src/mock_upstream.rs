//! Wiremock stand-ins for upstream providers and tool services.

use serde_json::{json, Value};
use wiremock::matchers::{bearer_token, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// OpenAI-style completion body carrying plain text content.
pub fn chat_reply(text: &str) -> Value {
    json!({"choices": [{"message": {"role": "assistant", "content": text}}]})
}

/// Completion body requesting a single tool call.
pub fn tool_call_reply(id: &str, name: &str, arguments: &Value) -> Value {
    json!({
        "choices": [{"message": {
            "role": "assistant",
            "content": null,
            "tool_calls": [{
                "id": id,
                "type": "function",
                "function": {"name": name, "arguments": arguments.to_string()},
            }],
        }}]
    })
}

/// Mount a completion mock answering exactly once for one bearer key.
pub async fn mount_keyed_completion(server: &MockServer, key: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(bearer_token(key))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

/// Mount a completion mock that answers exactly once, then retires.
///
/// Mount order is answer order: the first still-active mock wins, so a
/// scripted exchange is a sequence of these.
pub async fn mount_scripted_completion(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(response)
        .up_to_n_times(1)
        .expect(1)
        .mount(server)
        .await;
}
