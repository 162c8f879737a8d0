//! Canned gateway configurations for integration tests.

use relay_config::RelayConfig;

/// One chat provider `groq` with two rotatable keys.
pub fn rotation_config(base_url: &str) -> RelayConfig {
    RelayConfig::from_toml(&format!(
        r#"
        [providers.groq]
        base_url = "{base_url}"
        api_keys = ["k1", "k2"]
        "#
    ))
    .expect("valid config")
}

/// Chat provider plus a web search tool endpoint for agent runs.
pub fn agent_config(base_url: &str, search_url: &str) -> RelayConfig {
    RelayConfig::from_toml(&format!(
        r#"
        [agent]
        provider = "groq"
        model = "tool-model"
        max_turns = 8

        [tools]
        web_search_url = "{search_url}"

        [providers.groq]
        base_url = "{base_url}"
        api_keys = ["k1"]
        "#
    ))
    .expect("valid config")
}

/// A premium-only chat provider.
pub fn premium_config(base_url: &str) -> RelayConfig {
    RelayConfig::from_toml(&format!(
        r#"
        [providers.cerebras]
        base_url = "{base_url}"
        premium_only = true
        api_keys = ["c1"]
        "#
    ))
    .expect("valid config")
}

/// An image-kind provider served by the bespoke adapter.
pub fn image_config(base_url: &str) -> RelayConfig {
    RelayConfig::from_toml(&format!(
        r#"
        [providers.cloudflare]
        base_url = "{base_url}"
        kind = "image"
        api_keys = ["i1"]
        "#
    ))
    .expect("valid config")
}
