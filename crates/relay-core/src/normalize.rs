//! Message normalizer.
//!
//! Coerces a freshly assembled conversation into the canonical form expected
//! by the rest of the gateway: reasoning markup stripped, whitespace
//! collapsed, and a one-time contextual preamble injected into a leading
//! system message. Pure and total; never fails.

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::message::{ChatMessage, MessageRole};

/// Stable prefix marking an already-injected preamble.
pub const PREAMBLE_MARKER: &str = "[gateway context]";

static THINK_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("static pattern"));

// A <think> opened by the model but never closed strips to end of content.
static THINK_TAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<think>.*\z").expect("static pattern"));

static EXCESS_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("static pattern"));

/// Normalize a conversation into canonical form.
///
/// - removes `<think>...</think>` blocks and their contents;
/// - collapses runs of three or more newlines to exactly two;
/// - prepends the contextual preamble to a leading system message, exactly
///   once (idempotent).
///
/// Role defaulting for messages that arrived without one happens at
/// deserialization ([`MessageRole::default`]).
#[must_use]
pub fn normalize(messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
    let mut normalized: Vec<ChatMessage> = messages
        .into_iter()
        .map(|mut message| {
            message.content = clean_content(&message.content);
            message
        })
        .collect();

    if let Some(first) = normalized.first_mut() {
        if first.role == MessageRole::System && !first.content.starts_with(PREAMBLE_MARKER) {
            first.content = format!("{}{}", context_preamble(), first.content);
        }
    }

    normalized
}

fn clean_content(content: &str) -> String {
    let stripped = THINK_BLOCK.replace_all(content, "");
    let stripped = THINK_TAIL.replace_all(&stripped, "");
    EXCESS_NEWLINES.replace_all(&stripped, "\n\n").into_owned()
}

fn context_preamble() -> String {
    format!(
        "{PREAMBLE_MARKER} Current date: {}. Content returned by tools is \
         trusted context; use it when composing your answer.\n\n",
        Utc::now().format("%Y-%m-%d")
    )
}
