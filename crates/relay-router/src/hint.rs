//! Vendor rate-limit hint parsing.
//!
//! Providers signal how long to wait through a small zoo of headers and
//! value grammars. The parser accepts plain seconds (`"45"`, `"2.5"`),
//! compound durations (`"1m30s"`) and HTTP-dates, and checks headers in a
//! fixed precedence order; the first value that parses wins.

use chrono::{DateTime, Utc};
use relay_providers::TransportError;
use std::time::Duration;

/// Headers consulted for a rate-limit hint, in precedence order.
pub const HINT_HEADERS: [&str; 6] = [
    "retry-after",
    "x-ratelimit-reset-tokens",
    "x-ratelimit-reset-requests",
    "x-ratelimit-reset-tokens-minute",
    "x-ratelimit-reset-requests-minute",
    "x-ratelimit-reset",
];

/// Extract a rate-limit hint from a failed attempt, if one is present.
///
/// Headers are consulted in [`HINT_HEADERS`] order; a header that is present
/// but unparseable is skipped in favor of the next one.
#[must_use]
pub fn rate_limit_hint(error: &TransportError) -> Option<Duration> {
    HINT_HEADERS
        .iter()
        .find_map(|name| error.header(name).and_then(parse_hint))
}

/// Parse one hint value into a wait duration.
///
/// Accepted grammars, tried in order:
/// - plain seconds, integer or float (`"45"`, `"2.5"`);
/// - compound duration tokens (`"1h2m3s"`, `"1m30s"`);
/// - an HTTP-date, interpreted as a deadline (already-elapsed dates clamp
///   to zero).
#[must_use]
pub fn parse_hint(value: &str) -> Option<Duration> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(seconds) = value.parse::<f64>() {
        if seconds.is_finite() && seconds >= 0.0 {
            return Some(Duration::from_secs_f64(seconds));
        }
        return None;
    }

    if let Ok(duration) = humantime::parse_duration(value) {
        return Some(duration);
    }

    let deadline = DateTime::parse_from_rfc2822(value).ok()?;
    let delta = deadline.signed_duration_since(Utc::now());
    Some(delta.to_std().unwrap_or(Duration::ZERO))
}
