//! Credential-rotation state machine.
//!
//! One router invocation executes up to `MAX_ROUNDS` rounds over a
//! provider's ordered credential list. Within a round, quota (429/402) and
//! transient (5xx) failures rotate to the next key after a short fixed
//! backoff; an explicit rate-limit hint ends the round immediately and is
//! honored once; any other failure is terminal. Attempts are strictly
//! sequential, never fanned out, so an already limited vendor is probed one
//! credential at a time.

use relay_config::ProviderConfig;
use relay_core::{CompletionMessage, CompletionRequest, RelayError, RelayResult};
use relay_providers::CompletionTransport;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::hint::rate_limit_hint;

/// Hard cap on rotation rounds per invocation.
pub const MAX_ROUNDS: u32 = 20;

/// Fixed pause between two keys in the same round.
pub const PER_KEY_BACKOFF: Duration = Duration::from_millis(200);

/// Slack added on top of a vendor hint before retrying.
const HINT_GRACE: Duration = Duration::from_millis(500);

/// Longest sleep a vendor hint can impose.
const MAX_HINT_SLEEP: Duration = Duration::from_secs(300);

/// Longest exponential sleep between hint-less rounds.
const MAX_ROUND_SLEEP: Duration = Duration::from_secs(60);

/// Resilience router, generic over the completion transport.
#[derive(Debug, Clone)]
pub struct Router<T> {
    transport: T,
}

impl<T: CompletionTransport> Router<T> {
    /// Build a router over the given transport.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Access the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Execute one completion against `provider`, rotating credentials
    /// until success, a terminal failure, or round exhaustion.
    ///
    /// # Errors
    /// - [`RelayError::Configuration`] if the provider has no credentials;
    /// - [`RelayError::UpstreamFatal`] for non-recoverable failures,
    ///   surfaced immediately;
    /// - [`RelayError::ProviderUnavailable`] once all rounds are exhausted,
    ///   carrying the last observed failure.
    pub async fn complete(
        &self,
        provider: &ProviderConfig,
        request: &CompletionRequest,
    ) -> RelayResult<CompletionMessage> {
        let keys = provider.api_keys();
        if keys.is_empty() {
            return Err(RelayError::configuration(format!(
                "provider '{}' has no API keys configured",
                provider.name()
            )));
        }

        let mut last_error: Option<RelayError> = None;

        for round in 1..=MAX_ROUNDS {
            let mut hint: Option<Duration> = None;

            for (key_index, key) in keys.iter().enumerate() {
                match self.transport.complete(provider, key, request).await {
                    Ok(completion) => {
                        let message = completion
                            .choices
                            .into_iter()
                            .next()
                            .map(|choice| choice.message)
                            .ok_or_else(|| {
                                RelayError::upstream_fatal(
                                    provider.name(),
                                    "completion contained no choices",
                                    None,
                                )
                            })?;
                        debug!(
                            provider = provider.name(),
                            round,
                            key_index,
                            "completion succeeded"
                        );
                        return Ok(message);
                    }
                    Err(error) => {
                        if let Some(wait) = rate_limit_hint(&error) {
                            warn!(
                                provider = provider.name(),
                                round,
                                key_index,
                                wait_s = wait.as_secs_f64(),
                                "rate-limit hint received, pausing round"
                            );
                            last_error = Some(RelayError::UpstreamRateLimited {
                                provider: provider.name().to_string(),
                                wait,
                            });
                            hint = Some(wait);
                            break;
                        }

                        match error.status() {
                            Some(status @ (429 | 402)) => {
                                debug!(
                                    provider = provider.name(),
                                    round,
                                    key_index,
                                    status,
                                    "quota error, rotating to next key"
                                );
                                last_error = Some(RelayError::UpstreamQuota {
                                    provider: provider.name().to_string(),
                                    status,
                                });
                            }
                            Some(status) if status >= 500 => {
                                debug!(
                                    provider = provider.name(),
                                    round,
                                    key_index,
                                    status,
                                    "transient upstream error, rotating to next key"
                                );
                                last_error = Some(RelayError::UpstreamTransient {
                                    provider: provider.name().to_string(),
                                    status,
                                });
                            }
                            status => {
                                return Err(RelayError::upstream_fatal(
                                    provider.name(),
                                    error.message(),
                                    status,
                                ));
                            }
                        }

                        if key_index + 1 < keys.len() {
                            sleep(PER_KEY_BACKOFF).await;
                        }
                    }
                }
            }

            if round < MAX_ROUNDS {
                let wait = hint.map_or_else(
                    || round_backoff(round),
                    |wait| (wait + HINT_GRACE).min(MAX_HINT_SLEEP),
                );
                debug!(
                    provider = provider.name(),
                    round,
                    wait_ms = wait.as_millis(),
                    hinted = hint.is_some(),
                    "round exhausted, backing off"
                );
                sleep(wait).await;
            }
        }

        Err(RelayError::ProviderUnavailable {
            provider: provider.name().to_string(),
            rounds: MAX_ROUNDS,
            last_error: last_error
                .map_or_else(|| "no attempts recorded".to_string(), |e| e.to_string()),
        })
    }
}

/// Exponential hint-less backoff, 1-based round.
fn round_backoff(round: u32) -> Duration {
    Duration::from_secs(2u64.saturating_pow(round)).min(MAX_ROUND_SLEEP)
}
