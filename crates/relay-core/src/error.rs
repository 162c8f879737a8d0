//! Error taxonomy for the relay gateway.
//!
//! Every surfaced error carries a machine-readable kind plus a human-readable
//! detail string. Quota, rate-limit and transient upstream failures are
//! recovered inside the router and only surface as `ProviderUnavailable`
//! once all rounds are exhausted.

use std::time::Duration;

/// Result alias used across the relay crates.
pub type RelayResult<T> = Result<T, RelayError>;

/// Unified error type for the relay gateway.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Unknown provider, empty credential pool or otherwise unusable
    /// configuration. Never retried.
    #[error("configuration error: {message}")]
    Configuration {
        /// What is wrong with the configuration
        message: String,
    },

    /// The model requested a tool that is not registered. A programming or
    /// configuration error, never retried; the agent loop is aborted.
    #[error("unknown tool requested by model: {name}")]
    ToolResolution {
        /// The unresolvable tool name
        name: String,
    },

    /// The agent loop exceeded its configured turn budget.
    #[error("agent loop exceeded budget of {max_turns} turns")]
    AgentBudgetExceeded {
        /// The configured maximum number of turns
        max_turns: u32,
    },

    /// A tool executor failed while running.
    #[error("tool '{name}' failed: {message}")]
    ToolExecution {
        /// The tool that failed
        name: String,
        /// Failure detail
        message: String,
    },

    /// Quota or payment failure (HTTP 429/402) on one credential. Recovered
    /// by rotation; surfaces only via [`RelayError::ProviderUnavailable`].
    #[error("provider {provider} returned quota error (status {status})")]
    UpstreamQuota {
        /// Provider name
        provider: String,
        /// HTTP status code (429 or 402)
        status: u16,
    },

    /// The provider supplied an explicit rate-limit hint. Recovered by a
    /// scheduled sleep; surfaces only via [`RelayError::ProviderUnavailable`].
    #[error("provider {provider} rate limited, retry after {wait:?}")]
    UpstreamRateLimited {
        /// Provider name
        provider: String,
        /// Parsed wait time from the vendor hint
        wait: Duration,
    },

    /// Transient upstream failure (HTTP 5xx). Recovered like quota errors.
    #[error("provider {provider} returned transient error (status {status})")]
    UpstreamTransient {
        /// Provider name
        provider: String,
        /// HTTP status code
        status: u16,
    },

    /// Unrecoverable upstream failure: a 4xx other than 429/402, a malformed
    /// response body, or a network error without a usable status. Surfaced
    /// immediately, never retried.
    #[error("provider {provider} request failed: {message}")]
    UpstreamFatal {
        /// Provider name
        provider: String,
        /// Failure detail
        message: String,
        /// HTTP status, when one was observed
        status: Option<u16>,
    },

    /// All credentials and rounds were exhausted without a success.
    #[error("provider {provider} unavailable after {rounds} rounds: {last_error}")]
    ProviderUnavailable {
        /// Provider name
        provider: String,
        /// Number of rounds attempted
        rounds: u32,
        /// Detail of the last observed failure
        last_error: String,
    },

    /// The inbound request is malformed (empty messages, bad payload).
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// Validation detail
        message: String,
    },

    /// Internal invariant failure (HTTP client construction and similar).
    #[error("internal error: {message}")]
    Internal {
        /// Failure detail
        message: String,
    },
}

impl RelayError {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid-request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create an upstream-fatal error.
    #[must_use]
    pub fn upstream_fatal(
        provider: impl Into<String>,
        message: impl Into<String>,
        status: Option<u16>,
    ) -> Self {
        Self::UpstreamFatal {
            provider: provider.into(),
            message: message.into(),
            status,
        }
    }

    /// Machine-readable error kind, stable across releases.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "configuration_error",
            Self::ToolResolution { .. } => "tool_resolution",
            Self::AgentBudgetExceeded { .. } => "agent_budget",
            Self::ToolExecution { .. } => "tool_execution",
            Self::UpstreamQuota { .. } => "upstream_quota",
            Self::UpstreamRateLimited { .. } => "upstream_rate_limited",
            Self::UpstreamTransient { .. } => "upstream_transient",
            Self::UpstreamFatal { .. } => "upstream_fatal",
            Self::ProviderUnavailable { .. } => "provider_unavailable",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::Internal { .. } => "internal",
        }
    }

    /// Whether the router may keep rotating credentials after this error.
    ///
    /// Quota and transient failures are worth trying the next key; a
    /// rate-limit hint pauses the round; everything else is terminal.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UpstreamQuota { .. }
                | Self::UpstreamRateLimited { .. }
                | Self::UpstreamTransient { .. }
        )
    }
}
