//! # Relay Router
//!
//! The resilience core of the gateway: drives chat-completion attempts
//! across a provider's ordered credential pool, absorbing quota errors,
//! transient 5xx failures and vendor rate-limit hints until one attempt
//! succeeds or the round budget runs out.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod hint;
pub mod router;

pub use hint::{parse_hint, rate_limit_hint};
pub use router::{Router, MAX_ROUNDS, PER_KEY_BACKOFF};
