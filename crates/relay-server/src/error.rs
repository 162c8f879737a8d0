//! API error type and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use relay_core::RelayError;
use serde::Serialize;
use tracing::{error, warn};

/// Error payload returned to callers.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error kind
    pub error: String,
    /// Human-readable detail
    pub detail: String,
}

/// An error renderable as an HTTP response.
///
/// Quota, rate-limit and transient upstream failures never reach this type
/// directly; the router absorbs them and surfaces `provider_unavailable`
/// once its rounds are exhausted.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: String,
    detail: String,
}

impl ApiError {
    /// A 400 rejection for malformed inbound requests.
    #[must_use]
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: "invalid_request".to_string(),
            detail: detail.into(),
        }
    }

    /// HTTP status this error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error kind.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        let status = match &err {
            RelayError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            RelayError::ProviderUnavailable { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            kind: err.kind().to_string(),
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(kind = %self.kind, detail = %self.detail, "request failed");
        } else {
            warn!(kind = %self.kind, detail = %self.detail, "request rejected");
        }
        (
            self.status,
            Json(ErrorBody {
                error: self.kind,
                detail: self.detail,
            }),
        )
            .into_response()
    }
}
