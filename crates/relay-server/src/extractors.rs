//! Custom axum extractors for the relay API.

use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::{async_trait, body::Bytes};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;

/// Request ID taken from `x-request-id`, generated when absent.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get("x-request-id")
            .and_then(|value| value.to_str().ok())
            .map_or_else(|| uuid::Uuid::new_v4().to_string(), String::from);
        Ok(Self(id))
    }
}

/// JSON body extractor that reports parse failures as `invalid_request`.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> axum::extract::FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("failed to read request body: {e}")))?;

        let value: T = serde_json::from_slice(&bytes).map_err(|e| {
            debug!(error = %e, "request body failed to parse");
            ApiError::bad_request(format!("invalid JSON: {e}"))
        })?;

        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn test_request_id_prefers_header() {
        let req = Request::builder()
            .uri("/llm")
            .header("x-request-id", "req-42")
            .body(())
            .expect("valid request");
        let (mut parts, ()) = req.into_parts();

        let RequestId(id) = RequestId::from_request_parts(&mut parts, &())
            .await
            .expect("extraction is infallible");
        assert_eq!(id, "req-42");
    }

    #[tokio::test]
    async fn test_request_id_is_generated_when_absent() {
        let req = Request::builder()
            .uri("/llm")
            .body(())
            .expect("valid request");
        let (mut parts, ()) = req.into_parts();

        let RequestId(id) = RequestId::from_request_parts(&mut parts, &())
            .await
            .expect("extraction is infallible");
        assert!(uuid::Uuid::parse_str(&id).is_ok());
    }
}
