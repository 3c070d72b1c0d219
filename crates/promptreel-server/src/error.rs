//! HTTP error responses
//!
//! Every error body is JSON `{ "message": ... }`. Rate-limit rejections
//! carry a `Retry-After` header.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use promptreel::DomainError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A bad request with a caller-facing message
    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut retry_after = None;

        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Domain(err) => match err {
                DomainError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                DomainError::UnknownModel(_) => {
                    (StatusCode::BAD_REQUEST, "Invalid model".to_string())
                }
                DomainError::RateLimited { retry_after: wait } => {
                    // Round up so clients never retry early
                    let secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
                    retry_after = Some(secs.max(1));
                    (StatusCode::TOO_MANY_REQUESTS, "Too many requests".to_string())
                }
                DomainError::Timeout { .. } => {
                    tracing::warn!(error = %err, "Upstream timeout");
                    (StatusCode::GATEWAY_TIMEOUT, err.to_string())
                }
                DomainError::ExternalService(_) | DomainError::InvalidResponse(_) => {
                    tracing::error!(error = %err, "Upstream failure");
                    (StatusCode::BAD_GATEWAY, err.to_string())
                }
                DomainError::Unavailable(_) | DomainError::MagicModeUnavailable(_) => {
                    tracing::error!(error = %err, "No route available");
                    (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
                }
            },
        };

        let mut response = (status, axum::Json(json!({ "message": message }))).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_rate_limit_sets_retry_after() {
        let response = ApiError::from(DomainError::RateLimited {
            retry_after: Duration::from_millis(2500),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "3");
    }

    #[test]
    fn test_validation_is_bad_request() {
        let response =
            ApiError::from(DomainError::validation("prompt is required")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get(header::RETRY_AFTER).is_none());
    }
}
