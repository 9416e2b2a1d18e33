//! Gateway error types and their wire mapping.
//!
//! `/score` has exactly two failure responses: `400` for a malformed body
//! and `429` when the process-wide rate ceiling is hit. Provider failures
//! never reach this layer — the engine resolves them to an offline score.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// HTTP-surface errors.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("rate limit exceeded")]
    RateLimitExceeded,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, code, details) = match self {
            GatewayError::InvalidRequest(details) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", details)
            }
            GatewayError::RateLimitExceeded => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMITED",
                "too many requests, retry later".to_string(),
            ),
        };

        let body = Json(json!({
            "error": code,
            "details": details,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_request_maps_to_400() {
        let response = GatewayError::InvalidRequest("field 'title' must be a string".into())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn rate_limit_maps_to_429() {
        let response = GatewayError::RateLimitExceeded.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
