//! Scoring endpoint.
//!
//! POST /score - rate-limit check, body validation, then the scoring
//! engine. The engine is infallible (provider failures degrade to the
//! offline scorer), so the only error responses here are 429 and 400.

use axum::{Json, body::Bytes, extract::State};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;

use crate::error::GatewayError;
use crate::state::AppState;
use artscore_core::{ScoreRequest, ScoreResult};

/// POST /score
///
/// The body is taken raw so validation can name the offending field; an
/// empty body is treated as `{}`.
pub async fn score(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ScoreResult>, GatewayError> {
    // Rate limit applies before any parsing.
    if !state.rate_limiter.check() {
        return Err(GatewayError::RateLimitExceeded);
    }

    let raw: Value = if body.is_empty() {
        Value::Object(Map::new())
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| GatewayError::InvalidRequest(format!("body is not valid JSON: {e}")))?
    };

    let request = ScoreRequest::from_value(&raw)
        .map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;

    let result = state.engine.score(&request).await;

    info!(
        score = result.score,
        provider = %result.provider,
        "score request completed"
    );

    Ok(Json(result))
}
