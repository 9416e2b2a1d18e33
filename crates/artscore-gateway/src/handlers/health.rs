//! Health endpoint.
//!
//! GET /health - configuration snapshot; always 200 while the process is
//! alive. Reports credential *presence* only, never values.

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;
use std::sync::Arc;

use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let config = &state.config;
    Json(json!({
        "ok": true,
        "provider": config.provider.as_str(),
        "openaiConfigured": config.openai_configured(),
        "geminiConfigured": config.gemini_configured(),
        "openaiModel": config.openai_model,
        "geminiModel": config.gemini_model,
    }))
}
