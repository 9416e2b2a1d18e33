//! Axum router construction and serving.

use crate::config::GatewayConfig;
use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

/// Embedded image references arrive inline in the body, so the cap is well
/// above axum's default.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build the router over the given state.
pub fn build_app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_origin);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/score", post(handlers::score))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .with_state(state)
}

/// Bind `0.0.0.0:{port}` and serve until the process exits.
pub async fn serve(config: GatewayConfig) -> std::io::Result<()> {
    let port = config.port;
    let state = Arc::new(AppState::from_config(config));
    let app = build_app(state);

    let addr = format!("0.0.0.0:{port}");
    info!(addr = %addr, "authenticity scoring gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await
}

/// CORS policy: the configured origin (or any, for `*`), GET/POST, no
/// credentialed-cookie exchange.
fn cors_layer(origin: &str) -> CorsLayer {
    if origin == "*" {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any);
    }

    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any),
        Err(_) => {
            warn!(origin, "CORS_ORIGIN is not a valid header value, allowing any origin");
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any)
        }
    }
}
