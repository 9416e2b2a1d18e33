//! Shared application state and startup provider selection.

use crate::config::{GatewayConfig, ProviderKind};
use crate::middleware::RateLimiter;
use artscore_core::ScoreEngine;
use artscore_core::gemini::{GeminiScoreConfig, GeminiScorer};
use artscore_core::openai::{OpenAiScoreConfig, OpenAiScorer};
use tracing::{info, warn};

/// State shared across all request handlers.
pub struct AppState {
    pub config: GatewayConfig,
    pub engine: ScoreEngine,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn from_config(config: GatewayConfig) -> Self {
        let rate_limiter = RateLimiter::new(config.rate_limit_max, config.rate_limit_window);
        let engine = build_engine(&config);
        Self {
            config,
            engine,
            rate_limiter,
        }
    }
}

/// Construct the scoring engine for the selected provider.
///
/// Only the configured, credentialed adapter is built; a selected provider
/// with no credential runs offline, identically to demo mode.
fn build_engine(config: &GatewayConfig) -> ScoreEngine {
    match config.provider {
        ProviderKind::OpenAi if config.openai_configured() => {
            info!(model = %config.openai_model, "scoring via the OpenAI backend");
            let adapter_config = OpenAiScoreConfig::new(
                config.openai_api_key.clone().unwrap_or_default(),
            )
            .with_model(config.openai_model.clone())
            .with_timeout(config.provider_timeout.as_secs());
            ScoreEngine::new(Box::new(OpenAiScorer::with_config(adapter_config)))
        }
        ProviderKind::Gemini if config.gemini_configured() => {
            info!(model = %config.gemini_model, "scoring via the Gemini backend");
            let adapter_config = GeminiScoreConfig::new(
                config.gemini_api_key.clone().unwrap_or_default(),
            )
            .with_model(config.gemini_model.clone())
            .with_timeout(config.provider_timeout.as_secs());
            ScoreEngine::new(Box::new(GeminiScorer::with_config(adapter_config)))
        }
        ProviderKind::OpenAi | ProviderKind::Gemini => {
            warn!(
                provider = config.provider.as_str(),
                "provider selected but credential missing, scoring offline"
            );
            ScoreEngine::offline()
        }
        ProviderKind::Demo => {
            info!("offline scoring mode");
            ScoreEngine::offline()
        }
    }
}
