//! Fallback orchestration.
//!
//! [`ScoreEngine`] holds the single configured provider adapter, if any,
//! and degrades straight to the offline scorer on any failure. There is no
//! retry and no second remote attempt — one provider call bounds the
//! request latency, and the offline path has no failure mode, so scoring
//! as a whole cannot fail.

use crate::offline;
use crate::provider::{ProviderOutcome, ScoreProvider};
use crate::request::ScoreRequest;
use serde::Serialize;
use tracing::error;

/// Name reported by the offline path.
pub const OFFLINE_PROVIDER: &str = "demo";

/// The externally visible scoring result.
///
/// The offline path reports `provider: "demo"` and omits `model` and
/// `usedImage` entirely.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScoreResult {
    pub score: u8,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(rename = "usedImage", skip_serializing_if = "Option::is_none")]
    pub used_image: Option<bool>,
}

impl ScoreResult {
    fn offline(score: u8) -> Self {
        Self {
            score,
            provider: OFFLINE_PROVIDER.to_string(),
            model: None,
            used_image: None,
        }
    }
}

impl From<ProviderOutcome> for ScoreResult {
    fn from(outcome: ProviderOutcome) -> Self {
        Self {
            score: outcome.score,
            provider: outcome.provider.to_string(),
            model: Some(outcome.model),
            used_image: Some(outcome.used_image),
        }
    }
}

/// Scoring entry point: one optional provider with an unconditional
/// offline fallback.
pub struct ScoreEngine {
    provider: Option<Box<dyn ScoreProvider>>,
}

impl ScoreEngine {
    /// Engine with the given provider adapter in front of the fallback.
    pub fn new(provider: Box<dyn ScoreProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Engine that scores offline only.
    pub fn offline() -> Self {
        Self { provider: None }
    }

    /// Provider identifier answered for successful remote scoring, or
    /// `None` when running offline-only.
    pub fn provider_name(&self) -> Option<&'static str> {
        self.provider.as_ref().map(|p| p.name())
    }

    /// Score a request. Infallible: provider failures are logged and the
    /// offline scorer answers instead.
    pub async fn score(&self, request: &ScoreRequest) -> ScoreResult {
        if let Some(provider) = &self.provider {
            match provider.score(request).await {
                Ok(outcome) => return ScoreResult::from(outcome),
                Err(err) => {
                    error!(
                        provider = provider.name(),
                        error = %err,
                        "provider scoring failed, falling back to offline scorer"
                    );
                }
            }
        }

        ScoreResult::offline(offline::score(
            &request.title,
            &request.description,
            &request.image_ref,
        ))
    }
}
