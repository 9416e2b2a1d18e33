//! Scoring provider contract.
//!
//! Every backend adapter implements [`ScoreProvider`]. Adapters convert all
//! transport, auth, and malformed-response conditions into
//! [`ProviderError`] at their boundary — nothing else leaks past the
//! contract, and the caller treats any error as "fall back to the offline
//! scorer".

use crate::request::ScoreRequest;
use async_trait::async_trait;
use thiserror::Error;

/// System instruction shared by both backends.
pub(crate) const REVIEWER_INSTRUCTION: &str = "You are an expert art authenticity reviewer. \
    Score the likelihood that an artwork was created by a human without AI generation. \
    Respond ONLY with a JSON object: {\"score\": number from 0 to 100}. Higher is more human-made. \
    Consider brushwork irregularities, compositional artifacts, text rendering, patterns, \
    and cues from the description.";

/// User content shared by both backends.
pub(crate) fn user_prompt(request: &ScoreRequest) -> String {
    format!(
        "Title: {}\nDescription: {}\nReturn strictly JSON with a numeric score field.",
        or_placeholder(&request.title, "(untitled)"),
        or_placeholder(&request.description, "(none)"),
    )
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}

/// Result of one successful provider invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderOutcome {
    /// Authenticity score in [0,100].
    pub score: u8,
    pub provider: &'static str,
    pub model: String,
    /// Whether an image was actually attached to the backend call.
    pub used_image: bool,
}

/// Adapter-boundary failure.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("request timeout: {0}")]
    Timeout(String),

    #[error("API error: {message} (status: {status:?})")]
    Api {
        status: Option<u16>,
        message: String,
    },

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("provider error: {0}")]
    Other(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// A multimodal scoring backend.
#[async_trait]
pub trait ScoreProvider: Send + Sync {
    /// Stable provider identifier as it appears in responses.
    fn name(&self) -> &'static str;

    /// Model identifier this adapter calls.
    fn model(&self) -> &str;

    /// Score one request. Any irrecoverable condition comes back as
    /// [`ProviderError`]; adapters never panic across this boundary.
    async fn score(&self, request: &ScoreRequest) -> ProviderResult<ProviderOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_prompt_substitutes_placeholders() {
        let prompt = user_prompt(&ScoreRequest::default());
        assert!(prompt.contains("Title: (untitled)"));
        assert!(prompt.contains("Description: (none)"));
    }

    #[test]
    fn user_prompt_passes_fields_through() {
        let prompt = user_prompt(&ScoreRequest {
            title: "Sunset".into(),
            description: "oil on canvas".into(),
            image_ref: String::new(),
        });
        assert!(prompt.contains("Title: Sunset"));
        assert!(prompt.contains("Description: oil on canvas"));
    }
}
