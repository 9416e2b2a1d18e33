//! Gemini scoring adapter.
//!
//! One generateContent call per request via the Generative Language API
//! v1beta. Gemini takes image bytes inline rather than by reference, so an
//! embedded reference passes its base64 payload straight through, and a
//! remote reference is fetched and encoded here. A failed fetch drops the
//! image and scores on text alone — the image is advisory, the request is
//! not.

use crate::extract;
use crate::image::{self, ImagePayload, ImageRef};
use crate::provider::{
    ProviderError, ProviderOutcome, ProviderResult, REVIEWER_INSTRUCTION, ScoreProvider,
    user_prompt,
};
use crate::request::ScoreRequest;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::warn;

const TEMPERATURE: f32 = 0.2;
const FALLBACK_MEDIA_TYPE: &str = "image/jpeg";

/// Gemini adapter configuration.
#[derive(Debug, Clone)]
pub struct GeminiScoreConfig {
    pub api_key: String,
    /// Base URL (default: <https://generativelanguage.googleapis.com>).
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for GeminiScoreConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-flash".to_string(),
            timeout_secs: 10,
        }
    }
}

impl GeminiScoreConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Scoring via the Gemini generateContent API.
pub struct GeminiScorer {
    client: reqwest::Client,
    config: GeminiScoreConfig,
}

impl GeminiScorer {
    pub fn with_config(config: GeminiScoreConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build reqwest client");
        Self { client, config }
    }

    /// Resolve the image reference into inline data, or `None` when there
    /// is no usable image for this request.
    async fn inline_image(&self, image_ref: &str) -> Option<ImagePayload> {
        match image::classify(image_ref) {
            ImageRef::Embedded { media_type, base64 } => Some(ImagePayload {
                media_type: media_type.to_string(),
                data: base64.to_string(),
            }),
            ImageRef::Remote(url) => match self.fetch_image(url).await {
                Ok(payload) => Some(payload),
                Err(err) => {
                    warn!(error = %err, "failed to fetch remote image, scoring without it");
                    None
                }
            },
            ImageRef::None => None,
        }
    }

    async fn fetch_image(&self, url: &str) -> ProviderResult<ImagePayload> {
        let response = self.client.get(url).send().await.map_err(Self::map_error)?;

        let media_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(FALLBACK_MEDIA_TYPE)
            .to_string();

        let bytes = response.bytes().await.map_err(Self::map_error)?;

        Ok(ImagePayload {
            media_type,
            data: STANDARD.encode(&bytes),
        })
    }

    fn map_error(err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(err.to_string())
        } else if err.is_connect() || err.is_request() {
            ProviderError::Network(err.to_string())
        } else {
            ProviderError::Other(err.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[async_trait]
impl ScoreProvider for GeminiScorer {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn score(&self, request: &ScoreRequest) -> ProviderResult<ProviderOutcome> {
        let mut parts = vec![
            json!({ "text": REVIEWER_INSTRUCTION }),
            json!({ "text": user_prompt(request) }),
        ];

        let mut used_image = false;
        if let Some(payload) = self.inline_image(&request.image_ref).await {
            parts.push(json!({
                "inlineData": {
                    "mimeType": payload.media_type,
                    "data": payload.data,
                }
            }));
            used_image = true;
        }

        let body = json!({
            "contents": [{ "role": "user", "parts": parts }],
            "generationConfig": { "temperature": TEMPERATURE },
        });

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
            self.config.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(Self::map_error)?;

        let status = response.status();
        let text = response.text().await.map_err(Self::map_error)?;

        if !status.is_success() {
            return Err(match status.as_u16() {
                401 | 403 => ProviderError::Auth(text),
                code => ProviderError::Api {
                    status: Some(code),
                    message: text,
                },
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        let content = parsed
            .candidates
            .into_iter()
            .find_map(|c| c.content)
            .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
            .unwrap_or_default();

        let score = extract::score_from_text(&content)?;

        Ok(ProviderOutcome {
            score,
            provider: self.name(),
            model: self.config.model.clone(),
            used_image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn embedded_reference_passes_base64_through() {
        let scorer = GeminiScorer::with_config(GeminiScoreConfig::new("test-key"));
        let payload = scorer
            .inline_image("data:image/png;base64,QQ==")
            .await
            .unwrap();
        assert_eq!(payload.media_type, "image/png");
        assert_eq!(payload.data, "QQ==");
    }

    #[tokio::test]
    async fn no_image_for_unrecognized_reference() {
        let scorer = GeminiScorer::with_config(GeminiScoreConfig::new("test-key"));
        assert!(scorer.inline_image("").await.is_none());
        assert!(scorer.inline_image("not-a-url").await.is_none());
    }

    #[test]
    fn candidate_text_deserializes() {
        let parsed: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"score\": 64}"}]}}]}"#,
        )
        .unwrap();
        let text = parsed
            .candidates
            .into_iter()
            .find_map(|c| c.content)
            .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
            .unwrap();
        assert_eq!(extract::score_from_text(&text).unwrap(), 64);
    }

    #[test]
    fn config_builders() {
        let config = GeminiScoreConfig::new("k")
            .with_base_url("http://localhost:9000/")
            .with_model("gemini-2.0-flash")
            .with_timeout(3);
        assert_eq!(config.base_url, "http://localhost:9000/");
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.timeout_secs, 3);
    }
}
