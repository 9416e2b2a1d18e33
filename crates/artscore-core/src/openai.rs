//! OpenAI scoring adapter.
//!
//! One chat-completions call per request. The image rides along by
//! reference: remote URLs and embedded data references are both passed
//! verbatim as an `image_url` content part, so this adapter never fetches
//! or re-encodes anything locally.

use crate::extract;
use crate::image;
use crate::provider::{
    ProviderError, ProviderOutcome, ProviderResult, REVIEWER_INSTRUCTION, ScoreProvider,
    user_prompt,
};
use crate::request::ScoreRequest;
use async_openai::{
    Client,
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImage,
        ChatCompletionRequestMessageContentPartText, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContent,
        ChatCompletionRequestUserMessageContentPart, CreateChatCompletionRequestArgs, ImageUrl,
    },
};
use async_trait::async_trait;
use std::time::Duration;

const TEMPERATURE: f32 = 0.2;

/// OpenAI adapter configuration.
#[derive(Debug, Clone)]
pub struct OpenAiScoreConfig {
    pub api_key: String,
    /// OpenAI-compatible base URL; `None` uses the crate default.
    pub base_url: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for OpenAiScoreConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: None,
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 10,
        }
    }
}

impl OpenAiScoreConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
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

/// Scoring via the OpenAI chat-completions API.
pub struct OpenAiScorer {
    client: Client<OpenAIConfig>,
    config: OpenAiScoreConfig,
}

impl OpenAiScorer {
    pub fn with_config(config: OpenAiScoreConfig) -> Self {
        let mut openai_config = OpenAIConfig::new().with_api_key(&config.api_key);
        if let Some(ref base_url) = config.base_url {
            openai_config = openai_config.with_api_base(base_url);
        }

        Self {
            client: Client::with_config(openai_config),
            config,
        }
    }

    fn build_messages(
        &self,
        request: &ScoreRequest,
        include_image: bool,
    ) -> Result<Vec<ChatCompletionRequestMessage>, OpenAIError> {
        let mut parts = vec![ChatCompletionRequestUserMessageContentPart::Text(
            ChatCompletionRequestMessageContentPartText {
                text: user_prompt(request),
            },
        )];

        if include_image {
            parts.push(ChatCompletionRequestUserMessageContentPart::ImageUrl(
                ChatCompletionRequestMessageContentPartImage {
                    image_url: ImageUrl {
                        url: request.image_ref.clone(),
                        detail: None,
                    },
                },
            ));
        }

        Ok(vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(REVIEWER_INSTRUCTION)
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(ChatCompletionRequestUserMessageContent::Array(parts))
                .build()?
                .into(),
        ])
    }

    fn map_error(err: OpenAIError) -> ProviderError {
        match err {
            OpenAIError::Reqwest(e) => {
                if e.is_timeout() {
                    ProviderError::Timeout(e.to_string())
                } else {
                    ProviderError::Network(e.to_string())
                }
            }
            OpenAIError::ApiError(api) => ProviderError::Api {
                status: None,
                message: api.message,
            },
            OpenAIError::JSONDeserialize(e) => ProviderError::MalformedResponse(e.to_string()),
            other => ProviderError::Other(other.to_string()),
        }
    }
}

#[async_trait]
impl ScoreProvider for OpenAiScorer {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn score(&self, request: &ScoreRequest) -> ProviderResult<ProviderOutcome> {
        let include_image = !image::classify(&request.image_ref).is_none();

        let messages = self
            .build_messages(request, include_image)
            .map_err(Self::map_error)?;

        let completion_request = CreateChatCompletionRequestArgs::default()
            .model(self.config.model.as_str())
            .messages(messages)
            .temperature(TEMPERATURE)
            .build()
            .map_err(Self::map_error)?;

        let response = tokio::time::timeout(
            Duration::from_secs(self.config.timeout_secs),
            self.client.chat().create(completion_request),
        )
        .await
        .map_err(|_| {
            ProviderError::Timeout(format!(
                "no completion within {}s",
                self.config.timeout_secs
            ))
        })?
        .map_err(Self::map_error)?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        let score = extract::score_from_text(&content)?;

        Ok(ProviderOutcome {
            score,
            provider: self.name(),
            model: self.config.model.clone(),
            used_image: include_image,
        })
    }
}
