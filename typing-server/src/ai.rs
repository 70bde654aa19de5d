use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use typing_core::{
    MAX_MESSAGE_CHARS, MAX_PROMPT_CHARS, PromptPair, clean_model_output, fallback_message,
    normalize_accuracy, performance_prompts, prompt_generation_prompts, tier_for, whole_percent,
};
use typing_types::{GeneratedPrompt, PerformanceMessage};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("AI service not configured")]
    NotConfigured,
    #[error("AI request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("AI service returned status {0}")]
    Status(u16),
    #[error("AI service returned an empty response")]
    EmptyResponse,
}

/// A chat model that turns a system/user message pair into text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &PromptPair) -> Result<String, AiError>;
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct ChatCompletionsClient {
    client: Client,
    base_url: String,
    model: String,
    access_key: String,
}

impl ChatCompletionsClient {
    pub fn new(base_url: &str, model: &str, access_key: &str) -> Result<Self, AiError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            access_key: access_key.to_string(),
        })
    }
}

#[async_trait]
impl CompletionClient for ChatCompletionsClient {
    async fn complete(&self, prompt: &PromptPair) -> Result<String, AiError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.access_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AiError::Status(response.status().as_u16()));
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AiError::EmptyResponse)
    }
}

/// Flavor text and prompt generation on top of an optional model client.
#[derive(Clone, Default)]
pub struct AiService {
    client: Option<Arc<dyn CompletionClient>>,
}

impl AiService {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    pub fn disabled() -> Self {
        Self { client: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Never fails: any problem with the model falls back to the canned line.
    pub async fn performance_message(
        &self,
        nickname: &str,
        wpm: f64,
        accuracy: f64,
    ) -> PerformanceMessage {
        let tier = tier_for(wpm, normalize_accuracy(accuracy));
        let fallback = |error: Option<String>| PerformanceMessage {
            message: fallback_message(tier).to_string(),
            tier,
            ai_generated: false,
            error,
        };

        let Some(client) = &self.client else {
            return fallback(None);
        };

        let prompt = performance_prompts(tier, nickname, wpm, whole_percent(accuracy));
        match client.complete(&prompt).await {
            Ok(raw) => PerformanceMessage {
                message: clean_model_output(&raw, MAX_MESSAGE_CHARS),
                tier,
                ai_generated: true,
                error: None,
            },
            Err(err) => {
                warn!("AI performance message failed: {}", err);
                fallback(Some(err.to_string()))
            }
        }
    }

    pub async fn generate_prompt(
        &self,
        category: &str,
        difficulty: &str,
    ) -> Result<GeneratedPrompt, AiError> {
        let client = self.client.as_ref().ok_or(AiError::NotConfigured)?;

        let raw = client
            .complete(&prompt_generation_prompts(category, difficulty))
            .await?;
        let text = clean_model_output(&raw, MAX_PROMPT_CHARS);
        if text.is_empty() {
            return Err(AiError::EmptyResponse);
        }

        Ok(GeneratedPrompt {
            text,
            category: category.to_string(),
            difficulty: difficulty.to_string(),
            ai_generated: true,
        })
    }
}
