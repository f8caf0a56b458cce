use std::env;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::FeedbackRequester;
use crate::error::FeedbackError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Clone, Debug)]
pub struct ChatFeedbackConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
}

impl ChatFeedbackConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Read `OPENAI_API_KEY`, `COACH_AI_BASE_URL` and `COACH_AI_MODEL`.
    ///
    /// Returns `None` when no usable key is present.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("OPENAI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url = env::var("COACH_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let model = env::var("COACH_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        Some(Self {
            base_url,
            api_key,
            model,
            temperature: DEFAULT_TEMPERATURE,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Feedback over an OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct ChatFeedbackRequester {
    client: Client,
    config: Option<ChatFeedbackConfig>,
}

impl ChatFeedbackRequester {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(ChatFeedbackConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<ChatFeedbackConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }
}

#[async_trait]
impl FeedbackRequester for ChatFeedbackRequester {
    async fn request(
        &self,
        system_prompt: &str,
        question: &str,
        answer: &str,
    ) -> Result<String, FeedbackError> {
        let config = self.config.as_ref().ok_or(FeedbackError::Disabled)?;

        let payload = ChatRequest {
            model: config.model.clone(),
            messages: build_messages(system_prompt, question, answer),
            temperature: config.temperature,
        };

        tracing::debug!(model = %config.model, "requesting feedback");
        let response = self
            .client
            .post(config.completions_url())
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        read_feedback(status, &body)
    }
}

/// Map a chat-completions reply to the feedback text.
///
/// The first choice's content is returned as received. Error statuses keep
/// the response body so the upstream message reaches the user.
fn read_feedback(status: StatusCode, body: &str) -> Result<String, FeedbackError> {
    if !status.is_success() {
        return Err(FeedbackError::HttpStatus {
            status,
            body: body.trim().to_string(),
        });
    }

    let parsed: ChatResponse = serde_json::from_str(body)?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(FeedbackError::EmptyResponse)
}

/// The fixed three-message framing: persona instruction, question, answer.
#[must_use]
pub fn build_messages(system_prompt: &str, question: &str, answer: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: "system",
            content: system_prompt.to_string(),
        },
        ChatMessage {
            role: "user",
            content: format!("Question: {question}"),
        },
        ChatMessage {
            role: "user",
            content: format!("Answer: {answer}"),
        },
    ]
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}
