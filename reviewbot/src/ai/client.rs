//! Chat-completion HTTP client.
//!
//! One request per run: a system message (the prompt template) and a user
//! message (the aggregated diff), fixed sampling parameters, no streaming,
//! no retry. Any failure — transport, non-2xx status, undecodable payload,
//! blank text — is reported to the caller as unavailability; the decision
//! engine falls back to heuristics.

use super::{parse_review, AiError, AiReview, ReviewModel};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const TEMPERATURE: f32 = 1.0;
const TOP_P: f32 = 1.0;
const MAX_TOKENS: u32 = 1000;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct ChatClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    token: String,
}

impl ChatClient {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
            token: token.into(),
        }
    }
}

#[async_trait]
impl ReviewModel for ChatClient {
    async fn review(&self, system_prompt: &str, diff: &str) -> Result<AiReview, AiError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: diff,
                },
            ],
            temperature: TEMPERATURE,
            top_p: TOP_P,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await
            .map_err(|e| AiError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AiError::Decode(e.to_string()))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        let text = text.trim();
        if text.is_empty() {
            return Err(AiError::EmptyResponse);
        }

        Ok(parse_review(text))
    }
}
