//! AI review collaborator.
//!
//! The model is asked for a JSON object carrying an explicit verdict next
//! to the Markdown review body, so the decision engine does not have to
//! sniff free-form prose. Models do not always comply; `parse_review`
//! extracts JSON tolerantly and falls back to treating the whole response
//! as an unstructured body (verdict `None`).

pub mod client;
pub mod prompt;

pub use client::ChatClient;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AiError {
    #[error("chat completion request failed: {0}")]
    Request(String),
    #[error("chat endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode chat response: {0}")]
    Decode(String),
    #[error("empty response from model")]
    EmptyResponse,
}

/// Explicit review verdict returned by a compliant model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Findings,
    Clean,
}

/// The structured response shape the prompt asks for.
#[derive(Debug, Clone, Deserialize)]
pub struct StructuredReview {
    pub verdict: Verdict,
    pub review: String,
}

/// Outcome of a successful model call.
#[derive(Debug, Clone)]
pub struct AiReview {
    /// Markdown review body.
    pub body: String,
    /// Present only when the model honored the structured contract.
    pub verdict: Option<Verdict>,
}

/// Seam for the review model so the pipeline can be driven without HTTP.
#[async_trait]
pub trait ReviewModel {
    async fn review(&self, system_prompt: &str, diff: &str) -> Result<AiReview, AiError>;
}

/// Interpret raw model output: structured JSON when the contract was
/// honored, otherwise the trimmed text as an unclassified body.
pub fn parse_review(text: &str) -> AiReview {
    if let Some(json) = extract_json_str(text) {
        if let Ok(structured) = serde_json::from_str::<StructuredReview>(json) {
            let body = structured.review.trim();
            if !body.is_empty() {
                return AiReview {
                    body: body.to_owned(),
                    verdict: Some(structured.verdict),
                };
            }
        }
    }
    AiReview {
        body: text.trim().to_owned(),
        verdict: None,
    }
}

/// Find the JSON object inside model output, tolerating markdown fences
/// and surrounding prose. Returns `None` when no object is present.
fn extract_json_str(output: &str) -> Option<&str> {
    let trimmed = output.trim();

    if let Some(start) = trimmed.find("```json") {
        let after_marker = &trimmed[start + 7..];
        return match after_marker.find("```") {
            Some(end) => Some(after_marker[..end].trim()),
            None => Some(after_marker.trim()),
        };
    }

    if trimmed.starts_with('{') {
        return Some(trimmed);
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    (end > start).then(|| &trimmed[start..=end])
}
