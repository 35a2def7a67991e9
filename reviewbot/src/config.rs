//! Environment-sourced configuration.
//!
//! All knobs come from the environment (the tool runs inside a workflow
//! job); `from_lookup` keeps the parsing pure so tests can inject a map
//! instead of mutating process-wide env vars.

use crate::error::AppError;
use std::path::PathBuf;

/// Model used when `MODEL_NAME` is not set.
pub const DEFAULT_MODEL_NAME: &str = "gpt-4o";

/// Chat-completion endpoint used when `MODEL_ENDPOINT` is not set.
pub const DEFAULT_MODEL_ENDPOINT: &str =
    "https://models.inference.ai.azure.com/chat/completions";

#[derive(Debug, Clone)]
pub struct Config {
    /// Auth credential for the GitHub REST API (required).
    pub github_token: String,
    /// Path to the workflow event descriptor file (required).
    pub event_path: PathBuf,
    /// Target repository as "owner/repo" (required).
    pub repository: String,
    /// Model identifier for the chat-completion endpoint.
    pub model_name: String,
    /// Chat-completion endpoint URL.
    pub model_endpoint: String,
    /// Auth credential for the model endpoint; defaults to the GitHub token.
    pub ai_token: String,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let github_token = required(&lookup, "GITHUB_TOKEN")?;
        let event_path = PathBuf::from(required(&lookup, "GITHUB_EVENT_PATH")?);
        let repository = required(&lookup, "GITHUB_REPOSITORY")?;
        if !is_valid_repository(&repository) {
            return Err(AppError::config(format!(
                "GITHUB_REPOSITORY must be \"owner/repo\", got \"{repository}\""
            )));
        }

        let model_name =
            optional(&lookup, "MODEL_NAME").unwrap_or_else(|| DEFAULT_MODEL_NAME.to_owned());
        let model_endpoint = optional(&lookup, "MODEL_ENDPOINT")
            .unwrap_or_else(|| DEFAULT_MODEL_ENDPOINT.to_owned());
        let ai_token = optional(&lookup, "AI_TOKEN").unwrap_or_else(|| github_token.clone());

        Ok(Config {
            github_token,
            event_path,
            repository,
            model_name,
            model_endpoint,
            ai_token,
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| AppError::config(format!("missing required environment variable {key}")))
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|value| !value.trim().is_empty())
}

/// Exactly two non-empty segments separated by a single slash.
fn is_valid_repository(repository: &str) -> bool {
    let mut parts = repository.split('/');
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty()
    )
}
