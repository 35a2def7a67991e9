//! Pull-request host abstraction.
//!
//! Defines the narrow interface the pipeline needs from the hosting
//! platform and a concrete implementation backed by the GitHub REST API.

use crate::diff::ChangedFile;
use crate::labels::{LabelDefinition, LabelSpec};
use async_trait::async_trait;
use reqwest::header;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Pull-request metadata used by the pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestInfo {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    pub user: PrAuthor,
    #[serde(default)]
    pub labels: Vec<LabelDefinition>,
}

/// Author of a pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct PrAuthor {
    pub login: String,
}

/// An issue comment on a pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueComment {
    pub id: u64,
    #[serde(default)]
    pub body: String,
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Abstraction over the PR host so the REST client can be swapped for a
/// test double (or another forge) without touching the pipeline.
#[async_trait]
pub trait PullRequestHost {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch PR metadata (number, title, author, attached labels).
    async fn get_pull_request(&self, number: u64) -> Result<PullRequestInfo, Self::Error>;

    /// List the files changed in a pull request.
    async fn list_changed_files(&self, number: u64) -> Result<Vec<ChangedFile>, Self::Error>;

    /// List the names of the labels attached to a PR.
    async fn list_attached_labels(&self, number: u64) -> Result<Vec<String>, Self::Error>;

    /// Attach a label to a PR.
    async fn add_label(&self, number: u64, name: &str) -> Result<(), Self::Error>;

    /// Detach a label from a PR.
    async fn remove_label(&self, number: u64, name: &str) -> Result<(), Self::Error>;

    /// List every label definition in the repository.
    async fn list_label_definitions(&self) -> Result<Vec<LabelDefinition>, Self::Error>;

    /// Create a repository label definition.
    async fn create_label(&self, spec: &LabelSpec) -> Result<(), Self::Error>;

    /// Patch a repository label definition's color and description.
    async fn update_label(&self, spec: &LabelSpec) -> Result<(), Self::Error>;

    /// List the issue comments on a PR.
    async fn list_comments(&self, number: u64) -> Result<Vec<IssueComment>, Self::Error>;

    /// Create an issue comment; returns the new comment's id.
    async fn create_comment(&self, number: u64, body: &str) -> Result<u64, Self::Error>;

    /// Replace the body of an existing issue comment.
    async fn update_comment(&self, comment_id: u64, body: &str) -> Result<(), Self::Error>;
}

// ---------------------------------------------------------------------------
// GitHubApi
// ---------------------------------------------------------------------------

const API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("reviewbot/", env!("CARGO_PKG_VERSION"));

/// [`PullRequestHost`] backed by the GitHub REST API.
pub struct GitHubApi {
    http: reqwest::Client,
    base_url: String,
    repo: String,
    token: String,
}

impl GitHubApi {
    pub fn new(repo: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: API_BASE.to_owned(),
            repo: repo.into(),
            token: token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/repos/{}{}", self.base_url, self.repo, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, GithubError> {
        let response = request
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/vnd.github+json")
            .header(header::USER_AGENT, USER_AGENT)
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GithubError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl PullRequestHost for GitHubApi {
    type Error = GithubError;

    async fn get_pull_request(&self, number: u64) -> Result<PullRequestInfo, GithubError> {
        let url = self.url(&format!("/pulls/{number}"));
        let response = self.send(self.http.get(url)).await?;
        Ok(response.json().await?)
    }

    async fn list_changed_files(&self, number: u64) -> Result<Vec<ChangedFile>, GithubError> {
        let url = self.url(&format!("/pulls/{number}/files?per_page=100"));
        let response = self.send(self.http.get(url)).await?;
        Ok(response.json().await?)
    }

    async fn list_attached_labels(&self, number: u64) -> Result<Vec<String>, GithubError> {
        let url = self.url(&format!("/issues/{number}/labels?per_page=100"));
        let response = self.send(self.http.get(url)).await?;
        let labels: Vec<LabelDefinition> = response.json().await?;
        Ok(labels.into_iter().map(|label| label.name).collect())
    }

    async fn add_label(&self, number: u64, name: &str) -> Result<(), GithubError> {
        let url = self.url(&format!("/issues/{number}/labels"));
        let body = json!({ "labels": [name] });
        self.send(self.http.post(url).json(&body)).await?;
        Ok(())
    }

    async fn remove_label(&self, number: u64, name: &str) -> Result<(), GithubError> {
        let encoded = urlencoding::encode(name);
        let url = self.url(&format!("/issues/{number}/labels/{encoded}"));
        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    async fn list_label_definitions(&self) -> Result<Vec<LabelDefinition>, GithubError> {
        let url = self.url("/labels?per_page=100");
        let response = self.send(self.http.get(url)).await?;
        Ok(response.json().await?)
    }

    async fn create_label(&self, spec: &LabelSpec) -> Result<(), GithubError> {
        let url = self.url("/labels");
        let body = json!({
            "name": spec.name,
            "color": spec.color,
            "description": spec.description,
        });
        self.send(self.http.post(url).json(&body)).await?;
        Ok(())
    }

    async fn update_label(&self, spec: &LabelSpec) -> Result<(), GithubError> {
        let encoded = urlencoding::encode(spec.name);
        let url = self.url(&format!("/labels/{encoded}"));
        let body = json!({
            "color": spec.color,
            "description": spec.description,
        });
        self.send(self.http.patch(url).json(&body)).await?;
        Ok(())
    }

    async fn list_comments(&self, number: u64) -> Result<Vec<IssueComment>, GithubError> {
        let url = self.url(&format!("/issues/{number}/comments?per_page=100"));
        let response = self.send(self.http.get(url)).await?;
        Ok(response.json().await?)
    }

    async fn create_comment(&self, number: u64, body: &str) -> Result<u64, GithubError> {
        #[derive(Deserialize)]
        struct Created {
            id: u64,
        }

        let url = self.url(&format!("/issues/{number}/comments"));
        let payload = json!({ "body": body });
        let response = self.send(self.http.post(url).json(&payload)).await?;
        let created: Created = response.json().await?;
        Ok(created.id)
    }

    async fn update_comment(&self, comment_id: u64, body: &str) -> Result<(), GithubError> {
        let url = self.url(&format!("/issues/comments/{comment_id}"));
        let payload = json!({ "body": body });
        self.send(self.http.patch(url).json(&payload)).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum GithubError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("GitHub returned status {status}: {body}")]
    Status { status: u16, body: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_request_info_deserializes() {
        let raw = r#"{
            "number": 12,
            "title": "Add widget cache",
            "user": {"login": "octocat"},
            "labels": [{"name": "bug", "color": "d73a4a", "description": null}]
        }"#;
        let info: PullRequestInfo = serde_json::from_str(raw).unwrap();
        assert_eq!(info.number, 12);
        assert_eq!(info.user.login, "octocat");
        assert_eq!(info.labels[0].name, "bug");
        assert!(info.labels[0].description.is_none());
    }

    #[test]
    fn test_url_joins_repo_path() {
        let api = GitHubApi::new("octo/widgets", "token");
        assert_eq!(
            api.url("/issues/3/labels"),
            "https://api.github.com/repos/octo/widgets/issues/3/labels"
        );
    }

    #[test]
    fn test_label_names_are_path_encoded() {
        assert_eq!(urlencoding::encode("changes requested"), "changes%20requested");
    }
}
