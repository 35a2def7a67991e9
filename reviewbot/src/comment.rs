//! Synchronized review comment.
//!
//! One comment per PR: bodies carry a hidden marker, and publishing
//! updates the existing marker comment in place instead of stacking a
//! new comment on every run.

use crate::github::PullRequestHost;

/// Hidden marker identifying the bot's synchronized comment.
pub const SYNC_MARKER: &str = "<!-- reviewbot:sync -->";

/// What publishing did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentAction {
    Created(u64),
    Updated(u64),
}

/// Prefix a review body with the sync marker.
pub fn marked_body(body: &str) -> String {
    format!("{SYNC_MARKER}\n{body}")
}

/// Publish `body` as the PR's single synchronized comment: update the
/// first marker comment when one exists, create one otherwise.
pub async fn publish_comment<H>(
    host: &H,
    pr_number: u64,
    body: &str,
) -> Result<CommentAction, H::Error>
where
    H: PullRequestHost + Sync,
{
    let full = marked_body(body);
    let comments = host.list_comments(pr_number).await?;

    if let Some(existing) = comments.iter().find(|c| c.body.contains(SYNC_MARKER)) {
        host.update_comment(existing.id, &full).await?;
        return Ok(CommentAction::Updated(existing.id));
    }

    let id = host.create_comment(pr_number, &full).await?;
    Ok(CommentAction::Created(id))
}

/// Like [`publish_comment`], but when the synchronized path fails, try
/// one plain create call before reporting the failure.
pub async fn publish_with_fallback<H>(
    host: &H,
    pr_number: u64,
    body: &str,
) -> Result<CommentAction, H::Error>
where
    H: PullRequestHost + Sync,
{
    match publish_comment(host, pr_number, body).await {
        Ok(action) => Ok(action),
        Err(e) => {
            log::warn!("[comment] synchronized publish failed, attempting direct create: {e}");
            let id = host.create_comment(pr_number, &marked_body(body)).await?;
            Ok(CommentAction::Created(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marked_body_carries_marker() {
        let body = marked_body("### Findings\n1. something");
        assert!(body.starts_with(SYNC_MARKER));
        assert!(body.contains("### Findings"));
    }

    #[test]
    fn test_marker_is_invisible_html_comment() {
        assert!(SYNC_MARKER.starts_with("<!--"));
        assert!(SYNC_MARKER.ends_with("-->"));
    }
}
