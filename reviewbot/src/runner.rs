//! The single-pass review pipeline.
//!
//! Two entry points share the publish/reconcile tail: the AI-enabled run
//! (model first, heuristics as fallback) and the heuristic-only run.
//! Every external call is awaited to completion before the next one
//! starts; nothing is retried. No wall-clock budget is imposed on the
//! model call beyond the HTTP client's defaults — a future revision
//! should add one so a hanging endpoint cannot stall the run.

use crate::ai::ReviewModel;
use crate::comment::{publish_comment, publish_with_fallback};
use crate::diff::aggregate_diff;
use crate::error::AppError;
use crate::github::PullRequestHost;
use crate::heuristics::{dedup_findings, scan_files};
use crate::labels::reconcile_labels;
use crate::review::{decide, ReviewResult};

/// Run the AI-enabled review for one PR.
///
/// A failed or empty model call downgrades to the heuristic rules; a
/// failed comment publish or label attach/detach is a run failure.
pub async fn run_ai_review<H, M>(
    host: &H,
    pr_number: u64,
    model: &M,
    template: &str,
) -> Result<ReviewResult, AppError>
where
    H: PullRequestHost + Sync,
    M: ReviewModel + Sync,
{
    let files = host
        .list_changed_files(pr_number)
        .await
        .map_err(|e| AppError::github(e.to_string(), "list-files"))?;
    println!("Fetched {} changed file(s)", files.len());

    let diff = aggregate_diff(&files);

    let ai = match model.review(template, &diff).await {
        Ok(review) => Some(review),
        Err(e) => {
            log::warn!("[runner] AI review unavailable, falling back to heuristics: {e}");
            println!("AI review unavailable, falling back to heuristics");
            None
        }
    };

    let result = if ai.is_some() {
        decide(ai, &[])
    } else {
        let findings = dedup_findings(scan_files(&files));
        decide(None, &findings)
    };

    publish_comment(host, pr_number, &result.body)
        .await
        .map_err(|e| AppError::github(e.to_string(), "publish-comment"))?;

    reconcile_labels(host, pr_number, result.has_findings)
        .await
        .map_err(|e| AppError::github(e.to_string(), "reconcile-labels"))?;

    Ok(result)
}

/// Run the heuristic-only review for one PR.
///
/// Comment publishing is best-effort here (one fallback attempt, then
/// log and continue); label reconciliation still runs and its
/// attach/detach failures propagate.
pub async fn run_heuristic_review<H>(host: &H, pr_number: u64) -> Result<ReviewResult, AppError>
where
    H: PullRequestHost + Sync,
{
    let files = host
        .list_changed_files(pr_number)
        .await
        .map_err(|e| AppError::github(e.to_string(), "list-files"))?;
    println!("Fetched {} changed file(s)", files.len());

    let findings = dedup_findings(scan_files(&files));
    let result = ReviewResult::from_findings(&findings);

    if let Err(e) = publish_with_fallback(host, pr_number, &result.body).await {
        log::warn!("[runner] comment publish failed, continuing to label sync: {e}");
        println!("Comment publish failed, continuing to label sync");
    }

    reconcile_labels(host, pr_number, result.has_findings)
        .await
        .map_err(|e| AppError::github(e.to_string(), "reconcile-labels"))?;

    Ok(result)
}
