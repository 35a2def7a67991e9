//! Two-state review label reconciliation.
//!
//! Two canonical labels exist: "changes requested" and "ready for
//! review". After reconciliation at most one of them is attached to a
//! PR, matching the run's outcome. Repository-level label definitions
//! (color, description) converge toward the canonical values on every
//! run, independently of what is attached.
//!
//! Planning is pure — `plan_attachment` and `plan_definition` take
//! snapshots and return operations — so idempotence and mutual exclusion
//! are testable without a host.

use crate::github::PullRequestHost;
use serde::Deserialize;

/// Canonical identity of a managed label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelSpec {
    pub name: &'static str,
    /// 6 hex digits, no leading `#`.
    pub color: &'static str,
    pub description: &'static str,
}

/// Attached while the latest review has findings.
pub const CHANGES_REQUESTED: LabelSpec = LabelSpec {
    name: "changes requested",
    color: "f9d71c",
    description: "Automated review flagged items that need attention",
};

/// Attached while the latest review is clean.
pub const READY_FOR_REVIEW: LabelSpec = LabelSpec {
    name: "ready for review",
    color: "28a745",
    description: "Automated review found no blocking issues",
};

/// A repository label definition, as returned by the labels endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelDefinition {
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One attachment operation against a PR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelOp {
    Attach(&'static str),
    Detach(&'static str),
}

/// What to do about one repository label definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionAction {
    Noop,
    Create,
    Update,
}

/// Compute the attachment operations that move `attached` to the target
/// state for `has_findings`. Membership is case-insensitive; each
/// operation is independently conditional, so an already-converged state
/// yields an empty plan.
pub fn plan_attachment(has_findings: bool, attached: &[String]) -> Vec<LabelOp> {
    let is_attached =
        |name: &str| attached.iter().any(|label| label.eq_ignore_ascii_case(name));

    let (wanted, unwanted) = if has_findings {
        (CHANGES_REQUESTED.name, READY_FOR_REVIEW.name)
    } else {
        (READY_FOR_REVIEW.name, CHANGES_REQUESTED.name)
    };

    let mut ops = Vec::new();
    if is_attached(unwanted) {
        ops.push(LabelOp::Detach(unwanted));
    }
    if !is_attached(wanted) {
        ops.push(LabelOp::Attach(wanted));
    }
    ops
}

/// Compare one existing definition (if any) against the canonical value.
/// Color comparison is case-insensitive.
pub fn plan_definition(existing: Option<&LabelDefinition>, desired: &LabelSpec) -> DefinitionAction {
    match existing {
        None => DefinitionAction::Create,
        Some(definition) => {
            let color_matches = definition.color.eq_ignore_ascii_case(desired.color);
            let description_matches =
                definition.description.as_deref() == Some(desired.description);
            if color_matches && description_matches {
                DefinitionAction::Noop
            } else {
                DefinitionAction::Update
            }
        }
    }
}

/// Reconcile the PR's attached labels with the review outcome and make
/// both canonical definitions converge.
///
/// Definition failures are warnings; attach/detach failures propagate to
/// the caller as run failures. Returns the applied attachment plan.
pub async fn reconcile_labels<H>(
    host: &H,
    pr_number: u64,
    has_findings: bool,
) -> Result<Vec<LabelOp>, H::Error>
where
    H: PullRequestHost + Sync,
{
    ensure_definitions(host).await;

    let attached = host.list_attached_labels(pr_number).await?;
    let plan = plan_attachment(has_findings, &attached);
    for op in &plan {
        match op {
            LabelOp::Attach(name) => host.add_label(pr_number, name).await?,
            LabelOp::Detach(name) => host.remove_label(pr_number, name).await?,
        }
    }
    Ok(plan)
}

/// Create or repair both canonical label definitions. Runs every time;
/// any failure here is logged and swallowed.
async fn ensure_definitions<H>(host: &H)
where
    H: PullRequestHost + Sync,
{
    let existing = match host.list_label_definitions().await {
        Ok(definitions) => definitions,
        Err(e) => {
            log::warn!("[labels] could not list label definitions: {e}");
            return;
        }
    };

    for spec in [&CHANGES_REQUESTED, &READY_FOR_REVIEW] {
        let current = existing
            .iter()
            .find(|definition| definition.name.eq_ignore_ascii_case(spec.name));
        let result = match plan_definition(current, spec) {
            DefinitionAction::Noop => continue,
            DefinitionAction::Create => host.create_label(spec).await,
            DefinitionAction::Update => host.update_label(spec).await,
        };
        if let Err(e) = result {
            log::warn!("[labels] could not ensure definition for '{}': {e}", spec.name);
        }
    }
}
