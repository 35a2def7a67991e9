//! Rule-based review fallback.
//!
//! Scans added lines for simple risk signals — oversized additions, TODO
//! markers, stray console.log calls — and renders the deduplicated
//! findings as a Markdown block. All rules are cheap substring checks on
//! the raw patch text; this is intentionally not hunk-aware diff parsing,
//! so a `+` anywhere at the start of a line counts as an addition.

use crate::diff::{ChangedFile, FileStatus};
use std::collections::HashSet;
use std::fmt::Write;

/// A file with more added lines than this triggers a large-change finding.
pub const LARGE_CHANGE_THRESHOLD: usize = 400;

const TODO_MARKER: &str = "TODO";
const DEBUG_PRINT_CALL: &str = "console.log";

/// Fixed message rendered when no rule fires.
pub const NO_FINDINGS_MESSAGE: &str = "✅ No issues found by the automated checks.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindingCategory {
    LargeChange,
    TodoMarker,
    DebugPrint,
}

impl FindingCategory {
    /// Category-specific advice appended under each rendered finding.
    pub fn suggestion(self) -> &'static str {
        match self {
            Self::LargeChange => {
                "Suggestion: consider splitting this into smaller, focused pull requests."
            }
            Self::TodoMarker => {
                "Suggestion: link the TODO to a tracked issue or resolve it before merging."
            }
            Self::DebugPrint => {
                "Suggestion: remove the console.log call or route it through the project's logger."
            }
        }
    }
}

/// A single heuristic-detected issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub category: FindingCategory,
    pub file: String,
    pub message: String,
}

/// Run every rule over the added and modified files.
///
/// One finding is emitted per matching line for the marker rules; callers
/// dedup with [`dedup_findings`] before rendering.
pub fn scan_files(files: &[ChangedFile]) -> Vec<Finding> {
    let mut findings = Vec::new();

    for file in files {
        if !matches!(file.status, FileStatus::Added | FileStatus::Modified) {
            continue;
        }
        let Some(patch) = file.patch.as_deref() else {
            continue;
        };

        let added: Vec<&str> = patch
            .lines()
            .filter(|line| line.starts_with('+') && !line.starts_with("+++"))
            .collect();

        if added.len() > LARGE_CHANGE_THRESHOLD {
            findings.push(Finding {
                category: FindingCategory::LargeChange,
                file: file.path.clone(),
                message: format!("`{}` has {} added lines", file.path, added.len()),
            });
        }

        for line in &added {
            if line.contains(TODO_MARKER) {
                findings.push(Finding {
                    category: FindingCategory::TodoMarker,
                    file: file.path.clone(),
                    message: format!("`{}` adds a line containing a TODO marker", file.path),
                });
            }
            if line.contains(DEBUG_PRINT_CALL) {
                findings.push(Finding {
                    category: FindingCategory::DebugPrint,
                    file: file.path.clone(),
                    message: format!("`{}` adds a console.log call", file.path),
                });
            }
        }
    }

    findings
}

/// Drop findings whose message exactly matches an earlier one.
/// First occurrence wins; relative order is preserved.
pub fn dedup_findings(findings: Vec<Finding>) -> Vec<Finding> {
    let mut seen = HashSet::new();
    findings
        .into_iter()
        .filter(|finding| seen.insert(finding.message.clone()))
        .collect()
}

/// Render deduplicated findings as a numbered Markdown list, each item
/// followed by its category's suggestion line.
pub fn render_findings(findings: &[Finding]) -> String {
    if findings.is_empty() {
        return NO_FINDINGS_MESSAGE.to_owned();
    }

    let mut out = String::from("### Automated review findings\n\n");
    for (index, finding) in findings.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", index + 1, finding.message);
        let _ = writeln!(out, "   {}", finding.category.suggestion());
    }
    out
}
