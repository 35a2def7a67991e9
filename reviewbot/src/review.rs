//! Review decision engine.
//!
//! Exactly one [`ReviewResult`] per run, chosen in strict priority order:
//! AI text when the model call succeeded, rendered heuristic findings
//! when it failed and the rules fired, and a fixed clean message
//! otherwise.

use crate::ai::{AiReview, Verdict};
use crate::heuristics::{render_findings, Finding, NO_FINDINGS_MESSAGE};
use std::fmt;

/// Case-insensitive phrases that mark an unstructured AI body as clean.
/// Substring sniffing over free-form prose is a compatibility fallback
/// for models that ignore the structured contract.
const CLEAN_PHRASES: [&str; 2] = ["no significant issues", "✅ no"];

/// Fixed body for the clean outcome of the AI-enabled pipeline.
pub const AI_UNAVAILABLE_CLEAN_BODY: &str = "✅ No significant issues found.\n\n\
_The AI reviewer was unavailable for this run and the heuristic checks raised no findings._";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewSource {
    Ai,
    Heuristic,
    Clean,
}

impl fmt::Display for ReviewSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ai => write!(f, "ai"),
            Self::Heuristic => write!(f, "heuristic"),
            Self::Clean => write!(f, "clean"),
        }
    }
}

/// The one review produced per run.
#[derive(Debug, Clone)]
pub struct ReviewResult {
    pub body: String,
    pub has_findings: bool,
    pub source: ReviewSource,
}

impl ReviewResult {
    /// Build a result from heuristic findings alone (the heuristic-only
    /// entry point; no AI was attempted).
    pub fn from_findings(findings: &[Finding]) -> Self {
        if findings.is_empty() {
            ReviewResult {
                body: NO_FINDINGS_MESSAGE.to_owned(),
                has_findings: false,
                source: ReviewSource::Clean,
            }
        } else {
            ReviewResult {
                body: render_findings(findings),
                has_findings: true,
                source: ReviewSource::Heuristic,
            }
        }
    }
}

/// Decide the run's outcome from the AI attempt and the (deduplicated)
/// heuristic findings.
pub fn decide(ai: Option<AiReview>, findings: &[Finding]) -> ReviewResult {
    if let Some(review) = ai {
        let has_findings = match review.verdict {
            Some(Verdict::Findings) => true,
            Some(Verdict::Clean) => false,
            None => !body_reads_clean(&review.body),
        };
        return ReviewResult {
            body: review.body,
            has_findings,
            source: ReviewSource::Ai,
        };
    }

    if !findings.is_empty() {
        return ReviewResult {
            body: render_findings(findings),
            has_findings: true,
            source: ReviewSource::Heuristic,
        };
    }

    ReviewResult {
        body: AI_UNAVAILABLE_CLEAN_BODY.to_owned(),
        has_findings: false,
        source: ReviewSource::Clean,
    }
}

fn body_reads_clean(body: &str) -> bool {
    let lower = body.to_lowercase();
    CLEAN_PHRASES.iter().any(|phrase| lower.contains(phrase))
}
