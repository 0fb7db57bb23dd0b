//! Severity-weighted accessibility score.
//!
//! Every site starts at 100. Each unresolved issue subtracts the weight of
//! its severity (critical 10, high 5, medium 3, low 1, anything else 1) and
//! the result is clamped at zero.

use crate::error::StoreResult;
use crate::storage::IssueStore;
use crate::types::{AccessibilityScore, IssueSummary, Score};
use tracing::debug;

/// Total penalty for a summary of unresolved issues.
pub fn total_penalty(summary: &IssueSummary) -> u64 {
    summary
        .iter()
        .fold(0u64, |acc, agg| acc.saturating_add(agg.penalty()))
}

/// Score a summary of unresolved issues.
///
/// An empty summary scores 100.
pub fn score_summary(summary: &IssueSummary) -> Score {
    Score::from_penalty(total_penalty(summary))
}

/// Compute the current score from an issue store.
///
/// Returns [`AccessibilityScore::Unavailable`] when the store has never been
/// provisioned or holds no rows at all, since either way no scan has run.
/// Store failures propagate as errors.
pub fn calculate_score<S: IssueStore + ?Sized>(store: &S) -> StoreResult<AccessibilityScore> {
    if !store.exists()? {
        debug!("issue store not provisioned, score unavailable");
        return Ok(AccessibilityScore::Unavailable);
    }

    if store.total_row_count()? == 0 {
        debug!("issue store empty, score unavailable");
        return Ok(AccessibilityScore::Unavailable);
    }

    let summary = store.unresolved_summary()?;
    let penalty = total_penalty(&summary);
    let score = Score::from_penalty(penalty);

    debug!(
        groups = summary.len(),
        unresolved = summary.total_issues(),
        penalty,
        score = score.value(),
        "calculated accessibility score"
    );

    Ok(AccessibilityScore::Scored(score))
}
