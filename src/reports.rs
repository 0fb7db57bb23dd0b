//! Read-only reporting facade.
//!
//! `ReportsFacade` owns an injected [`IssueStore`] and answers the queries an
//! admin screen or API needs: issue summary, last scan date, score and
//! compliance tier. It never writes to the store.

use crate::error::ReportResult;
use crate::scoring::{
    calculate_score, total_penalty, ComplianceAssessment, ComplianceClassifier, ThresholdTable,
};
use crate::storage::IssueStore;
use crate::types::{AccessibilityScore, IssueSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything a report needs, computed in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSnapshot {
    /// When this snapshot was computed.
    pub generated_at: DateTime<Utc>,
    /// Current score, `null` if no scan has run.
    pub score: AccessibilityScore,
    /// Compliance tier, absent if no scan has run.
    pub compliance: Option<ComplianceAssessment>,
    /// Threshold table the tier was chosen with.
    pub thresholds: ThresholdTable,
    /// Total penalty behind the score.
    pub total_penalty: u64,
    /// Most recent scan timestamp.
    pub last_scan: Option<DateTime<Utc>>,
    /// Unresolved issues by type and severity.
    pub summary: IssueSummary,
}

/// Reporting queries over an issue store.
#[derive(Debug, Clone)]
pub struct ReportsFacade<S> {
    store: S,
    classifier: ComplianceClassifier,
}

impl<S: IssueStore> ReportsFacade<S> {
    /// Create a facade using the standard threshold table.
    pub fn new(store: S) -> Self {
        Self {
            store,
            classifier: ComplianceClassifier::default(),
        }
    }

    /// Use a different threshold table for compliance tiers.
    pub fn with_thresholds(mut self, table: ThresholdTable) -> Self {
        self.classifier = ComplianceClassifier::new(table);
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Unresolved issues grouped by type and severity. Empty when the store
    /// has not been provisioned.
    pub fn get_issue_summary(&self) -> ReportResult<IssueSummary> {
        if !self.store.exists()? {
            return Ok(IssueSummary::new());
        }

        Ok(self.store.unresolved_summary()?)
    }

    /// Timestamp of the most recent scan, fixed rows included.
    pub fn get_last_scan_date(&self) -> ReportResult<Option<DateTime<Utc>>> {
        if !self.store.exists()? {
            return Ok(None);
        }

        Ok(self.store.max_scan_timestamp()?)
    }

    /// Current accessibility score.
    pub fn calculate_accessibility_score(&self) -> ReportResult<AccessibilityScore> {
        Ok(calculate_score(&self.store)?)
    }

    /// Compliance tier for the current score.
    pub fn calculate_compliance_assessment(&self) -> ReportResult<Option<ComplianceAssessment>> {
        let score = self.calculate_accessibility_score()?;
        Ok(self.classifier.classify(score))
    }

    /// Alias of [`Self::calculate_accessibility_score`].
    pub fn get_score(&self) -> ReportResult<AccessibilityScore> {
        self.calculate_accessibility_score()
    }

    /// Alias of [`Self::calculate_compliance_assessment`].
    pub fn get_compliance(&self) -> ReportResult<Option<ComplianceAssessment>> {
        self.calculate_compliance_assessment()
    }

    /// Compute score, tier, summary and last scan date together.
    pub fn snapshot(&self) -> ReportResult<ReportSnapshot> {
        let score = self.calculate_accessibility_score()?;
        let summary = self.get_issue_summary()?;
        let last_scan = self.get_last_scan_date()?;

        let snapshot = ReportSnapshot {
            generated_at: Utc::now(),
            score,
            compliance: self.classifier.classify(score),
            thresholds: self.classifier.table(),
            total_penalty: total_penalty(&summary),
            last_scan,
            summary,
        };

        debug!(score = %snapshot.score, groups = snapshot.summary.len(), "built report snapshot");
        Ok(snapshot)
    }
}
