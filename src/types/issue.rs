//! Issue rows and their unresolved-issue aggregates.

use super::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single accessibility issue recorded by a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    /// Issue identifier, e.g. "missing-alt-text".
    pub issue_type: String,
    /// Severity reported by the scanner.
    #[serde(rename = "issue_severity")]
    pub severity: Severity,
    /// Whether the issue has since been resolved.
    #[serde(default)]
    pub fixed: bool,
    /// Page on which the issue was found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,
    /// Offending element or selector, if the scanner captured one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    /// When the scan that found this issue ran.
    #[serde(default = "Utc::now")]
    pub scanned_at: DateTime<Utc>,
}

impl IssueRecord {
    /// Create a new unresolved issue.
    pub fn new(
        issue_type: impl Into<String>,
        severity: impl Into<Severity>,
        scanned_at: DateTime<Utc>,
    ) -> Self {
        Self {
            issue_type: issue_type.into(),
            severity: severity.into(),
            fixed: false,
            page_url: None,
            element: None,
            scanned_at,
        }
    }

    /// Mark the issue as resolved.
    pub fn resolved(mut self) -> Self {
        self.fixed = true;
        self
    }
}

/// Count of unresolved issues sharing a type and severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueAggregate {
    pub issue_type: String,
    pub issue_severity: Severity,
    pub count: u64,
}

impl IssueAggregate {
    /// Penalty contributed by this group.
    pub fn penalty(&self) -> u64 {
        self.issue_severity.weight().saturating_mul(self.count)
    }
}

/// Unresolved issues grouped by `(issue_type, issue_severity)`.
///
/// Every entry has `count >= 1`; groups with no unresolved issues are never
/// present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<IssueAggregate>", into = "Vec<IssueAggregate>")]
pub struct IssueSummary(Vec<IssueAggregate>);

impl IssueSummary {
    /// Empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Group the unresolved rows in `records`.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a IssueRecord>,
    {
        let mut groups: BTreeMap<(&str, &Severity), u64> = BTreeMap::new();

        for record in records.into_iter().filter(|r| !r.fixed) {
            *groups
                .entry((record.issue_type.as_str(), &record.severity))
                .or_default() += 1;
        }

        Self(
            groups
                .into_iter()
                .map(|((issue_type, severity), count)| IssueAggregate {
                    issue_type: issue_type.to_string(),
                    issue_severity: severity.clone(),
                    count,
                })
                .collect(),
        )
    }

    /// Build from pre-aggregated groups, merging duplicates and dropping
    /// zero counts.
    pub fn from_aggregates<I>(aggregates: I) -> Self
    where
        I: IntoIterator<Item = IssueAggregate>,
    {
        let mut groups: BTreeMap<(String, Severity), u64> = BTreeMap::new();

        for agg in aggregates.into_iter().filter(|a| a.count > 0) {
            *groups.entry((agg.issue_type, agg.issue_severity)).or_default() += agg.count;
        }

        Self(
            groups
                .into_iter()
                .map(|((issue_type, issue_severity), count)| IssueAggregate {
                    issue_type,
                    issue_severity,
                    count,
                })
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct (type, severity) groups.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IssueAggregate> {
        self.0.iter()
    }

    /// Total number of unresolved issues across all groups.
    pub fn total_issues(&self) -> u64 {
        self.0.iter().map(|a| a.count).sum()
    }

    /// Unresolved issue count for a severity.
    pub fn count_for(&self, severity: &Severity) -> u64 {
        self.0
            .iter()
            .filter(|a| &a.issue_severity == severity)
            .map(|a| a.count)
            .sum()
    }

    /// Groups sorted by penalty contribution, heaviest first.
    pub fn by_penalty(&self) -> Vec<&IssueAggregate> {
        let mut sorted: Vec<_> = self.0.iter().collect();
        sorted.sort_by(|a, b| {
            b.penalty()
                .cmp(&a.penalty())
                .then_with(|| a.issue_type.cmp(&b.issue_type))
        });
        sorted
    }
}

impl From<Vec<IssueAggregate>> for IssueSummary {
    fn from(aggregates: Vec<IssueAggregate>) -> Self {
        Self::from_aggregates(aggregates)
    }
}

impl From<IssueSummary> for Vec<IssueAggregate> {
    fn from(summary: IssueSummary) -> Self {
        summary.0
    }
}

impl<'a> IntoIterator for &'a IssueSummary {
    type Item = &'a IssueAggregate;
    type IntoIter = std::slice::Iter<'a, IssueAggregate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
