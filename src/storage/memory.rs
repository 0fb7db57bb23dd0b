//! In-process issue store.

use super::IssueStore;
use crate::error::StoreResult;
use crate::types::{IssueRecord, IssueSummary};
use chrono::{DateTime, Utc};

/// Issue store held entirely in memory.
///
/// Useful for embedding the engine behind another persistence layer and for
/// tests. `None` models a store that has never been provisioned.
#[derive(Debug, Clone, Default)]
pub struct MemoryIssueStore {
    records: Option<Vec<IssueRecord>>,
}

impl MemoryIssueStore {
    /// A store that does not exist yet.
    pub fn unprovisioned() -> Self {
        Self { records: None }
    }

    /// A provisioned store with no rows.
    pub fn empty() -> Self {
        Self {
            records: Some(Vec::new()),
        }
    }

    /// A provisioned store holding `records`.
    pub fn with_records(records: impl IntoIterator<Item = IssueRecord>) -> Self {
        Self {
            records: Some(records.into_iter().collect()),
        }
    }

    /// Append a row, provisioning the store if needed.
    pub fn push(&mut self, record: IssueRecord) {
        self.records.get_or_insert_with(Vec::new).push(record);
    }

    /// Rows currently held, empty if unprovisioned.
    pub fn records(&self) -> &[IssueRecord] {
        self.records.as_deref().unwrap_or_default()
    }
}

impl IssueStore for MemoryIssueStore {
    fn exists(&self) -> StoreResult<bool> {
        Ok(self.records.is_some())
    }

    fn total_row_count(&self) -> StoreResult<u64> {
        Ok(self.records().len() as u64)
    }

    fn unresolved_summary(&self) -> StoreResult<IssueSummary> {
        Ok(IssueSummary::from_records(self.records()))
    }

    fn max_scan_timestamp(&self) -> StoreResult<Option<DateTime<Utc>>> {
        Ok(self.records().iter().map(|r| r.scanned_at).max())
    }
}
