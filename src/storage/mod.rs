//! Issue record storage.
//!
//! The scoring engine only ever reads through [`IssueStore`]. Concrete stores
//! are injected by the caller; nothing in the engine reaches for a global
//! handle.

mod json_store;
mod memory;

pub use json_store::{JsonIssueStore, ScanBatch, StorageStats};
pub use memory::MemoryIssueStore;

use crate::error::StoreResult;
use crate::types::IssueSummary;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Read interface the scoring engine consumes.
///
/// Implementations report infrastructure failures as errors. A store that
/// simply has not been provisioned yet is not a failure: it answers
/// `exists() == Ok(false)`.
pub trait IssueStore {
    /// Whether the store has been provisioned.
    fn exists(&self) -> StoreResult<bool>;

    /// Total issues ever recorded, fixed or not.
    fn total_row_count(&self) -> StoreResult<u64>;

    /// Unresolved issues grouped by type and severity.
    fn unresolved_summary(&self) -> StoreResult<IssueSummary>;

    /// Latest scan timestamp across all rows, fixed or not.
    fn max_scan_timestamp(&self) -> StoreResult<Option<DateTime<Utc>>>;
}

impl<S: IssueStore + ?Sized> IssueStore for &S {
    fn exists(&self) -> StoreResult<bool> {
        (**self).exists()
    }

    fn total_row_count(&self) -> StoreResult<u64> {
        (**self).total_row_count()
    }

    fn unresolved_summary(&self) -> StoreResult<IssueSummary> {
        (**self).unresolved_summary()
    }

    fn max_scan_timestamp(&self) -> StoreResult<Option<DateTime<Utc>>> {
        (**self).max_scan_timestamp()
    }
}

impl<S: IssueStore + ?Sized> IssueStore for Arc<S> {
    fn exists(&self) -> StoreResult<bool> {
        (**self).exists()
    }

    fn total_row_count(&self) -> StoreResult<u64> {
        (**self).total_row_count()
    }

    fn unresolved_summary(&self) -> StoreResult<IssueSummary> {
        (**self).unresolved_summary()
    }

    fn max_scan_timestamp(&self) -> StoreResult<Option<DateTime<Utc>>> {
        (**self).max_scan_timestamp()
    }
}

impl<S: IssueStore + ?Sized> IssueStore for Box<S> {
    fn exists(&self) -> StoreResult<bool> {
        (**self).exists()
    }

    fn total_row_count(&self) -> StoreResult<u64> {
        (**self).total_row_count()
    }

    fn unresolved_summary(&self) -> StoreResult<IssueSummary> {
        (**self).unresolved_summary()
    }

    fn max_scan_timestamp(&self) -> StoreResult<Option<DateTime<Utc>>> {
        (**self).max_scan_timestamp()
    }
}
