//! Core type definitions.
//!
//! Newtypes and enums that keep invalid states out of the scoring engine:
//! scores are always within 0-100, and "never scanned" is its own variant.

mod issue;
mod scan_id;
mod score;
mod severity;

pub use issue::{IssueAggregate, IssueRecord, IssueSummary};
pub use scan_id::{ScanId, ScanIdError};
pub use score::{AccessibilityScore, Score, ScoreError};
pub use severity::Severity;
