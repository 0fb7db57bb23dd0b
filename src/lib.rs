//! # a11y-reports - Accessibility Scoring and Compliance Reports
//!
//! Scores a site's accessibility from the issues its scans recorded and
//! classifies the result into a compliance tier.
//!
//! ## Scoring
//!
//! Every site starts at 100. Each unresolved issue subtracts the weight of
//! its severity:
//!
//! | severity | weight |
//! |----------|--------|
//! | critical | 10     |
//! | high     | 5      |
//! | medium   | 3      |
//! | low      | 1      |
//! | other    | 1      |
//!
//! The score never drops below 0. A store that was never provisioned, or
//! that holds no rows, yields [`AccessibilityScore::Unavailable`] rather than
//! a number.
//!
//! ## Example Usage
//!
//! ```rust
//! use a11y_reports::storage::MemoryIssueStore;
//! use a11y_reports::types::IssueRecord;
//! use a11y_reports::ReportsFacade;
//! use chrono::Utc;
//!
//! let store = MemoryIssueStore::with_records(vec![
//!     IssueRecord::new("missing-alt-text", "critical", Utc::now()),
//!     IssueRecord::new("low-contrast", "medium", Utc::now()),
//! ]);
//! let reports = ReportsFacade::new(store);
//!
//! let score = reports.get_score().unwrap();
//! assert_eq!(score.to_string(), "87");
//!
//! let tier = reports.get_compliance().unwrap().unwrap();
//! assert_eq!(tier.label, "Good");
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Scores, severities and issue records
//! - [`storage`] - The `IssueStore` trait plus JSON-file and in-memory stores
//! - [`scoring`] - Score calculation and compliance classification
//! - [`reports`] - Read-only facade over an injected store
//! - [`cache`] - Caller-side snapshot cache
//! - [`config`] - Paths and typed settings
//! - [`output`] - Plain, JSON and CSV renderings
//! - [`error`] - Error types

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod reports;
pub mod scoring;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ReportError, StoreError};
pub use reports::{ReportSnapshot, ReportsFacade};
pub use scoring::{ComplianceAssessment, ComplianceClassifier, ComplianceLevel, ThresholdTable};
pub use storage::{IssueStore, JsonIssueStore, MemoryIssueStore};
pub use types::{AccessibilityScore, IssueAggregate, IssueRecord, IssueSummary, Score, Severity};
