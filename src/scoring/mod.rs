//! Accessibility scoring and compliance classification.
//!
//! [`calculate_score`] turns the unresolved issues in a store into a 0-100
//! score; [`ComplianceClassifier`] buckets that score into a tier. Both are
//! pure reads with no caching.

mod calculator;
mod compliance;

pub use calculator::{calculate_score, score_summary, total_penalty};
pub use compliance::{
    classify, ComplianceAssessment, ComplianceClassifier, ComplianceLevel, ThresholdTable,
};
