//! Compliance tiers derived from the accessibility score.
//!
//! Two threshold tables exist. [`ThresholdTable::Standard`] (90/70/50) is the
//! canonical classification. [`ThresholdTable::Display`] (95/85/70) matches
//! the stricter labels shown next to WCAG/ADA/EAA badges and is kept as a
//! separate, opt-in table rather than blended into the standard one.

use crate::types::{AccessibilityScore, Score};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compliance tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceLevel {
    Excellent,
    Good,
    /// Third tier of the standard table.
    NeedsWork,
    /// Third tier of the display table.
    NeedsImprovement,
    Poor,
}

impl ComplianceLevel {
    /// Machine identifier, e.g. `needs-work`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::NeedsWork => "needs-work",
            Self::NeedsImprovement => "needs-improvement",
            Self::Poor => "poor",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::NeedsWork => "Needs Work",
            Self::NeedsImprovement => "Needs Improvement",
            Self::Poor => "Poor",
        }
    }

    /// One-sentence description of the tier.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Excellent => "Your site meets high accessibility standards.",
            Self::Good => "Your site has good accessibility with some areas for improvement.",
            Self::NeedsWork => "Your site has accessibility issues that should be addressed.",
            Self::NeedsImprovement => {
                "Your site falls short of full compliance and needs improvement."
            }
            Self::Poor => "Your site has significant accessibility issues requiring attention.",
        }
    }
}

impl fmt::Display for ComplianceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score thresholds used to pick a tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdTable {
    /// >=90 excellent, >=70 good, >=50 needs work, else poor.
    #[default]
    Standard,
    /// >=95 excellent, >=85 good, >=70 needs improvement, else poor.
    Display,
}

impl ThresholdTable {
    /// Lower bounds, evaluated high to low. The first bound the score reaches
    /// wins; scores below every bound are `Poor`.
    pub const fn bounds(self) -> [(u8, ComplianceLevel); 3] {
        match self {
            Self::Standard => [
                (90, ComplianceLevel::Excellent),
                (70, ComplianceLevel::Good),
                (50, ComplianceLevel::NeedsWork),
            ],
            Self::Display => [
                (95, ComplianceLevel::Excellent),
                (85, ComplianceLevel::Good),
                (70, ComplianceLevel::NeedsImprovement),
            ],
        }
    }

    /// Tier for a score under this table.
    pub fn level_for(self, score: Score) -> ComplianceLevel {
        self.bounds()
            .into_iter()
            .find(|(min, _)| score.value() >= *min)
            .map_or(ComplianceLevel::Poor, |(_, level)| level)
    }
}

impl fmt::Display for ThresholdTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Display => write!(f, "display"),
        }
    }
}

/// Tier assigned to a score, with its label and description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceAssessment {
    pub level: ComplianceLevel,
    pub label: String,
    pub description: String,
}

impl From<ComplianceLevel> for ComplianceAssessment {
    fn from(level: ComplianceLevel) -> Self {
        Self {
            level,
            label: level.label().to_string(),
            description: level.description().to_string(),
        }
    }
}

/// Maps scores to compliance assessments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComplianceClassifier {
    table: ThresholdTable,
}

impl ComplianceClassifier {
    pub const fn new(table: ThresholdTable) -> Self {
        Self { table }
    }

    pub const fn table(&self) -> ThresholdTable {
        self.table
    }

    /// Assess a score. Returns `None` when no score is available.
    pub fn classify(&self, score: AccessibilityScore) -> Option<ComplianceAssessment> {
        score
            .score()
            .map(|s| ComplianceAssessment::from(self.table.level_for(s)))
    }
}

/// Assess a score with the standard thresholds.
pub fn classify(score: AccessibilityScore) -> Option<ComplianceAssessment> {
    ComplianceClassifier::default().classify(score)
}
