//! Issue severity levels and their penalty weights.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Severity attached to an accessibility issue.
///
/// Scanners may emit severities outside the four known levels. Those are
/// preserved verbatim in [`Severity::Other`] and weighted like `low`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Other(String),
}

impl Severity {
    /// Penalty applied per unresolved issue of this severity.
    pub const fn weight(&self) -> u64 {
        match self {
            Self::Critical => 10,
            Self::High => 5,
            Self::Medium => 3,
            Self::Low | Self::Other(_) => 1,
        }
    }

    /// Lowercase identifier as stored by the scanner.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Other(s) => s,
        }
    }

    /// Whether this is one of the four recognised levels.
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl From<String> for Severity {
    fn from(s: String) -> Self {
        let key = s.trim().to_lowercase();
        match key.as_str() {
            "critical" => Self::Critical,
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for Severity {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}
