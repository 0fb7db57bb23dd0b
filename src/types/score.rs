//! Accessibility score types.
//!
//! `Score` is a validated 0-100 value. `AccessibilityScore` adds the
//! "unavailable" state used before any scan has been recorded, so callers
//! can never confuse "never scanned" with "scanned, nothing wrong".

use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated accessibility score (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
    /// Highest possible score, also the baseline before penalties.
    pub const MAX: u8 = 100;

    /// A perfect score.
    pub const PERFECT: Score = Score(Self::MAX);

    /// Create a new Score, returning None if above 100.
    #[inline]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Subtract a penalty from the baseline, clamping at zero.
    pub fn from_penalty(penalty: u64) -> Self {
        let remaining = u64::from(Self::MAX).saturating_sub(penalty);
        // remaining <= 100, always fits
        Self(remaining as u8)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Score {
    type Error = ScoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ScoreError::OutOfRange(value))
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

/// Error type for score validation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScoreError {
    #[error("score {0} is out of valid range (0-100)")]
    OutOfRange(u8),
}

/// Outcome of scoring a site.
///
/// Serializes as `null` when unavailable and as a bare integer otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccessibilityScore {
    /// No scan has ever been recorded.
    Unavailable,
    /// A scan has been recorded.
    Scored(Score),
}

impl AccessibilityScore {
    /// The score, if one is available.
    pub const fn score(self) -> Option<Score> {
        match self {
            Self::Unavailable => None,
            Self::Scored(score) => Some(score),
        }
    }
}

impl From<Score> for AccessibilityScore {
    fn from(score: Score) -> Self {
        Self::Scored(score)
    }
}

impl fmt::Display for AccessibilityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "unavailable"),
            Self::Scored(score) => write!(f, "{}", score),
        }
    }
}
