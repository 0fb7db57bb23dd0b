//! Identifiers for stored scan batches.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A unique identifier for one recorded scan.
///
/// Uses UUID v4 internally; the first eight characters serve as a short form
/// for lookups from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanId(Uuid);

impl ScanId {
    /// Length of the short display form.
    pub const SHORT_LEN: usize = 8;

    /// Generate a new random scan ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get a short representation (first 8 characters).
    pub fn short(&self) -> String {
        self.0.to_string()[..Self::SHORT_LEN].to_string()
    }

    /// Whether the textual form of this ID starts with `prefix`.
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        self.0.to_string().starts_with(&prefix.to_lowercase())
    }
}

impl Default for ScanId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ScanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ScanId {
    type Err = ScanIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 32 {
            return Err(ScanIdError::ShortFormNotSupported(s.to_string()));
        }

        let uuid = Uuid::parse_str(s).map_err(|_| ScanIdError::InvalidFormat(s.to_string()))?;
        Ok(Self(uuid))
    }
}

/// Error type for ScanId parsing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScanIdError {
    #[error("invalid scan ID format: {0}")]
    InvalidFormat(String),
    #[error("'{0}' is a short ID; look it up in the store instead")]
    ShortFormNotSupported(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_id_generation() {
        assert_ne!(ScanId::new(), ScanId::new());
    }

    #[test]
    fn test_scan_id_short() {
        let id = ScanId::new();
        assert_eq!(id.short().len(), ScanId::SHORT_LEN);
        assert!(id.matches_prefix(&id.short()));
        assert!(id.matches_prefix(&id.short().to_uppercase()));
    }

    #[test]
    fn test_scan_id_parse() {
        let id = ScanId::new();
        let parsed: ScanId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_short_form_rejected() {
        assert!(matches!(
            "abcd1234".parse::<ScanId>(),
            Err(ScanIdError::ShortFormNotSupported(_))
        ));
        assert!(matches!(
            "z".repeat(36).parse::<ScanId>(),
            Err(ScanIdError::InvalidFormat(_))
        ));
    }
}
