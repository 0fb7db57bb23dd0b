//! Error types for a11y-reports.
//!
//! Uses `thiserror` for ergonomic error definitions. Store failures are kept
//! apart from the "no scan yet" state, which is not an error at all.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by an issue store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store directory error: {0}")]
    DirectoryError(String),

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("corrupt scan record {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("failed to save scan: {0}")]
    SaveFailed(String),

    #[error("scan not found: {0}")]
    ScanNotFound(String),

    #[error("ambiguous prefix '{prefix}': {matches} matches")]
    AmbiguousPrefix { prefix: String, matches: usize },

    #[error("store has not been provisioned")]
    NotProvisioned,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while loading or saving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("invalid configuration format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors surfaced by the reports facade.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The issue store could not be read. Fix the infrastructure, not the site.
    #[error("issue store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

/// Result type alias for report queries.
pub type ReportResult<T> = Result<T, ReportError>;

/// Top-level error type for CLI commands.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("invalid scan ID: {0}")]
    ScanId(#[from] crate::types::ScanIdError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for CLI commands.
pub type CliResult<T> = Result<T, CliError>;
