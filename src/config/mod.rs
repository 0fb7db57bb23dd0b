//! Configuration management for a11y-reports.
//!
//! Provides XDG-compliant path resolution and the typed application
//! settings record.

mod settings;

pub use settings::{AppSettings, Paths};
