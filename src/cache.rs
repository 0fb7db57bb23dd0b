//! On-disk cache for report snapshots.
//!
//! The scoring engine never caches. This is the caller-side cache the CLI
//! uses between runs: one JSON file holding the last snapshot and the store it
//! was computed from, trusted for a fixed time-to-live. A stale, foreign or
//! unreadable entry is just a miss.

use crate::error::{StoreError, StoreResult};
use crate::reports::ReportSnapshot;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    source: String,
    snapshot: ReportSnapshot,
}

/// Single-entry snapshot cache with a TTL.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    path: PathBuf,
    ttl: Duration,
}

impl SnapshotCache {
    pub fn new(path: impl Into<PathBuf>, ttl_secs: u64) -> Self {
        let ttl = i64::try_from(ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or_else(|| Duration::days(365 * 100));

        Self {
            path: path.into(),
            ttl,
        }
    }

    /// The cached snapshot for `source`, if present and younger than the TTL.
    pub fn load_fresh(&self, source: &str) -> Option<ReportSnapshot> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable report cache");
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "malformed report cache");
                return None;
            }
        };

        if entry.source != source {
            debug!(cached = %entry.source, "report cache belongs to another store");
            return None;
        }

        let snapshot = entry.snapshot;
        let age = Utc::now().signed_duration_since(snapshot.generated_at);
        if age > self.ttl || age < Duration::zero() {
            debug!(age_secs = age.num_seconds(), "report cache stale");
            return None;
        }

        debug!(age_secs = age.num_seconds(), "report cache hit");
        Some(snapshot)
    }

    /// Replace the cached snapshot.
    pub fn store(&self, source: &str, snapshot: &ReportSnapshot) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::DirectoryError(e.to_string()))?;
        }

        let entry = CacheEntry {
            source: source.to_string(),
            snapshot: snapshot.clone(),
        };
        let content = serde_json::to_string_pretty(&entry)?;
        fs::write(&self.path, content).map_err(|e| StoreError::SaveFailed(e.to_string()))
    }

    /// Drop the cached snapshot. Missing files are fine.
    pub fn invalidate(&self) -> StoreResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "report cache invalidated");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::SaveFailed(e.to_string())),
        }
    }
}
