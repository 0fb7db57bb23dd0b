//! JSON-based issue storage.
//!
//! Stores each recorded scan as a separate JSON file for simplicity and
//! durability. The directory itself is the provisioning marker: until it
//! exists, the store reports that no scan has ever run.

use super::IssueStore;
use crate::error::{StoreError, StoreResult};
use crate::types::{IssueRecord, IssueSummary, ScanId, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One recorded scan and the issues it found.
///
/// When deserialized, issue rows without their own `scanned_at` or
/// `page_url` inherit the batch's `recorded_at` and `page_url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawScanBatch")]
pub struct ScanBatch {
    /// Unique identifier for this scan.
    pub id: ScanId,
    /// When the scan was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Page or site the scan covered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,
    /// Issue rows found by the scan.
    pub issues: Vec<IssueRecord>,
}

/// Scan batch as written by a scanner, with batch-level fields optional.
#[derive(Deserialize)]
struct RawScanBatch {
    #[serde(default)]
    id: ScanId,
    #[serde(default = "Utc::now")]
    recorded_at: DateTime<Utc>,
    #[serde(default)]
    page_url: Option<String>,
    #[serde(default)]
    issues: Vec<RawIssue>,
}

#[derive(Deserialize)]
struct RawIssue {
    issue_type: String,
    issue_severity: Severity,
    #[serde(default)]
    fixed: bool,
    #[serde(default)]
    page_url: Option<String>,
    #[serde(default)]
    element: Option<String>,
    #[serde(default)]
    scanned_at: Option<DateTime<Utc>>,
}

impl From<RawScanBatch> for ScanBatch {
    fn from(raw: RawScanBatch) -> Self {
        let issues = raw
            .issues
            .into_iter()
            .map(|issue| IssueRecord {
                issue_type: issue.issue_type,
                severity: issue.issue_severity,
                fixed: issue.fixed,
                page_url: issue.page_url.or_else(|| raw.page_url.clone()),
                element: issue.element,
                scanned_at: issue.scanned_at.unwrap_or(raw.recorded_at),
            })
            .collect();

        Self {
            id: raw.id,
            recorded_at: raw.recorded_at,
            page_url: raw.page_url,
            issues,
        }
    }
}

impl ScanBatch {
    /// Create an empty batch stamped with the current time.
    pub fn new(page_url: Option<String>) -> Self {
        Self {
            id: ScanId::new(),
            recorded_at: Utc::now(),
            page_url,
            issues: Vec::new(),
        }
    }

    /// Add an unresolved issue found by this scan.
    pub fn with_issue(
        mut self,
        issue_type: impl Into<String>,
        severity: impl Into<Severity>,
    ) -> Self {
        let mut record = IssueRecord::new(issue_type, severity, self.recorded_at);
        record.page_url = self.page_url.clone();
        self.issues.push(record);
        self
    }

    /// Number of issues in this batch not yet fixed.
    pub fn unresolved_count(&self) -> usize {
        self.issues.iter().filter(|i| !i.fixed).count()
    }
}

/// JSON file-based issue storage.
#[derive(Debug, Clone)]
pub struct JsonIssueStore {
    scans_dir: PathBuf,
}

impl JsonIssueStore {
    /// Open a store rooted at `dir`. Nothing is created on disk.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self {
            scans_dir: dir.into(),
        }
    }

    /// Directory holding the scan files.
    pub fn dir(&self) -> &Path {
        &self.scans_dir
    }

    /// Create the store directory.
    pub fn provision(&self) -> StoreResult<()> {
        fs::create_dir_all(&self.scans_dir)
            .map_err(|e| StoreError::DirectoryError(e.to_string()))?;
        info!(dir = %self.scans_dir.display(), "provisioned issue store");
        Ok(())
    }

    /// Save a scan batch. The store must already be provisioned.
    pub fn record_scan(&self, batch: &ScanBatch) -> StoreResult<()> {
        if !self.is_provisioned()? {
            return Err(StoreError::NotProvisioned);
        }

        self.write_batch(batch)?;
        debug!(scan = %batch.id.short(), issues = batch.issues.len(), "recorded scan");
        Ok(())
    }

    /// Load a scan batch by ID.
    pub fn load(&self, id: &ScanId) -> StoreResult<ScanBatch> {
        let file = self.scan_file(id);

        if !file.exists() {
            return Err(StoreError::ScanNotFound(id.to_string()));
        }

        read_batch(&file)
    }

    /// Find a scan by short ID prefix.
    pub fn find_by_prefix(&self, prefix: &str) -> StoreResult<ScanBatch> {
        let matches: Vec<_> = self
            .list_ids()?
            .into_iter()
            .filter(|id| id.matches_prefix(prefix))
            .collect();

        match matches.as_slice() {
            [] => Err(StoreError::ScanNotFound(prefix.to_string())),
            [id] => self.load(id),
            _ => Err(StoreError::AmbiguousPrefix {
                prefix: prefix.to_string(),
                matches: matches.len(),
            }),
        }
    }

    /// List all scan IDs. An unprovisioned store has none.
    pub fn list_ids(&self) -> StoreResult<Vec<ScanId>> {
        if !self.is_provisioned()? {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();

        for entry in
            fs::read_dir(&self.scans_dir).map_err(|e| StoreError::DirectoryError(e.to_string()))?
        {
            let entry = entry.map_err(|e| StoreError::DirectoryError(e.to_string()))?;
            let path = entry.path();

            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem() {
                    if let Ok(id) = stem.to_string_lossy().parse::<ScanId>() {
                        ids.push(id);
                    }
                }
            }
        }

        Ok(ids)
    }

    /// List all scan batches, most recent first.
    ///
    /// A single unreadable file fails the whole call.
    pub fn list(&self) -> StoreResult<Vec<ScanBatch>> {
        let mut batches = self
            .list_ids()?
            .iter()
            .map(|id| self.load(id))
            .collect::<StoreResult<Vec<_>>>()?;

        batches.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));

        Ok(batches)
    }

    /// List recent scans (last n).
    pub fn list_recent(&self, count: usize) -> StoreResult<Vec<ScanBatch>> {
        let mut batches = self.list()?;
        batches.truncate(count);
        Ok(batches)
    }

    /// Delete a scan batch.
    pub fn delete(&self, id: &ScanId) -> StoreResult<()> {
        let file = self.scan_file(id);

        if !file.exists() {
            return Err(StoreError::ScanNotFound(id.to_string()));
        }

        fs::remove_file(&file).map_err(|e| StoreError::SaveFailed(e.to_string()))
    }

    /// Delete scans recorded before `max_age` ago.
    pub fn cleanup(&self, max_age: chrono::Duration) -> StoreResult<usize> {
        let cutoff = Utc::now() - max_age;
        let mut deleted = 0;

        for batch in self.list()? {
            if batch.recorded_at < cutoff {
                self.delete(&batch.id)?;
                deleted += 1;
            }
        }

        info!(deleted, "pruned old scans");
        Ok(deleted)
    }

    /// Mark unresolved issues of `issue_type` as fixed, optionally only on
    /// one page. Returns the number of rows changed.
    pub fn mark_fixed(&self, issue_type: &str, page_url: Option<&str>) -> StoreResult<usize> {
        let mut changed = 0;

        for mut batch in self.list()? {
            let mut touched = false;

            for issue in batch.issues.iter_mut().filter(|i| !i.fixed) {
                let page_matches =
                    page_url.map_or(true, |url| issue.page_url.as_deref() == Some(url));

                if issue.issue_type == issue_type && page_matches {
                    issue.fixed = true;
                    touched = true;
                    changed += 1;
                }
            }

            if touched {
                self.write_batch(&batch)?;
            }
        }

        debug!(issue_type, changed, "marked issues fixed");
        Ok(changed)
    }

    /// Get storage statistics.
    pub fn stats(&self) -> StoreResult<StorageStats> {
        let batches = self.list()?;
        let total_size: u64 = self
            .list_ids()?
            .iter()
            .filter_map(|id| fs::metadata(self.scan_file(id)).ok())
            .map(|m| m.len())
            .sum();

        Ok(StorageStats {
            scan_count: batches.len(),
            issue_count: batches.iter().map(|b| b.issues.len()).sum(),
            total_size_bytes: total_size,
            oldest_scan: batches.last().map(|b| b.recorded_at),
            newest_scan: batches.first().map(|b| b.recorded_at),
        })
    }

    fn is_provisioned(&self) -> StoreResult<bool> {
        match fs::metadata(&self.scans_dir) {
            Ok(meta) if meta.is_dir() => Ok(true),
            Ok(_) => Err(StoreError::DirectoryError(format!(
                "{} is not a directory",
                self.scans_dir.display()
            ))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::DirectoryError(e.to_string())),
        }
    }

    fn write_batch(&self, batch: &ScanBatch) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(batch)?;
        fs::write(self.scan_file(&batch.id), content)
            .map_err(|e| StoreError::SaveFailed(e.to_string()))
    }

    /// Get the file path for a scan.
    fn scan_file(&self, id: &ScanId) -> PathBuf {
        self.scans_dir.join(format!("{}.json", id))
    }

    fn all_issues(&self) -> StoreResult<Vec<IssueRecord>> {
        Ok(self.list()?.into_iter().flat_map(|b| b.issues).collect())
    }
}

fn read_batch(path: &Path) -> StoreResult<ScanBatch> {
    let content = fs::read_to_string(path).map_err(|e| StoreError::ReadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

impl IssueStore for JsonIssueStore {
    fn exists(&self) -> StoreResult<bool> {
        self.is_provisioned()
    }

    fn total_row_count(&self) -> StoreResult<u64> {
        Ok(self.all_issues()?.len() as u64)
    }

    fn unresolved_summary(&self) -> StoreResult<IssueSummary> {
        Ok(IssueSummary::from_records(&self.all_issues()?))
    }

    fn max_scan_timestamp(&self) -> StoreResult<Option<DateTime<Utc>>> {
        Ok(self.all_issues()?.iter().map(|i| i.scanned_at).max())
    }
}

/// Storage statistics.
#[derive(Debug, Clone)]
pub struct StorageStats {
    /// Number of stored scans.
    pub scan_count: usize,
    /// Number of issue rows across all scans.
    pub issue_count: usize,
    /// Total size in bytes.
    pub total_size_bytes: u64,
    /// Oldest scan timestamp.
    pub oldest_scan: Option<DateTime<Utc>>,
    /// Newest scan timestamp.
    pub newest_scan: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn provisioned() -> (TempDir, JsonIssueStore) {
        let tmp = TempDir::new().unwrap();
        let store = JsonIssueStore::open(tmp.path().join("issues"));
        store.provision().unwrap();
        (tmp, store)
    }

    #[test]
    fn test_open_does_not_create() {
        let tmp = TempDir::new().unwrap();
        let store = JsonIssueStore::open(tmp.path().join("issues"));
        assert!(!store.exists().unwrap());
        assert!(!store.dir().exists());
        assert_eq!(store.total_row_count().unwrap(), 0);
    }

    #[test]
    fn test_record_requires_provisioning() {
        let tmp = TempDir::new().unwrap();
        let store = JsonIssueStore::open(tmp.path().join("issues"));
        let err = store.record_scan(&ScanBatch::new(None)).unwrap_err();
        assert!(matches!(err, StoreError::NotProvisioned));
    }

    #[test]
    fn test_record_and_load() {
        let (_tmp, store) = provisioned();
        let batch = ScanBatch::new(Some("https://example.com/".into()))
            .with_issue("missing-alt-text", "critical")
            .with_issue("low-contrast", "medium");
        store.record_scan(&batch).unwrap();

        let loaded = store.find_by_prefix(&batch.id.short()).unwrap();
        assert_eq!(loaded.issues.len(), 2);
        assert_eq!(loaded.issues[0].page_url.as_deref(), Some("https://example.com/"));
        assert_eq!(store.total_row_count().unwrap(), 2);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let (_tmp, store) = provisioned();
        let id = ScanId::new();
        fs::write(store.dir().join(format!("{}.json", id)), "{not json").unwrap();

        let err = store.unresolved_summary().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn test_store_path_is_a_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("issues");
        fs::write(&path, "").unwrap();
        let store = JsonIssueStore::open(path);
        assert!(matches!(store.exists(), Err(StoreError::DirectoryError(_))));
    }

    #[test]
    fn test_mark_fixed_filters_by_page() {
        let (_tmp, store) = provisioned();
        store
            .record_scan(&ScanBatch::new(Some("/a".into())).with_issue("empty-link", "high"))
            .unwrap();
        store
            .record_scan(&ScanBatch::new(Some("/b".into())).with_issue("empty-link", "high"))
            .unwrap();

        assert_eq!(store.mark_fixed("empty-link", Some("/a")).unwrap(), 1);
        assert_eq!(store.unresolved_summary().unwrap().total_issues(), 1);
        assert_eq!(store.mark_fixed("empty-link", None).unwrap(), 1);
        assert!(store.unresolved_summary().unwrap().is_empty());
        // Fixed rows still count as recorded.
        assert_eq!(store.total_row_count().unwrap(), 2);
    }

    #[test]
    fn test_cleanup_removes_old_scans() {
        let (_tmp, store) = provisioned();
        let mut old = ScanBatch::new(None).with_issue("missing-label", "low");
        old.recorded_at = Utc::now() - chrono::Duration::days(40);
        store.record_scan(&old).unwrap();
        store.record_scan(&ScanBatch::new(None)).unwrap();

        assert_eq!(store.cleanup(chrono::Duration::days(30)).unwrap(), 1);
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_stats() {
        let (_tmp, store) = provisioned();
        store
            .record_scan(&ScanBatch::new(None).with_issue("a", "low").with_issue("b", "low"))
            .unwrap();
        let stats = store.stats().unwrap();
        assert_eq!(stats.scan_count, 1);
        assert_eq!(stats.issue_count, 2);
        assert!(stats.total_size_bytes > 0);
    }

    #[test]
    fn test_batch_defaults_when_deserializing() {
        let batch: ScanBatch = serde_json::from_str(
            r#"{"issues":[{"issue_type":"missing-alt-text","issue_severity":"high"}]}"#,
        )
        .unwrap();
        assert_eq!(batch.issues.len(), 1);
        assert!(!batch.issues[0].fixed);
    }

    #[test]
    fn test_issues_inherit_batch_time_and_page() {
        let batch: ScanBatch = serde_json::from_str(
            r#"{
                "recorded_at": "2020-01-01T00:00:00Z",
                "page_url": "/about",
                "issues": [
                    {"issue_type": "missing-alt-text", "issue_severity": "critical"},
                    {
                        "issue_type": "empty-link",
                        "issue_severity": "high",
                        "page_url": "/contact",
                        "scanned_at": "2020-01-02T00:00:00Z"
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(batch.issues[0].scanned_at, batch.recorded_at);
        assert_eq!(batch.issues[0].page_url.as_deref(), Some("/about"));
        assert_eq!(batch.issues[1].page_url.as_deref(), Some("/contact"));
        assert_ne!(batch.issues[1].scanned_at, batch.recorded_at);
    }
}
