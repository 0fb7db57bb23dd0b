//! Integration tests: reports computed over the JSON file store.

use a11y_reports::cache::SnapshotCache;
use a11y_reports::cli::{Context, FixCommand, IngestCommand};
use a11y_reports::config::{AppSettings, Paths};
use a11y_reports::output;
use a11y_reports::storage::ScanBatch;
use a11y_reports::{
    AccessibilityScore, ComplianceLevel, IssueStore, JsonIssueStore, ReportError, ReportsFacade,
    ThresholdTable,
};
use chrono::{Duration, TimeZone, Utc};
use std::fs;
use tempfile::TempDir;

fn store_in(tmp: &TempDir) -> JsonIssueStore {
    JsonIssueStore::open(tmp.path().join("issues"))
}

#[test]
fn test_never_scanned_site() {
    let tmp = TempDir::new().unwrap();
    let reports = ReportsFacade::new(store_in(&tmp));

    assert_eq!(reports.get_score().unwrap(), AccessibilityScore::Unavailable);
    assert!(reports.get_compliance().unwrap().is_none());
    assert!(reports.get_issue_summary().unwrap().is_empty());
    assert!(reports.get_last_scan_date().unwrap().is_none());
}

#[test]
fn test_provisioned_but_empty_store_is_unavailable() {
    let tmp = TempDir::new().unwrap();
    let store = store_in(&tmp);
    store.provision().unwrap();
    store.record_scan(&ScanBatch::new(Some("/".into()))).unwrap();

    let reports = ReportsFacade::new(store);
    assert!(reports.store().exists().unwrap());
    assert_eq!(reports.get_score().unwrap(), AccessibilityScore::Unavailable);
}

#[test]
fn test_score_lifecycle() {
    let tmp = TempDir::new().unwrap();
    let store = store_in(&tmp);
    store.provision().unwrap();

    store
        .record_scan(
            &ScanBatch::new(Some("https://example.com/".into()))
                .with_issue("missing-alt-text", "critical")
                .with_issue("empty-link", "high")
                .with_issue("low-contrast", "medium")
                .with_issue("redundant-title", "low"),
        )
        .unwrap();

    let reports = ReportsFacade::new(&store);
    let score = reports.get_score().unwrap();
    assert_eq!(score.to_string(), "81");
    assert_eq!(
        reports.get_compliance().unwrap().unwrap().level,
        ComplianceLevel::Good
    );

    // Resolving the critical issue lifts the site into the top tier.
    assert_eq!(store.mark_fixed("missing-alt-text", None).unwrap(), 1);
    assert_eq!(reports.get_score().unwrap().to_string(), "91");
    assert_eq!(
        reports.get_compliance().unwrap().unwrap().level,
        ComplianceLevel::Excellent
    );

    // Resolving everything scores 100, not unavailable.
    for issue_type in ["empty-link", "low-contrast", "redundant-title"] {
        store.mark_fixed(issue_type, None).unwrap();
    }
    assert_eq!(reports.get_score().unwrap().to_string(), "100");
}

#[test]
fn test_last_scan_date_spans_batches() {
    let tmp = TempDir::new().unwrap();
    let store = store_in(&tmp);
    store.provision().unwrap();

    let mut old = ScanBatch::new(Some("/old".into())).with_issue("missing-label", "high");
    old.recorded_at = Utc::now() - Duration::days(10);
    for issue in &mut old.issues {
        issue.scanned_at = old.recorded_at;
    }
    store.record_scan(&old).unwrap();

    let recent = ScanBatch::new(Some("/new".into())).with_issue("missing-label", "high");
    store.record_scan(&recent).unwrap();
    store.mark_fixed("missing-label", Some("/new")).unwrap();

    let reports = ReportsFacade::new(store);
    assert_eq!(
        reports.get_last_scan_date().unwrap(),
        Some(recent.recorded_at)
    );
}

#[test]
fn test_corrupt_store_surfaces_error() {
    let tmp = TempDir::new().unwrap();
    let store = store_in(&tmp);
    store.provision().unwrap();
    fs::write(
        store.dir().join("00000000-0000-4000-8000-000000000000.json"),
        "not json",
    )
    .unwrap();

    let reports = ReportsFacade::new(store);
    assert!(matches!(
        reports.get_score(),
        Err(ReportError::StoreUnavailable(_))
    ));
}

#[test]
fn test_display_thresholds_over_json_store() {
    let tmp = TempDir::new().unwrap();
    let store = store_in(&tmp);
    store.provision().unwrap();
    store
        .record_scan(
            &ScanBatch::new(None)
                .with_issue("missing-alt-text", "critical")
                .with_issue("empty-link", "high"),
        )
        .unwrap();

    // 85 is good under both tables.
    let standard = ReportsFacade::new(&store).get_compliance().unwrap().unwrap();
    let display = ReportsFacade::new(&store)
        .with_thresholds(ThresholdTable::Display)
        .get_compliance()
        .unwrap()
        .unwrap();
    assert_eq!(standard.level, ComplianceLevel::Good);
    assert_eq!(display.level, ComplianceLevel::Good);

    store
        .record_scan(&ScanBatch::new(None).with_issue("low-contrast", "low"))
        .unwrap();
    let display = ReportsFacade::new(&store)
        .with_thresholds(ThresholdTable::Display)
        .get_compliance()
        .unwrap()
        .unwrap();
    assert_eq!(display.level, ComplianceLevel::NeedsImprovement);
}

#[test]
fn test_snapshot_renders_and_caches() {
    let tmp = TempDir::new().unwrap();
    let store = store_in(&tmp);
    store.provision().unwrap();
    store
        .record_scan(&ScanBatch::new(None).with_issue("missing-alt-text", "critical"))
        .unwrap();

    let snapshot = ReportsFacade::new(&store).snapshot().unwrap();

    let mut json = Vec::new();
    output::write_json(&mut json, &snapshot).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
    assert_eq!(value["score"], 90);
    assert_eq!(value["compliance"]["level"], "excellent");
    assert_eq!(value["summary"][0]["issue_severity"], "critical");

    let cache = SnapshotCache::new(tmp.path().join("cache/report.json"), 600);
    let source = store.dir().display().to_string();
    cache.store(&source, &snapshot).unwrap();
    assert_eq!(cache.load_fresh(&source), Some(snapshot));
}

#[test]
fn test_ingested_issues_keep_scan_time_and_page() {
    let tmp = TempDir::new().unwrap();
    let ctx = Context {
        paths: Paths::under(tmp.path()),
        settings: AppSettings::default(),
    };

    let scan_file = tmp.path().join("scan.json");
    fs::write(
        &scan_file,
        r#"{
            "recorded_at": "2020-01-01T00:00:00Z",
            "page_url": "/about",
            "issues": [{"issue_type": "missing-alt-text", "issue_severity": "critical"}]
        }"#,
    )
    .unwrap();

    IngestCommand { file: scan_file }.execute(&ctx, true).unwrap();

    let reports = ctx.reports();
    assert_eq!(reports.get_score().unwrap().to_string(), "90");
    assert_eq!(
        reports.get_last_scan_date().unwrap(),
        Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
    );

    FixCommand {
        issue_type: "missing-alt-text".into(),
        page: Some("/about".into()),
    }
    .execute(&ctx, true)
    .unwrap();

    assert!(reports.get_issue_summary().unwrap().is_empty());
    assert_eq!(reports.get_score().unwrap().to_string(), "100");
}
