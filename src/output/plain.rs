//! Plain text output formatting.
//!
//! Produces human-readable output with colors and formatting.

use crate::reports::ReportSnapshot;
use crate::scoring::ComplianceLevel;
use crate::storage::ScanBatch;
use crate::types::Severity;
use console::{style, Style};
use std::io::{self, Write};

const RULE: &str = "═══════════════════════════════════════════════════════════════";
const THIN_RULE: &str = "───────────────────────────────────────────────────────────────";

/// Write a snapshot in human-readable plain text format.
pub fn write_plain<W: Write>(out: &mut W, snapshot: &ReportSnapshot) -> io::Result<()> {
    // Header
    writeln!(out)?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(
        out,
        "                 {} Report",
        style("Accessibility").cyan().bold()
    )?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out)?;

    let Some(score) = snapshot.score.score() else {
        writeln!(
            out,
            "  {} {}",
            style("Score:").bold(),
            style("unavailable").dim()
        )?;
        writeln!(
            out,
            "  {}",
            style("No scan has been recorded yet. Run a scan to get a score.").dim()
        )?;
        writeln!(out)?;
        writeln!(out, "{}", style(RULE).cyan())?;
        return Ok(());
    };

    let level_style = snapshot
        .compliance
        .as_ref()
        .map_or_else(Style::new, |c| level_style(c.level));

    writeln!(
        out,
        "  {} {}/100",
        style("Score:").bold(),
        level_style.apply_to(score.value())
    )?;

    if let Some(compliance) = &snapshot.compliance {
        writeln!(
            out,
            "  {} {} ({} thresholds)",
            style("Compliance:").bold(),
            level_style.apply_to(&compliance.label),
            snapshot.thresholds
        )?;
        writeln!(out, "              {}", style(&compliance.description).dim())?;
    }

    if let Some(last_scan) = snapshot.last_scan {
        writeln!(
            out,
            "  {} {}",
            style("Last scan:").bold(),
            last_scan.format("%Y-%m-%d %H:%M UTC")
        )?;
    }
    writeln!(out)?;

    // Statistics
    let summary = &snapshot.summary;
    writeln!(
        out,
        "  {} {} unresolved issues, penalty {}",
        style("Statistics:").bold(),
        summary.total_issues(),
        snapshot.total_penalty
    )?;
    writeln!(
        out,
        "              {} critical, {} high, {} medium, {} low",
        style(summary.count_for(&Severity::Critical)).red().bold(),
        style(summary.count_for(&Severity::High)).red(),
        style(summary.count_for(&Severity::Medium)).yellow(),
        style(summary.count_for(&Severity::Low)).dim()
    )?;
    writeln!(out)?;

    // Issue table
    if summary.is_empty() {
        writeln!(out, "  {}", style("No unresolved issues.").green())?;
    } else {
        writeln!(out, "  {}", style(THIN_RULE).dim())?;
        writeln!(
            out,
            "  {:<32}  {:^10}  {:>6}  {:>7}",
            style("ISSUE").bold(),
            style("SEVERITY").bold(),
            style("COUNT").bold(),
            style("PENALTY").bold()
        )?;
        writeln!(out, "  {}", style(THIN_RULE).dim())?;

        for agg in summary.by_penalty() {
            writeln!(
                out,
                "  {:<32}  {:^10}  {:>6}  {:>7}",
                truncate_string(&agg.issue_type, 32),
                severity_style(&agg.issue_severity).apply_to(agg.issue_severity.as_str()),
                agg.count,
                agg.penalty()
            )?;
        }

        writeln!(out, "  {}", style(THIN_RULE).dim())?;
    }

    writeln!(out)?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out)?;

    Ok(())
}

/// Write a list of recorded scans.
pub fn write_history<W: Write>(out: &mut W, batches: &[ScanBatch]) -> io::Result<()> {
    if batches.is_empty() {
        writeln!(out, "  {}", style("No scans recorded.").dim())?;
        return Ok(());
    }

    writeln!(
        out,
        "  {:<8}  {:<16}  {:>6}  {:>10}  {}",
        style("ID").bold(),
        style("RECORDED").bold(),
        style("ISSUES").bold(),
        style("UNRESOLVED").bold(),
        style("PAGE").bold()
    )?;

    for batch in batches {
        writeln!(
            out,
            "  {:<8}  {:<16}  {:>6}  {:>10}  {}",
            style(batch.id.short()).dim(),
            batch.recorded_at.format("%Y-%m-%d %H:%M"),
            batch.issues.len(),
            batch.unresolved_count(),
            truncate_string(batch.page_url.as_deref().unwrap_or("-"), 40)
        )?;
    }

    Ok(())
}

fn level_style(level: ComplianceLevel) -> Style {
    match level {
        ComplianceLevel::Excellent => Style::new().green().bold(),
        ComplianceLevel::Good => Style::new().green(),
        ComplianceLevel::NeedsWork | ComplianceLevel::NeedsImprovement => Style::new().yellow(),
        ComplianceLevel::Poor => Style::new().red().bold(),
    }
}

fn severity_style(severity: &Severity) -> Style {
    match severity {
        Severity::Critical => Style::new().red().bold(),
        Severity::High => Style::new().red(),
        Severity::Medium => Style::new().yellow(),
        Severity::Low | Severity::Other(_) => Style::new().dim(),
    }
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Truncate a string to a maximum number of characters, adding ellipsis if
/// truncated.
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ReportsFacade;
    use crate::storage::MemoryIssueStore;
    use crate::types::IssueRecord;
    use chrono::Utc;

    fn render(store: MemoryIssueStore) -> String {
        console::set_colors_enabled(false);
        let snapshot = ReportsFacade::new(store).snapshot().unwrap();
        let mut buf = Vec::new();
        write_plain(&mut buf, &snapshot).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("hello world", 8), "hello...");
        assert_eq!(truncate_string("ééééééé", 5), "éé...");
    }

    #[test]
    fn test_plain_unavailable() {
        let text = render(MemoryIssueStore::unprovisioned());
        assert!(text.contains("unavailable"));
        assert!(!text.contains("Compliance:"));
    }

    #[test]
    fn test_plain_scored() {
        let text = render(MemoryIssueStore::with_records(vec![IssueRecord::new(
            "missing-alt-text",
            "critical",
            Utc::now(),
        )]));
        assert!(text.contains("90/100"));
        assert!(text.contains("Excellent"));
        assert!(text.contains("missing-alt-text"));
    }

    #[test]
    fn test_history_empty() {
        console::set_colors_enabled(false);
        let mut buf = Vec::new();
        write_history(&mut buf, &[]).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("No scans recorded"));
    }
}
