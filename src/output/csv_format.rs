//! CSV output formatting.
//!
//! One row per unresolved (type, severity) group, heaviest penalty first.

use crate::reports::ReportSnapshot;
use std::io::{self, Write};

/// Write the issue summary of a snapshot as CSV.
pub fn write_csv<W: Write>(out: &mut W, snapshot: &ReportSnapshot) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    wtr.write_record(["issue_type", "issue_severity", "count", "weight", "penalty"])?;

    for agg in snapshot.summary.by_penalty() {
        let count = agg.count.to_string();
        let weight = agg.issue_severity.weight().to_string();
        let penalty = agg.penalty().to_string();

        wtr.write_record([
            agg.issue_type.as_str(),
            agg.issue_severity.as_str(),
            count.as_str(),
            weight.as_str(),
            penalty.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ReportsFacade;
    use crate::storage::MemoryIssueStore;
    use crate::types::IssueRecord;
    use chrono::Utc;

    #[test]
    fn test_csv_rows() {
        let now = Utc::now();
        let snapshot = ReportsFacade::new(MemoryIssueStore::with_records(vec![
            IssueRecord::new("low-contrast", "medium", now),
            IssueRecord::new("missing-alt-text", "critical", now),
            IssueRecord::new("missing-alt-text", "critical", now),
        ]))
        .snapshot()
        .unwrap();

        let mut buf = Vec::new();
        write_csv(&mut buf, &snapshot).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "issue_type,issue_severity,count,weight,penalty");
        assert_eq!(lines[1], "missing-alt-text,critical,2,10,20");
        assert_eq!(lines[2], "low-contrast,medium,1,3,3");
    }
}
