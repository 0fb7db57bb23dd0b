//! JSON output formatting.

use crate::reports::ReportSnapshot;
use std::io::{self, Write};

/// Write a snapshot as pretty-printed JSON.
pub fn write_json<W: Write>(out: &mut W, snapshot: &ReportSnapshot) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, snapshot).map_err(io::Error::other)?;
    writeln!(out)
}
