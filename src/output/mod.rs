//! Output formatting module.
//!
//! Provides formatters for plain text, JSON, and CSV renderings of a report
//! snapshot, plus the status-line helpers the CLI uses.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::write_csv;
pub use json_format::write_json;
pub use plain::{
    print_error, print_info, print_success, print_warning, write_history, write_plain,
};

use crate::cli::OutputFormat;
use crate::reports::ReportSnapshot;
use std::io::{self, Write};

/// Write a report snapshot in the requested format.
pub fn write_report<W: Write>(
    out: &mut W,
    snapshot: &ReportSnapshot,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Plain => plain::write_plain(out, snapshot),
        OutputFormat::Json => json_format::write_json(out, snapshot),
        OutputFormat::Csv => csv_format::write_csv(out, snapshot),
    }
}
