//! Ingest subcommand implementation.
//!
//! Handles `a11y-reports ingest <file>`, recording scans produced by an
//! external scanner. The file holds one scan batch or an array of them.

use super::Context;
use crate::error::{CliError, CliResult};
use crate::output;
use crate::storage::ScanBatch;
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Record scans from a JSON file.
#[derive(Parser, Debug)]
pub struct IngestCommand {
    /// JSON file with a scan batch or an array of batches
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IngestFile {
    Many(Vec<ScanBatch>),
    One(ScanBatch),
}

impl IngestCommand {
    /// Execute the ingest command.
    pub fn execute(&self, ctx: &Context, quiet: bool) -> CliResult<()> {
        let content = fs::read_to_string(&self.file)?;
        let batches = parse_batches(&content)?;

        let store = ctx.store();
        store.provision()?;

        let mut issues = 0;
        for batch in &batches {
            store.record_scan(batch)?;
            issues += batch.issues.len();
        }

        if let Err(e) = ctx.cache().invalidate() {
            warn!(error = %e, "failed to invalidate report cache");
        }

        info!(scans = batches.len(), issues, "ingested scans");
        if !quiet {
            output::print_success(&format!(
                "Recorded {} scan(s) with {} issue(s)",
                batches.len(),
                issues
            ));
        }

        Ok(())
    }
}

fn parse_batches(content: &str) -> CliResult<Vec<ScanBatch>> {
    let parsed: IngestFile = serde_json::from_str(content)
        .map_err(|e| CliError::Other(format!("invalid scan file: {}", e)))?;

    Ok(match parsed {
        IngestFile::Many(batches) => batches,
        IngestFile::One(batch) => vec![batch],
    })
}
