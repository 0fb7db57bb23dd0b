//! History subcommand implementation.

use super::Context;
use crate::error::CliResult;
use crate::output;
use crate::types::ScanId;
use clap::Parser;
use std::io;
use tracing::warn;

/// View and manage scan history.
#[derive(Parser, Debug)]
pub struct HistoryCommand {
    /// Number of recent scans to show
    #[arg(short = 'n', long, default_value = "10")]
    pub count: usize,

    /// Clear all scan history
    #[arg(long, conflicts_with = "prune")]
    pub clear: bool,

    /// Delete scans older than N days
    #[arg(long, value_name = "DAYS")]
    pub prune: Option<u32>,

    /// Delete one scan by ID or short ID
    #[arg(long, value_name = "SCAN_ID", conflicts_with_all = ["clear", "prune"])]
    pub delete: Option<String>,
}

impl HistoryCommand {
    /// Execute the history command.
    pub fn execute(&self, ctx: &Context, quiet: bool) -> CliResult<()> {
        let store = ctx.store();

        if let Some(ref scan_id) = self.delete {
            let id = if scan_id.len() < 32 {
                store.find_by_prefix(scan_id)?.id
            } else {
                scan_id.parse::<ScanId>()?
            };

            store.delete(&id)?;
            if let Err(e) = ctx.cache().invalidate() {
                warn!(error = %e, "failed to invalidate report cache");
            }

            if !quiet {
                output::print_success(&format!("Deleted scan {}", id.short()));
            }
            return Ok(());
        }

        if self.clear || self.prune.is_some() {
            let deleted = if self.clear {
                let ids = store.list_ids()?;
                for id in &ids {
                    store.delete(id)?;
                }
                ids.len()
            } else {
                let days = self.prune.unwrap_or_default();
                store.cleanup(chrono::Duration::days(i64::from(days)))?
            };

            if deleted > 0 {
                if let Err(e) = ctx.cache().invalidate() {
                    warn!(error = %e, "failed to invalidate report cache");
                }
            }

            if !quiet {
                output::print_success(&format!("Deleted {} scan(s)", deleted));
            }
            return Ok(());
        }

        let batches = store.list_recent(self.count)?;
        let stdout = io::stdout();
        output::write_history(&mut stdout.lock(), &batches)?;

        if !quiet {
            let stats = store.stats()?;
            println!();
            output::print_info(&format!(
                "{} scan(s), {} issue row(s), {} KiB on disk",
                stats.scan_count,
                stats.issue_count,
                stats.total_size_bytes / 1024
            ));
        }

        Ok(())
    }
}
