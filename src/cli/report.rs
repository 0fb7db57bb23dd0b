//! Report subcommand implementation.
//!
//! Handles `a11y-reports report`, printing or exporting the full snapshot.

use super::{Context, OutputFormat};
use crate::error::CliResult;
use crate::output;
use crate::reports::ReportSnapshot;
use crate::scoring::ThresholdTable;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::warn;

/// Threshold table selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ThresholdArg {
    /// 90/70/50 cut-offs
    Standard,
    /// 95/85/70 cut-offs
    Display,
}

impl From<ThresholdArg> for ThresholdTable {
    fn from(arg: ThresholdArg) -> Self {
        match arg {
            ThresholdArg::Standard => Self::Standard,
            ThresholdArg::Display => Self::Display,
        }
    }
}

/// Show the full accessibility report.
#[derive(Parser, Debug)]
pub struct ReportCommand {
    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file path (prints to stdout if not specified)
    #[arg(short = 'o', long = "output")]
    pub output_file: Option<PathBuf>,

    /// Threshold table for the compliance tier
    #[arg(short, long, value_enum)]
    pub thresholds: Option<ThresholdArg>,

    /// Ignore the cached report and recompute
    #[arg(long)]
    pub fresh: bool,
}

impl ReportCommand {
    /// Execute the report command.
    pub fn execute(&self, ctx: &Context, quiet: bool) -> CliResult<()> {
        let snapshot = self.snapshot(ctx)?;
        let format = self.format.unwrap_or(ctx.settings.default_output_format);

        if let Some(ref path) = self.output_file {
            console::set_colors_enabled(false);
            let mut out = BufWriter::new(File::create(path)?);
            output::write_report(&mut out, &snapshot, format)?;
            out.flush()?;

            if !quiet {
                output::print_success(&format!("Report written to {}", path.display()));
            }
        } else {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            output::write_report(&mut out, &snapshot, format)?;
        }

        Ok(())
    }

    fn snapshot(&self, ctx: &Context) -> CliResult<ReportSnapshot> {
        let thresholds = self
            .thresholds
            .map_or(ctx.settings.thresholds, ThresholdTable::from);
        let cache = ctx.cache();
        let source = ctx.store().dir().display().to_string();

        if ctx.settings.use_cache && !self.fresh {
            if let Some(cached) = cache
                .load_fresh(&source)
                .filter(|s| s.thresholds == thresholds)
            {
                return Ok(cached);
            }
        }

        let snapshot = ctx.reports().with_thresholds(thresholds).snapshot()?;

        if ctx.settings.use_cache {
            if let Err(e) = cache.store(&source, &snapshot) {
                warn!(error = %e, "failed to cache report");
            }
        }

        Ok(snapshot)
    }
}
