//! CLI subcommand definitions and handlers.
//!
//! Implements a git-like subcommand architecture:
//! - `a11y-reports report` - Full score, compliance and issue report
//! - `a11y-reports score` - Score and tier only
//! - `a11y-reports ingest <file>` - Record a scan produced by a scanner
//! - `a11y-reports history` - View, prune or clear recorded scans
//! - `a11y-reports fix <issue-type>` - Mark issues as resolved

mod fix;
mod history;
mod ingest;
mod report;
mod score;

pub use fix::FixCommand;
pub use history::HistoryCommand;
pub use ingest::IngestCommand;
pub use report::{ReportCommand, ThresholdArg};
pub use score::ScoreCommand;

use crate::cache::SnapshotCache;
use crate::config::{AppSettings, Paths};
use crate::error::CliResult;
use crate::reports::ReportsFacade;
use crate::storage::JsonIssueStore;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// a11y-reports - accessibility scan scoring and compliance reporting.
///
/// Reads the issues recorded by accessibility scans, scores the site from
/// 0 to 100 by severity-weighted penalty, and classifies the result into a
/// compliance tier.
#[derive(Parser, Debug)]
#[command(name = "a11y-reports")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Accessibility scoring and compliance reports", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to custom configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Issue store directory
    #[arg(long, global = true, value_name = "DIR", env = "A11Y_REPORTS_STORE")]
    pub store_dir: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the full accessibility report
    #[command(alias = "r")]
    Report(ReportCommand),

    /// Show the accessibility score and compliance tier
    #[command(alias = "s")]
    Score(ScoreCommand),

    /// Record a scan from a JSON file
    #[command(alias = "i")]
    Ingest(IngestCommand),

    /// View scan history
    #[command(alias = "h")]
    History(HistoryCommand),

    /// Mark issues as fixed
    Fix(FixCommand),
}

impl Commands {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Report(_) => "report",
            Self::Score(_) => "score",
            Self::Ingest(_) => "ingest",
            Self::History(_) => "history",
            Self::Fix(_) => "fix",
        }
    }
}

impl Cli {
    /// Run the selected subcommand.
    pub fn execute(&self) -> CliResult<()> {
        let ctx = Context::load(self)?;

        match &self.command {
            Commands::Report(cmd) => cmd.execute(&ctx, self.quiet),
            Commands::Score(cmd) => cmd.execute(&ctx),
            Commands::Ingest(cmd) => cmd.execute(&ctx, self.quiet),
            Commands::History(cmd) => cmd.execute(&ctx, self.quiet),
            Commands::Fix(cmd) => cmd.execute(&ctx, self.quiet),
        }
    }
}

/// Resolved paths and settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct Context {
    pub paths: Paths,
    pub settings: AppSettings,
}

impl Context {
    /// Resolve paths, load settings and apply command-line overrides.
    pub fn load(cli: &Cli) -> CliResult<Self> {
        let paths = Paths::discover()?;
        let mut settings = match &cli.config {
            Some(path) => AppSettings::load_from(path)?,
            None => AppSettings::load(&paths)?,
        };

        if let Some(dir) = &cli.store_dir {
            settings.store_dir = Some(dir.clone());
        }

        debug!(store = %settings.store_dir(&paths).display(), "loaded settings");
        Ok(Self { paths, settings })
    }

    /// The configured issue store.
    pub fn store(&self) -> JsonIssueStore {
        JsonIssueStore::open(self.settings.store_dir(&self.paths))
    }

    /// The report snapshot cache.
    pub fn cache(&self) -> SnapshotCache {
        SnapshotCache::new(self.paths.report_cache_file(), self.settings.cache_ttl_secs)
    }

    /// Reports facade over the configured store.
    pub fn reports(&self) -> ReportsFacade<JsonIssueStore> {
        ReportsFacade::new(self.store()).with_thresholds(self.settings.thresholds)
    }
}

/// Output format for reports.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
    /// CSV of unresolved issues
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ThresholdTable;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_report_flags() {
        let cli = Cli::try_parse_from([
            "a11y-reports",
            "--store-dir",
            "/tmp/issues",
            "report",
            "--format",
            "csv",
            "--fresh",
        ])
        .unwrap();

        assert_eq!(cli.store_dir, Some(PathBuf::from("/tmp/issues")));
        match cli.command {
            Commands::Report(cmd) => {
                assert_eq!(cmd.format, Some(OutputFormat::Csv));
                assert!(cmd.fresh);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_threshold_table() {
        let cli =
            Cli::try_parse_from(["a11y-reports", "report", "--thresholds", "display"]).unwrap();
        match cli.command {
            Commands::Report(cmd) => {
                assert_eq!(cmd.thresholds, Some(ThresholdArg::Display));
                assert_eq!(
                    cmd.thresholds.map(ThresholdTable::from),
                    Some(ThresholdTable::Display)
                );
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_output_format_serde() {
        let format: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, OutputFormat::Json);
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
    }
}
