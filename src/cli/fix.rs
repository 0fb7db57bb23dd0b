//! Fix subcommand implementation.

use super::Context;
use crate::error::CliResult;
use crate::output;
use clap::Parser;
use tracing::warn;

/// Mark issues as fixed.
#[derive(Parser, Debug)]
pub struct FixCommand {
    /// Issue type to resolve, e.g. "missing-alt-text"
    #[arg(value_name = "ISSUE_TYPE")]
    pub issue_type: String,

    /// Only resolve issues found on this page
    #[arg(long, value_name = "URL")]
    pub page: Option<String>,
}

impl FixCommand {
    /// Execute the fix command.
    pub fn execute(&self, ctx: &Context, quiet: bool) -> CliResult<()> {
        let changed = ctx
            .store()
            .mark_fixed(&self.issue_type, self.page.as_deref())?;

        if changed > 0 {
            if let Err(e) = ctx.cache().invalidate() {
                warn!(error = %e, "failed to invalidate report cache");
            }
        }

        if !quiet {
            if changed == 0 {
                output::print_warning(&format!(
                    "No unresolved '{}' issues found",
                    self.issue_type
                ));
            } else {
                output::print_success(&format!(
                    "Marked {} '{}' issue(s) as fixed",
                    changed, self.issue_type
                ));
            }
        }

        Ok(())
    }
}
