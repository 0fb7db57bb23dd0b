//! Score subcommand implementation.

use super::Context;
use crate::error::{CliError, CliResult};
use clap::Parser;
use serde_json::json;

/// Show the accessibility score and compliance tier.
#[derive(Parser, Debug)]
pub struct ScoreCommand {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

impl ScoreCommand {
    /// Execute the score command. Always recomputes from the store.
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        let reports = ctx.reports();
        let score = reports.get_score()?;
        let compliance = reports.get_compliance()?;

        if self.json {
            let body = json!({ "score": score, "compliance": compliance });
            let text = serde_json::to_string_pretty(&body)
                .map_err(|e| CliError::Other(e.to_string()))?;
            println!("{}", text);
            return Ok(());
        }

        match compliance {
            Some(assessment) => println!("{} ({})", score, assessment.label),
            None => println!("{}", score),
        }

        Ok(())
    }
}
