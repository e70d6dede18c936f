//! Analyze command - Run one analysis and print the report

use cireview_core::report::TeamInfo;
use cireview_core::{Config, Secrets};
use cireview_server::{AppState, RunOutcome, RunRequest};
use clap::Args;

/// Arguments for the analyze command
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// GitHub repository URL (https://github.com/owner/repo or git@github.com:owner/repo.git)
    #[arg(required = true)]
    pub repo: String,

    /// Team name echoed in the report
    #[arg(long, default_value = "")]
    pub team_name: String,

    /// Team leader echoed in the report
    #[arg(long, default_value = "")]
    pub leader_name: String,
}

impl AnalyzeArgs {
    /// Execute the analyze command
    pub async fn execute(&self, verbose: bool, config: Config) -> anyhow::Result<()> {
        let api_key = Secrets::load()?.gemini_api_key();
        let state = AppState::from_config(config, api_key)?;

        if verbose {
            tracing::info!(repo = %self.repo, "Starting analysis");
        }

        let request = RunRequest::new(
            self.repo.clone(),
            TeamInfo::new(&self.team_name, &self.leader_name),
        );
        let outcome = state.agent.run(&request).await;

        let Some(report) = outcome.report() else {
            anyhow::bail!("Repository URL required");
        };
        println!("{}", serde_json::to_string_pretty(report)?);

        if !matches!(outcome, RunOutcome::Completed(_)) {
            anyhow::bail!(
                "analysis failed: {}",
                report.error.as_deref().unwrap_or("unknown error")
            );
        }

        Ok(())
    }
}
