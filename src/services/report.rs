//! Report pipeline orchestration
//!
//! Runs the fetch → filter → project sequence for one resolved
//! configuration. Stages execute strictly in order; no stage reads back
//! from a later one, and nothing is shared across invocations.

use anyhow::{Context, Result};
use tracing::info;

use crate::config::QueryConfiguration;
use crate::filter;
use crate::formatter;
use crate::github::GitHubClient;

/// Fetch, filter, and project one repository inventory report.
pub async fn run_report(client: &GitHubClient, config: &QueryConfiguration) -> Result<()> {
    let fetched = client.list_repositories(config).await?;
    info!("Fetched {} repositories for {}", fetched.len(), config.owner);

    let filtered = filter::apply(fetched, config);
    info!("{} repositories after filtering", filtered.len());

    formatter::write_report(&filtered, config)
        .context("Failed to render the repository report")?;

    Ok(())
}
