use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use repo_census::config::{QueryConfiguration, RawQueryInput};
use repo_census::github::GitHubClient;
use repo_census::services::run_report;

#[derive(Parser)]
#[command(name = "repo-census")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Repository inventory reporting for GitHub accounts - fetches the repositories owned by an account, applies declarative filters, and renders the result as a console table, JSON document, or CSV file"
)]
struct Cli {
    /// Account (user or organization) whose repositories are listed
    owner: String,

    /// Mark the owner as an organization - documentation only, the query shape is identical for users and organizations
    #[arg(long)]
    org: bool,

    /// Maximum number of repositories to request (default: 100)
    #[arg(short, long)]
    limit: Option<i64>,

    /// Visibility filter - one of public, private, internal (default: no filter)
    #[arg(long)]
    visibility: Option<String>,

    /// Include forked repositories (pass false to exclude forks at fetch time)
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    include_forks: bool,

    /// Restrict to repositories whose canonical owner is the queried account
    #[arg(long)]
    source_only: bool,

    /// Case-insensitive substring matched against each repository's topics
    #[arg(long)]
    topics: Option<String>,

    /// Output projection - one of console, json, csv (default: console)
    #[arg(short, long)]
    output: Option<String>,

    /// Destination file for json/csv output (default: standard output; ignored by console output)
    #[arg(long)]
    out_file: Option<PathBuf>,

    /// Open the owner's repositories page in the browser instead of querying
    #[arg(long)]
    web: bool,

    /// GitHub personal access token (can also be set via REPO_CENSUS_GITHUB_TOKEN or GITHUB_TOKEN environment variables)
    #[arg(long)]
    github_token: Option<String>,

    /// Request timeout in seconds for the GitHub API call (default: 30 seconds)
    #[arg(long)]
    request_timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize rustls crypto provider early to prevent "no process-level CryptoProvider available" panics
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("repo_census=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.org {
        // the listing query is identical for users and organizations
        tracing::debug!("owner marked as an organization");
    }

    let config = QueryConfiguration::resolve(RawQueryInput {
        owner: cli.owner,
        limit: cli.limit,
        visibility: cli.visibility,
        include_forks: cli.include_forks,
        source_only: cli.source_only,
        topic_filter: cli.topics,
        output_mode: cli.output,
        out_file: cli.out_file,
    })?;

    if cli.web {
        let url = format!("https://github.com/{}?tab=repositories", config.owner);
        open::that(&url)
            .map_err(|e| anyhow::anyhow!("Failed to open browser for {}: {}", url, e))?;
        return Ok(());
    }

    // Get GitHub token from CLI or environment
    let github_token = cli
        .github_token
        .or_else(|| env::var("REPO_CENSUS_GITHUB_TOKEN").ok())
        .or_else(|| env::var("GITHUB_TOKEN").ok());

    let client = GitHubClient::new(github_token, cli.request_timeout.map(Duration::from_secs))?;

    run_report(&client, &config).await
}
