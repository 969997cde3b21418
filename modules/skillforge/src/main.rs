use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use skillforge::{extract_insights, run_research, write_package, PackageInput};
use tavily_client::TavilyClient;

/// Generate a research-backed practice skill package from Tavily search.
#[derive(Parser, Debug)]
#[command(name = "skillforge", version)]
struct Cli {
    /// Practice topic to prepare (e.g. "system design interview").
    practice: String,

    /// Audience context (e.g. "staff engineer candidate").
    #[arg(long, default_value = "")]
    audience: String,

    /// Target improvement goal.
    #[arg(long, default_value = "")]
    goal: String,

    /// Directory where the package should be created.
    #[arg(long, default_value = "generated-practice-skills")]
    output_dir: PathBuf,

    /// Maximum Tavily results per query.
    #[arg(long, default_value_t = 6)]
    max_results: u32,

    /// Warn if fewer than this many unique sources are collected.
    #[arg(long, default_value_t = 8)]
    min_unique_sources: usize,

    /// Comma-separated domains to restrict Tavily search scope.
    #[arg(long, default_value = "")]
    include_domains: String,

    /// Tavily API key. Defaults to the TAVILY_API_KEY environment variable.
    #[arg(long, default_value = "")]
    api_key: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("skillforge=info".parse()?))
        .init();

    let cli = Cli::parse();

    let env_key = std::env::var("TAVILY_API_KEY").unwrap_or_default();
    let Some(api_key) = resolve_api_key(&cli.api_key, &env_key) else {
        error!("Missing Tavily API key. Set TAVILY_API_KEY or pass --api-key.");
        std::process::exit(2);
    };

    let include_domains = parse_domain_list(&cli.include_domains);

    let client = TavilyClient::new(api_key);
    let research = run_research(
        &client,
        &cli.practice,
        &cli.audience,
        &cli.goal,
        cli.max_results,
        &include_domains,
    )
    .await?;

    let insights = extract_insights(&cli.practice, &research.answers, &research.results, 10);

    let package_dir = write_package(
        &cli.output_dir,
        &PackageInput {
            practice: &cli.practice,
            audience: &cli.audience,
            goal: &cli.goal,
            queries: &research.queries,
            answers: &research.answers,
            results: &research.results,
            insights: &insights,
            min_unique_sources: cli.min_unique_sources,
        },
    )?;

    info!(path = %package_dir.display(), "Done");
    Ok(())
}

/// The flag wins over the environment; whitespace-only values count as
/// missing. Only this boundary layer ever reads ambient credentials.
fn resolve_api_key(flag: &str, env_value: &str) -> Option<String> {
    let key = if flag.trim().is_empty() { env_value } else { flag };
    let key = key.trim();
    (!key.is_empty()).then(|| key.to_string())
}

fn parse_domain_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}
