//! Pump Inspector - token page risk report from the command line
//!
//! Reads a `PageData` JSON file (or a captured page snapshot), runs one
//! analysis against the risk API and prints the HTML report or the JSON
//! result. Exit code 2 means the account lacks the membership the API requires.

use clap::Parser;
use eyre::{Result, WrapErr};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pump_inspector::utils::constants::{APP_NAME, APP_VERSION};
use pump_inspector::{
    extract_page_data, render, render_contract_info, render_failure, CapturedPage, PageData,
    RiskApiClient, RuleEngine,
};

/// Exit code for the membership (entitlement) error
const EXIT_NEED_VIP: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "pump_inspector")]
#[command(about = "Risk report for a token page", long_about = None)]
struct Cli {
    /// PageData JSON file
    #[arg(required_unless_present = "captured", conflicts_with = "captured")]
    page: Option<PathBuf>,

    /// Captured page snapshot (`{url, values, failed}`) to extract first
    #[arg(long)]
    captured: Option<PathBuf>,

    /// Print the analysis result as JSON instead of HTML
    #[arg(long)]
    json: bool,
}

async fn load_page(cli: &Cli) -> Result<PageData> {
    if let Some(path) = &cli.captured {
        let raw = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        let snapshot: CapturedPage = serde_json::from_str(&raw)?;
        return Ok(extract_page_data(&snapshot).await?);
    }

    let path = cli
        .page
        .as_ref()
        .ok_or_else(|| eyre::eyre!("No page file given"))?;
    let raw = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    Ok(serde_json::from_str(&raw)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    info!("🚀 {} v{}", APP_NAME, APP_VERSION);

    let page = load_page(&cli).await?;
    if !page.has_any_valid_data() {
        warn!("⚠️ Page carries no usable fields, every check will be skipped");
    }

    let engine = RuleEngine::new(RiskApiClient::from_env()?);

    match engine.analyze(&page).await {
        Ok(result) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", render_contract_info(&page));
                println!("{}", render(&result));
            }
            Ok(())
        }
        Err(e) if e.is_fatal() => {
            eprintln!("❌ {}", e);
            println!("{}", render_failure(&e));
            std::process::exit(EXIT_NEED_VIP);
        }
        Err(e) => Err(e.into()),
    }
}
