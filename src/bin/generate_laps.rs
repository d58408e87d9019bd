//! Write the flat per-lap export for the static frontend.
//!
//! Defaults to the 2024 Bahrain Grand Prix race and `../public/telemetry.json`.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use paddock::config::{DEFAULT_BASE_URL, DEFAULT_CACHE_DIR};
use paddock::export::{DEFAULT_EXPORT_PATH, write_lap_export};
use paddock::{Paddock, ProviderConfig, SessionId, SessionKind};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate the per-lap JSON export", long_about = None)]
struct Args {
    /// Championship year
    #[arg(long, default_value_t = SessionId::BAHRAIN_2024.season)]
    season: u16,

    /// Round number, pre-season testing excluded
    #[arg(long, default_value_t = SessionId::BAHRAIN_2024.round)]
    round: u8,

    /// Session: FP1, FP2, FP3, SQ, S, Q or R
    #[arg(long, default_value = "R")]
    session: SessionKind,

    /// Output file
    #[arg(short, long, default_value = DEFAULT_EXPORT_PATH)]
    output: PathBuf,

    /// Directory for cached OpenF1 responses
    #[arg(long, env = "PADDOCK_CACHE_DIR", default_value = DEFAULT_CACHE_DIR)]
    cache_dir: PathBuf,

    /// OpenF1 API root
    #[arg(long, env = "OPENF1_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "PADDOCK_HTTP_TIMEOUT_SECS", default_value_t = 60)]
    timeout_secs: u64,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("paddock=info")),
        )
        .init();

    let id = SessionId::new(args.season, args.round, args.session);
    let config = ProviderConfig::default()
        .with_base_url(args.base_url)
        .with_cache_dir(args.cache_dir)
        .with_timeout(Duration::from_secs(args.timeout_secs));

    let provider = Paddock::openf1(&config).await.context("failed to set up OpenF1 provider")?;
    let records = Paddock::lap_export(&provider, &id)
        .await
        .with_context(|| format!("failed to load session {id}"))?;

    write_lap_export(&args.output, &records)
        .await
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!("{} data generated ({} laps)", id, records.len());
    Ok(())
}
