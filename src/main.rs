//! Paddock telemetry server.
//!
//! Loads the 2024 Bahrain Grand Prix race once, then serves the snapshot on
//! `GET /telemetry` until interrupted.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use paddock::config::{DEFAULT_BASE_URL, DEFAULT_CACHE_DIR};
use paddock::{Paddock, ProviderConfig, SessionId, server};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "PADDOCK_BIND", default_value = "0.0.0.0:8000")]
    bind: SocketAddr,

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
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("paddock=info,tower_http=info")),
        )
        .init();

    info!("Starting paddock v{}", env!("CARGO_PKG_VERSION"));

    let config = ProviderConfig::default()
        .with_base_url(args.base_url)
        .with_cache_dir(args.cache_dir)
        .with_timeout(Duration::from_secs(args.timeout_secs));

    // The snapshot is complete before the listener exists.
    let provider = Paddock::openf1(&config).await.context("failed to set up OpenF1 provider")?;
    let snapshot = Paddock::snapshot(&provider, &SessionId::BAHRAIN_2024)
        .await
        .with_context(|| format!("failed to load session {}", SessionId::BAHRAIN_2024))?;

    let app = server::router(Arc::new(snapshot));

    let listener =
        TcpListener::bind(args.bind).await.with_context(|| format!("failed to bind {}", args.bind))?;
    info!("Serving {} on http://{}", server::TELEMETRY_ROUTE, args.bind);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
