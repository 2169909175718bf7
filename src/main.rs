//! SOLARIS-OS - Solar Observatory Intelligence System
//!
//! Staged space-weather acquisition service with an AI mission advisor.
//!
//! # Usage
//!
//! ```bash
//! # Run the dashboard service on the default address
//! cargo run --release
//!
//! # Override the bind address
//! cargo run --release -- --addr 127.0.0.1:9090
//! ```
//!
//! # Environment Variables
//!
//! - `SOLARIS_CONFIG`: Path to a TOML config file (default: ./solaris.toml)
//! - `GEMINI_API_KEY`: Generative-AI API key (overrides the TOML value)
//! - `RUST_LOG`: Logging level (default: info)

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use solaris_os::acquisition::{AcquisitionEngine, NoaaXrayFeed};
use solaris_os::advisor::{AdvisorSession, GeminiBackend};
use solaris_os::api::{create_app, DashboardState};
use solaris_os::config::{self, ObservatoryConfig};
use solaris_os::forecast::ForecastService;
use solaris_os::mission::MissionPlanner;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "solaris-os")]
#[command(about = "SOLARIS-OS Solar Observatory Intelligence System")]
#[command(version)]
struct CliArgs {
    /// Override the server address (default: "0.0.0.0:8080")
    #[arg(short, long)]
    addr: Option<String>,

    /// Generative-AI API key (overrides config and GEMINI_API_KEY)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

// ============================================================================
// Startup
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();

    let mut cfg = ObservatoryConfig::load();
    if let Some(key) = args.api_key {
        cfg.advisor.api_key = key;
    }
    if cfg.advisor.api_key.is_empty() {
        warn!("No advisor API key configured; advisor endpoints will fail upstream");
    }

    let addr = args.addr.unwrap_or_else(|| cfg.server.addr.clone());
    config::init(cfg);
    let cfg = config::get();

    // One shared backend handle, injected into every consumer.
    let backend = Arc::new(GeminiBackend::new(
        &cfg.advisor.base_url,
        &cfg.advisor.api_key,
        &cfg.advisor.model,
    ));
    let feed = Arc::new(NoaaXrayFeed::new(
        &cfg.feeds.xray_url,
        cfg.feeds.xray_sample_stride,
    ));

    let state = DashboardState {
        engine: AcquisitionEngine::new(feed),
        session: AdvisorSession::new(backend.clone()),
        forecast: ForecastService::new(backend.clone()),
        mission: MissionPlanner::new(backend),
        started_at: Instant::now(),
    };

    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(addr = %addr, "SOLARIS-OS dashboard listening");

    let shutdown = CancellationToken::new();
    let shutdown_signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            shutdown_signal.cancel();
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("server error")?;

    info!("SOLARIS-OS stopped");
    Ok(())
}
