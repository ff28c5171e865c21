//! SmartOps server binary.
//!
//! Boots the diagnostic orchestrator behind the axum API.
//!
//! # Usage
//!
//! ```bash
//! # Default layout: data/, kb/, rules/, logs/ under the working directory
//! cargo run --release
//!
//! # Custom layout
//! cargo run --release -- --port 8080 --data-dir /srv/smartops/data
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: logging level (default: info)
//! - `SMARTOPS_RULES_DIR`: override directory searched first for rules files

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use smartops::agent::backend::OfflineBackend;
use smartops::api::{create_app, ApiState};
use smartops::config::AppConfig;
use smartops::orchestrator::Orchestrator;

#[derive(Parser, Debug)]
#[command(name = "smartops")]
#[command(about = "SmartOps multi-agent industrial diagnostics server")]
#[command(version)]
struct CliArgs {
    /// Port for the HTTP API
    #[arg(long, default_value_t = 5000)]
    port: u16,

    /// Measurement data directory (CSV sources)
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Knowledge-base directory (rule/target YAML files)
    #[arg(long, default_value = "kb")]
    kb_dir: PathBuf,

    /// Secondary rules directory
    #[arg(long, default_value = "rules")]
    rules_dir: PathBuf,

    /// Equipment log directory
    #[arg(long, default_value = "logs")]
    logs_dir: PathBuf,

    /// Override directory searched first for rules files
    #[arg(long, env = "SMARTOPS_RULES_DIR")]
    rules_override_dir: Option<PathBuf>,

    /// Retry budget for rate-limited reasoning calls
    #[arg(long, default_value_t = 2)]
    max_retries: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let config = AppConfig {
        data_dir: args.data_dir,
        kb_dir: args.kb_dir,
        rules_dir: args.rules_dir,
        logs_dir: args.logs_dir,
        rules_override_dir: args.rules_override_dir,
        max_retries: args.max_retries,
    };

    // No model endpoint is wired in this build; the offline backend routes
    // every run through the deterministic local paths.
    let orchestrator = Orchestrator::new(Arc::new(OfflineBackend), config);
    let state = ApiState {
        orchestrator: Arc::new(orchestrator),
    };

    let app = create_app(state);
    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(addr = %addr, "SmartOps API listening");
    axum::serve(listener, app)
        .await
        .context("server terminated unexpectedly")?;

    Ok(())
}
