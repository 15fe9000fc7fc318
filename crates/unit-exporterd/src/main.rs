//! unit-exporterd — the exporter daemon.
//!
//! Single binary that assembles the exporter:
//! - Status client (HTTP over the control Unix socket)
//! - Metric catalog (built once at startup)
//! - Collector
//! - Scrape server (axum)
//!
//! # Usage
//!
//! ```text
//! unit-exporterd --socket /var/run/control.unit.sock --listen 0.0.0.0:9090
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use unit_metrics::{MetricCatalog, UnitCollector};
use unit_status::{DEFAULT_CONTROL_SOCKET, StatusClient, StatusSource};

#[derive(Parser)]
#[command(name = "unit-exporterd", about = "Prometheus exporter for the Unit application server")]
struct Cli {
    /// Path to the control socket.
    #[arg(long, default_value = DEFAULT_CONTROL_SOCKET)]
    socket: PathBuf,

    /// Address to serve scrape requests on.
    #[arg(long, default_value = "0.0.0.0:9090")]
    listen: SocketAddr,

    /// Status fetch timeout in seconds.
    #[arg(long, default_value = "10")]
    timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,unit_exporterd=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    info!(socket = %cli.socket.display(), "unit exporter starting");

    let client = Arc::new(StatusClient::new(
        &cli.socket,
        Duration::from_secs(cli.timeout),
    ));

    // Startup contract: one successful fetch before anything is served.
    // Without the initial application set there is no catalog to build.
    let initial = client.fetch().await.with_context(|| {
        format!(
            "initial status fetch from {} failed",
            cli.socket.display()
        )
    })?;

    let catalog = MetricCatalog::from_snapshot(&initial);
    info!(
        descriptors = catalog.descriptors().len(),
        applications = initial.applications.len(),
        "metric catalog built"
    );

    let collector = Arc::new(UnitCollector::new(catalog, client));

    // ── Start scrape server ────────────────────────────────────
    let router = unit_scrape::build_router(collector);
    let listener = tokio::net::TcpListener::bind(cli.listen).await?;
    info!(addr = %cli.listen, "scrape server starting");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to install CTRL+C handler");
            info!("shutdown signal received");
        })
        .await?;

    info!("unit exporter stopped");
    Ok(())
}
