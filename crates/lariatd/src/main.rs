//! lariatd — the Lariat demo daemon.
//!
//! Single binary that assembles the demo subsystems:
//! - HTTP greeter API
//! - Queue demo (durable subscription + one published greeting)
//! - Image label demo
//! - Distributed-table demo
//! - Relational-table demo
//!
//! # Usage
//!
//! ```text
//! lariatd run --config lariat.toml --port 8080
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sqlx::{MySqlPool, PgPool};
use tokio::sync::watch;
use tracing::{error, info};

use lariat_broker::QueueDemo;
use lariat_core::LariatConfig;
use lariat_store::{DistributedTableDemo, PgReservationStore, RelationalTableDemo};
use lariat_vision::ImageLabelDemo;

#[derive(Parser)]
#[command(name = "lariatd", about = "Lariat demo daemon")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the daemon: HTTP greeter plus all startup demos.
    Run {
        /// Path to a lariat.toml config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on (overrides config).
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,lariatd=debug,lariat=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run { config, port } => run_daemon(config, port).await,
    }
}

async fn run_daemon(
    config_path: Option<PathBuf>,
    port_override: Option<u16>,
) -> anyhow::Result<()> {
    info!("Lariat daemon starting");

    let mut config = LariatConfig::load(config_path.as_deref())?;
    if let Some(port) = port_override {
        config.http.port = port;
    }

    // ── Initialize demo runners ────────────────────────────────

    // Lazy pools: a dead database surfaces inside its runner, not here.
    let pg_pool = PgPool::connect_lazy(&config.distributed_db.url)?;
    let distributed = DistributedTableDemo::new(PgReservationStore::new(pg_pool));
    info!(url = %config.distributed_db.url, "distributed table demo initialized");

    let mysql_pool = MySqlPool::connect_lazy(&config.relational_db.url)?;
    let relational = RelationalTableDemo::new(mysql_pool);
    info!(url = %config.relational_db.url, "relational table demo initialized");

    let vision = ImageLabelDemo::new(
        config.vision.endpoint.clone(),
        config.vision.api_key.clone(),
        config.vision.image_url.clone(),
    );
    info!(image_url = %config.vision.image_url, "image label demo initialized");

    // ── Shutdown signal ────────────────────────────────────────

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let broker_shutdown = shutdown_rx.clone();

    // ── Bind the API listener ──────────────────────────────────

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");

    // ── Start the demos ────────────────────────────────────────
    // Each demo is an independent task; a failure is logged and the
    // rest of the daemon keeps running.

    let broker_url = config.broker.url.clone();
    let broker_handle = tokio::spawn(async move {
        let demo = match QueueDemo::connect(&broker_url).await {
            Ok(demo) => demo,
            Err(e) => {
                error!(error = %e, "queue demo failed");
                return;
            }
        };
        if let Err(e) = demo.run(broker_shutdown).await {
            error!(error = %e, "queue demo failed");
        }
    });

    tokio::spawn(async move {
        if let Err(e) = distributed.run().await {
            error!(error = %e, "distributed table demo failed");
        }
    });

    tokio::spawn(async move {
        if let Err(e) = relational.run().await {
            error!(error = %e, "relational table demo failed");
        }
    });

    tokio::spawn(async move {
        if let Err(e) = vision.run().await {
            error!(error = %e, "image label demo failed");
        }
    });

    // ── Serve until Ctrl-C ─────────────────────────────────────

    let router = lariat_api::build_router(config.http.self_url());

    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
        info!("shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    server.await?;

    // Wait for the standing subscriber.
    let _ = broker_handle.await;

    info!("Lariat daemon stopped");
    Ok(())
}
