use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use clap::Parser;

use drivepick::remote::types::FILES_PATH;
use drivepick::remote::{MemoryDrive, TreeFixture};

#[path = "listing_server/http_error.rs"]
mod http_error;
#[path = "listing_server/handlers.rs"]
mod handlers;
use self::handlers::{call_stats, healthz, list_files};

#[derive(Parser)]
#[command(name = "drivepick-listing-server")]
#[command(about = "Drive-compatible listing server backed by a fixture tree (development)", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// JSON fixture describing the drive
    #[arg(long)]
    tree: PathBuf,

    /// Bearer token clients must present
    #[arg(long, default_value = "dev")]
    token: String,

    /// Upper bound on entries per page, regardless of what clients ask for
    #[arg(long)]
    max_page_size: Option<usize>,
}

#[derive(Clone)]
struct AppState {
    drive: Arc<MemoryDrive>,
    token: String,
    max_page_size: Option<usize>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    let fixture = TreeFixture::load(&args.tree)?;
    let state = Arc::new(AppState {
        drive: Arc::new(MemoryDrive::from_fixture(&fixture)),
        token: args.token,
        max_page_size: args.max_page_size,
    });

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route(FILES_PATH, get(list_files))
        .route("/stats/calls", get(call_stats))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;

    let local_addr = listener.local_addr().context("read listener local addr")?;
    tracing::info!(%local_addr, "listing server ready");

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
