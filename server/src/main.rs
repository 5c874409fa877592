//! SharedBoard server
//!
//! Serves one shared board to any number of WebSocket clients and keeps it
//! checkpointed in SQLite when a database path is given.
//!
//! Usage:
//!   sharedboard-server --port 3000 --database board.db
//!
//! Without `--database` (or when the database cannot be opened) the board
//! lives in memory only and is lost on restart.

use anyhow::{Context, Result};
use clap::Parser;
use sharedboard_server::{AppState, build_router};
use sharedboard_storage::{SnapshotStore, SqliteSnapshotStore};
use sharedboard_sync::{BoardHub, Checkpointer, HubConfig, Variant, load_initial_state};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "sharedboard-server")]
#[command(about = "Real-time shared chess board server")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// SQLite file for board checkpoints; in-memory only when absent
    #[arg(short, long, env = "DATABASE_PATH")]
    database: Option<PathBuf>,

    /// Layout for a fresh board and for resets that name none
    #[arg(long, default_value = "standard")]
    variant: Variant,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn open_store(path: Option<&PathBuf>) -> Option<Arc<dyn SnapshotStore>> {
    let path = path?;
    match SqliteSnapshotStore::open(path) {
        Ok(store) => {
            info!("Checkpointing board to {:?}", path);
            Some(Arc::new(store))
        }
        Err(e) => {
            warn!("Failed to open database {:?}, running without persistence: {}", path, e);
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with_target(false)
        .compact()
        .init();

    info!("SharedBoard server starting...");

    let store = open_store(args.database.as_ref());
    let state = load_initial_state(store.as_deref(), args.variant).await;
    let checkpointer = store.map(Checkpointer::new).unwrap_or_default();

    let hub = BoardHub::new(
        state,
        checkpointer,
        HubConfig {
            default_variant: args.variant,
            ..HubConfig::default()
        },
    )
    .spawn();

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on {}", listener.local_addr()?);

    let app = build_router(AppState { hub });
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("HTTP server failed")?;

    Ok(())
}
