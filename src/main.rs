//! Versioned documentation server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ─────────────────▶ request id / trace / timeout layers
//!                            │
//!                            ▼
//!                   ┌──────────────────┐   error response?   ┌───────────────────┐
//!                   │  handle_errors   │ ──────────────────▶ │ fallback resolver │
//!                   └────────┬─────────┘                     │ redirect / 404 /  │
//!                            │                               │ passthrough       │
//!                            ▼                               └───────────────────┘
//!                   ┌──────────────────┐
//!                   │   init_context   │  versions (+ local in debug), config
//!                   └────────┬─────────┘
//!                            ▼
//!                   ┌──────────────────┐      ┌───────────────┐
//!                   │ dispatch (Route) │ ───▶ │ content store │
//!                   └────────┬─────────┘      └───────────────┘
//!                            ▼
//!                   ┌──────────────────┐
//!                   │     renderer     │
//!                   └──────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use docs_server::config::{load_config, ConfigWatcher, DocsConfig};
use docs_server::observability::{logging, metrics};
use docs_server::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "docs-server")]
#[command(about = "Serve versioned product documentation", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => DocsConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!("docs-server v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        content_root = %config.content.root,
        default_version = %config.site.default_version,
        debug = config.site.debug,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // The watcher must outlive the server for reloads to keep arriving.
    let (_watcher, config_updates) = match &cli.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            match watcher.run() {
                Ok(handle) => (Some(handle), updates),
                Err(e) => {
                    tracing::warn!(error = %e, "Config hot reload disabled");
                    (None, updates)
                }
            }
        }
        None => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
