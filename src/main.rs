//! Island demo server.
//!
//! Serves the greeting islands on the configured address until Ctrl+C or
//! SIGTERM.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use oasis::config::{load_config, OasisConfig};
use oasis::observability::{logging, metrics};
use oasis::{greeting, lifecycle, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "oasis")]
#[command(about = "Serve island endpoints", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => OasisConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!("oasis v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Registration errors are programming defects; refuse to start.
    let islands = greeting::router(greeting::system_clock())?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    lifecycle::signals::spawn_signal_watcher(shutdown);

    HttpServer::new(config, islands).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
