//! JSON Exposition CLI
//!
//! Runs either the exposition adapter or the JSON metrics source.

use clap::{Parser, Subcommand};
use json_exposition::{
    config::FileConfig,
    server::{AdapterServer, ServerError, SourceServer},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "json-exposition", version, about)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve upstream JSON as Prometheus exposition text on /metrics.
    Adapter {
        /// Listen address (default 0.0.0.0:9100).
        #[arg(long)]
        bind: Option<SocketAddr>,

        /// Upstream JSON endpoint.
        #[arg(long)]
        upstream: Option<String>,
    },
    /// Serve the fixed JSON payload on /metrics-json.
    Source {
        /// Listen address (default 0.0.0.0:8080).
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    info!("JSON Exposition v{}", json_exposition::VERSION);

    if let Err(e) = run(cli).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ServerError> {
    let mut config = match &cli.config {
        Some(path) => {
            info!(path = %path.display(), "Loading configuration");
            FileConfig::from_file(path)?
        }
        None => FileConfig::default(),
    };

    match cli.command {
        Command::Adapter { bind, upstream } => {
            if let Some(bind) = bind {
                config.adapter.bind_addr = bind;
            }
            if let Some(upstream) = upstream {
                config.adapter.upstream_url = upstream;
            }
            AdapterServer::new(config.adapter)?.run().await
        }
        Command::Source { bind } => {
            if let Some(bind) = bind {
                config.source.bind_addr = bind;
            }
            SourceServer::new(config.source).run().await
        }
    }
}
