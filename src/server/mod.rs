//! HTTP servers for the adapter and the JSON source.
//!
//! Each service is an explicit server object built from its config at
//! startup. `run` binds, serves, and returns once a shutdown signal
//! (Ctrl+C or SIGTERM) has drained in-flight requests.

mod adapter;
mod source;

pub use adapter::{adapter_router, AdapterServer, ExpositionAdapter};
pub use source::{source_router, SourceServer};

use crate::config::ConfigError;
use crate::metrics::MetricsError;
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;

/// Errors that can occur while starting or running a server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listen address could not be bound.
    #[error("failed to bind to address {addr}: {source}")]
    Bind {
        /// Address that was requested.
        addr: SocketAddr,
        /// Underlying socket error.
        source: std::io::Error,
    },

    /// Configuration rejected at startup.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The upstream HTTP client could not be built.
    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    /// The self-instrumentation registry could not be built.
    #[error("failed to set up metrics: {0}")]
    Metrics(#[from] MetricsError),

    /// Failure after the listener was bound.
    #[error("server error: {0}")]
    Server(String),
}

/// Binds `addr`, reporting failures as [`ServerError::Bind`].
pub(crate) async fn bind(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

/// Serves `app` on `listener` until `shutdown` resolves.
pub(crate) async fn serve<F>(
    name: &'static str,
    listener: TcpListener,
    app: Router,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener
        .local_addr()
        .map_err(|e| ServerError::Server(format!("listener address unavailable: {e}")))?;
    tracing::info!(%addr, "{name} listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    tracing::info!(%addr, "{name} stopped");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
    tracing::info!("Signal received, starting graceful shutdown");
}

/// Handler for the /health endpoint.
pub(crate) async fn health_handler() -> &'static str {
    "OK"
}
