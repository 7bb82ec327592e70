//! The JSON metrics source: serves a fixed object on `/metrics-json`.

use super::{bind, health_handler, serve, shutdown_signal, ServerError};
use crate::config::SourceConfig;
use axum::{extract::State, routing::get, Json, Router};
use serde_json::{Map, Value};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builds the source's routes around a fixed payload.
pub fn source_router(payload: Map<String, Value>) -> Router {
    Router::new()
        .route("/metrics-json", get(metrics_json_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(Value::Object(payload)))
}

/// Source server lifecycle.
pub struct SourceServer {
    config: SourceConfig,
}

impl SourceServer {
    /// Creates the server. Nothing is bound until [`run`](Self::run).
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    /// Binds the configured address and serves until a shutdown signal.
    pub async fn run(self) -> Result<(), ServerError> {
        let listener = bind(self.config.bind_addr).await?;
        self.run_on(listener, shutdown_signal()).await
    }

    /// Serves on an already bound listener until `shutdown` resolves.
    pub async fn run_on<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!(metrics = self.config.payload.len(), "Starting metrics source");
        serve("Metrics source", listener, source_router(self.config.payload), shutdown).await
    }
}

/// Handler for the /metrics-json endpoint.
async fn metrics_json_handler(State(payload): State<Arc<Value>>) -> Json<Value> {
    Json(payload.as_ref().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_on_taken_port_is_bind_error() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap();

        let config = SourceConfig {
            bind_addr: addr,
            ..Default::default()
        };
        match SourceServer::new(config).run().await {
            Err(ServerError::Bind { addr: reported, .. }) => assert_eq!(reported, addr),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_bind_error_names_address() {
        let err = ServerError::Bind {
            addr: ([127, 0, 0, 1], 8080).into(),
            source: std::io::Error::from(std::io::ErrorKind::AddrInUse),
        };
        assert!(err.to_string().starts_with("failed to bind to address 127.0.0.1:8080: "));
    }

    #[test]
    fn test_server_error_does_not_claim_bind() {
        let err = ServerError::Server("listener address unavailable: gone".into());
        assert_eq!(err.to_string(), "server error: listener address unavailable: gone");
    }
}
