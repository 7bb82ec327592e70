//! The exposition adapter: `/metrics` backed by the upstream JSON endpoint.

use super::{bind, health_handler, serve, shutdown_signal, ServerError};
use crate::config::AdapterConfig;
use crate::exposition::{render_error, render_exposition, CONTENT_TYPE};
use crate::metrics::{AdapterMetrics, ScrapeOutcome};
use crate::upstream::UpstreamClient;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Converts the upstream payload into exposition text, one fetch per scrape.
pub struct ExpositionAdapter {
    client: UpstreamClient,
    metrics: AdapterMetrics,
}

impl ExpositionAdapter {
    /// Creates an adapter from its parts.
    pub fn new(client: UpstreamClient, metrics: AdapterMetrics) -> Self {
        Self { client, metrics }
    }

    /// Builds an adapter from configuration.
    pub fn from_config(config: &AdapterConfig) -> Result<Self, ServerError> {
        config.validate()?;
        let client = UpstreamClient::new(config.upstream_url()?, config.timeout())?;
        Ok(Self::new(client, AdapterMetrics::new()?))
    }

    /// Runs one scrape and returns the response body.
    ///
    /// Never fails: any upstream problem yields a `# Error: ...` line
    /// so the scrape target is not marked down on transient errors.
    pub async fn scrape(&self) -> String {
        let started = Instant::now();

        match self.client.fetch().await {
            Ok(set) => {
                self.metrics.record(
                    ScrapeOutcome::Converted { samples: set.len() },
                    started.elapsed(),
                );
                tracing::debug!(samples = set.len(), "Converted upstream payload");
                render_exposition(&set)
            }
            Err(err) => {
                self.metrics.record(ScrapeOutcome::Failed, started.elapsed());
                tracing::warn!(
                    url = %self.client.url(),
                    error = %err,
                    "Upstream scrape failed"
                );
                render_error(&err)
            }
        }
    }

    /// Self-instrumentation shared by every scrape.
    pub fn metrics(&self) -> &AdapterMetrics {
        &self.metrics
    }
}

/// Builds the adapter's routes.
pub fn adapter_router(adapter: Arc<ExpositionAdapter>) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/internal/metrics", get(internal_metrics_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(adapter)
}

/// Adapter server lifecycle.
pub struct AdapterServer {
    config: AdapterConfig,
    adapter: Arc<ExpositionAdapter>,
}

impl AdapterServer {
    /// Creates the server. Nothing is bound until [`run`](Self::run).
    pub fn new(config: AdapterConfig) -> Result<Self, ServerError> {
        let adapter = Arc::new(ExpositionAdapter::from_config(&config)?);
        Ok(Self { config, adapter })
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
        tracing::info!(upstream = %self.adapter.client.url(), "Starting exposition adapter");
        serve("Exposition adapter", listener, adapter_router(self.adapter), shutdown).await
    }
}

/// Handler for the /metrics endpoint.
async fn metrics_handler(State(adapter): State<Arc<ExpositionAdapter>>) -> impl IntoResponse {
    let body = adapter.scrape().await;
    (StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE)], body)
}

/// Handler for the /internal/metrics endpoint.
async fn internal_metrics_handler(
    State(adapter): State<Arc<ExpositionAdapter>>,
) -> impl IntoResponse {
    match adapter.metrics.encode() {
        Ok(output) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            output,
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {}", e),
        ),
    }
}
