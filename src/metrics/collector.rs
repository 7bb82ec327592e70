//! Adapter self-instrumentation registry.

use prometheus::{Encoder, Gauge, IntCounter, IntGauge, Registry, TextEncoder};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Registration or encoding failed inside `prometheus`.
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// Result of one scrape, as seen by the instrumentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrapeOutcome {
    /// Conversion succeeded with this many samples.
    Converted {
        /// Samples in the converted set.
        samples: usize,
    },
    /// The error line was returned.
    Failed,
}

/// Prometheus registry describing the adapter's own behavior.
///
/// Kept apart from the converted upstream metrics, which never pass
/// through a registry.
#[derive(Clone)]
pub struct AdapterMetrics {
    registry: Registry,

    scrapes_total: IntCounter,
    upstream_errors_total: IntCounter,
    last_scrape_samples: IntGauge,
    last_scrape_duration: Gauge,
}

impl AdapterMetrics {
    /// Creates a registry with all adapter metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let scrapes_total = IntCounter::new(
            "exposition_adapter_scrapes_total",
            "Total number of scrape requests handled",
        )?;
        let upstream_errors_total = IntCounter::new(
            "exposition_adapter_upstream_errors_total",
            "Scrapes answered with an error line",
        )?;
        let last_scrape_samples = IntGauge::new(
            "exposition_adapter_last_scrape_samples",
            "Samples converted by the last successful scrape",
        )?;
        let last_scrape_duration = Gauge::new(
            "exposition_adapter_last_scrape_duration_seconds",
            "Wall time of the last scrape in seconds",
        )?;

        registry.register(Box::new(scrapes_total.clone()))?;
        registry.register(Box::new(upstream_errors_total.clone()))?;
        registry.register(Box::new(last_scrape_samples.clone()))?;
        registry.register(Box::new(last_scrape_duration.clone()))?;

        Ok(Self {
            registry,
            scrapes_total,
            upstream_errors_total,
            last_scrape_samples,
            last_scrape_duration,
        })
    }

    /// Records one finished scrape.
    pub fn record(&self, outcome: ScrapeOutcome, elapsed: Duration) {
        self.scrapes_total.inc();
        self.last_scrape_duration.set(elapsed.as_secs_f64());

        match outcome {
            ScrapeOutcome::Converted { samples } => {
                self.last_scrape_samples.set(samples as i64);
            }
            ScrapeOutcome::Failed => self.upstream_errors_total.inc(),
        }
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
