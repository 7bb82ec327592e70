//! Self-instrumentation for the exposition adapter.
//!
//! Exposed on `/internal/metrics`, separate from the converted output.
//!
//! # Metrics Exposed
//!
//! - `exposition_adapter_scrapes_total` - Scrape requests handled
//! - `exposition_adapter_upstream_errors_total` - Scrapes answered with an error line
//! - `exposition_adapter_last_scrape_samples` - Samples in the last successful scrape
//! - `exposition_adapter_last_scrape_duration_seconds` - Wall time of the last scrape
//!
//! # Example
//!
//! ```
//! use json_exposition::metrics::{AdapterMetrics, ScrapeOutcome};
//! use std::time::Duration;
//!
//! let metrics = AdapterMetrics::new().expect("Failed to create registry");
//! metrics.record(ScrapeOutcome::Converted { samples: 2 }, Duration::from_millis(3));
//!
//! let text = metrics.encode().unwrap();
//! assert!(text.contains("exposition_adapter_scrapes_total 1"));
//! ```

mod collector;

pub use collector::{AdapterMetrics, MetricsError, ScrapeOutcome};
