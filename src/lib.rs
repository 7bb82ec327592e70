//! JSON to Prometheus exposition adapter.
//!
//! Polls an HTTP endpoint returning a flat JSON object of metric values
//! and re-exposes it in the Prometheus text format. A small companion
//! service serving such an object is included.
//!
//! # Architecture
//!
//! ```text
//! GET /metrics → upstream fetch → MetricSet → exposition text
//!                      ↓ (any failure)
//!               "# Error: <message>"  (still HTTP 200)
//! ```
//!
//! # Design Principles
//!
//! - **Stateless**: every scrape performs exactly one upstream request
//! - **All-or-nothing**: a payload either converts fully or yields one error line
//! - **Never hard-fails**: the scrape endpoint always answers 200
//! - **Verbatim names**: upstream keys become metric names unchanged
//!
//! # Example
//!
//! ```no_run
//! use json_exposition::{config::AdapterConfig, server::AdapterServer};
//!
//! # async fn run() -> Result<(), json_exposition::server::ServerError> {
//! let server = AdapterServer::new(AdapterConfig::default())?;
//! server.run().await
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod config;
pub mod exposition;
pub mod metrics;
pub mod server;
pub mod upstream;

// Re-export commonly used types at crate root
pub use config::{AdapterConfig, FileConfig, SourceConfig};
pub use exposition::{render_error, render_exposition, MetricSample, MetricSet};
pub use server::{AdapterServer, ExpositionAdapter, SourceServer};
pub use upstream::{UpstreamClient, UpstreamError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
