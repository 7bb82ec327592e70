//! Access to the upstream JSON metrics endpoint.
//!
//! The upstream is any HTTP endpoint that answers a GET with a JSON
//! object mapping metric names to numbers, e.g. `{"cpu": 0.42, "memory": 256}`.

mod client;
pub(crate) mod error;

pub use client::UpstreamClient;
pub use error::UpstreamError;
