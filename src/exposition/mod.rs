//! JSON to Prometheus exposition conversion.
//!
//! The conversion is all-or-nothing: either the whole upstream object
//! turns into exposition text, or the caller gets an [`UpstreamError`]
//! and renders a single error comment instead.
//!
//! ```
//! use json_exposition::exposition::{render_exposition, MetricSet};
//!
//! let set = MetricSet::from_json_bytes(br#"{"cpu": 0.42}"#).unwrap();
//! assert_eq!(
//!     render_exposition(&set),
//!     "# HELP cpu Custom metric\n# TYPE cpu gauge\ncpu 0.42\n"
//! );
//! ```
//!
//! [`UpstreamError`]: crate::upstream::UpstreamError

mod render;
mod sample;

pub use render::{render_error, render_exposition, CONTENT_TYPE, HELP_TEXT};
pub use sample::{MetricSample, MetricSet, ValueText};
