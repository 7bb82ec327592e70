//! Prometheus text exposition rendering.
//!
//! Every sample is declared a `gauge` with a fixed help text:
//!
//! ```text
//! # HELP <name> Custom metric
//! # TYPE <name> gauge
//! <name> <value>
//! ```

use super::MetricSet;
use crate::upstream::UpstreamError;
use std::fmt::Write;

/// Help text attached to every converted metric.
pub const HELP_TEXT: &str = "Custom metric";

/// Content type of both the exposition body and the error line.
pub const CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Renders a metric set as exposition text.
///
/// Produces three newline-terminated lines per sample, in set order
/// (more only if a string value itself contains newlines). An empty set
/// renders as an empty string.
pub fn render_exposition(set: &MetricSet) -> String {
    let mut output = String::with_capacity(set.len() * 64);

    for sample in set {
        let name = sample.name();
        // Writing to a String cannot fail
        let _ = writeln!(output, "# HELP {name} {HELP_TEXT}");
        let _ = writeln!(output, "# TYPE {name} gauge");
        let _ = writeln!(output, "{name} {}", sample.value_text());
    }

    output
}

/// Renders the single comment line returned in place of exposition text.
pub fn render_error(err: &UpstreamError) -> String {
    format!("# Error: {err}")
}
