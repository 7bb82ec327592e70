//! Errors raised while fetching and interpreting the upstream payload.

use thiserror::Error;

/// Everything that can go wrong between issuing the upstream request
/// and holding a usable [`MetricSet`](crate::exposition::MetricSet).
///
/// A scrape treats every variant the same way: the response body becomes
/// a single `# Error: <message>` line.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Transport-level failure (connection refused, DNS, timeout, ...).
    #[error("request to upstream failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Body could not be parsed as JSON.
    #[error("upstream body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Body is JSON, but not an object.
    #[error("upstream JSON is not an object (found {found})")]
    NotAnObject {
        /// Kind of JSON value received instead.
        found: &'static str,
    },
}

/// Short name of a JSON value's type, for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_an_object_message() {
        let err = UpstreamError::NotAnObject {
            found: json_kind(&json!([1, 2])),
        };
        assert_eq!(err.to_string(), "upstream JSON is not an object (found array)");
    }
}
