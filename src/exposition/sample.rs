//! Metric samples decoded from an upstream JSON object.

use crate::upstream::error::json_kind;
use crate::upstream::UpstreamError;
use serde_json::Value;
use std::fmt;

/// A single named value taken from the upstream payload.
///
/// Neither the name nor the value is checked against the exposition
/// grammar. The value is kept as the upstream sent it so that numbers
/// render with their original precision.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    name: String,
    value: Value,
}

impl MetricSample {
    /// Creates a sample from anything convertible to a JSON value.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Metric name, verbatim from the upstream key.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw upstream value.
    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Numeric value, if the upstream sent a number.
    ///
    /// Integers beyond 2^53 are rounded.
    pub fn as_f64(&self) -> Option<f64> {
        self.value.as_f64()
    }

    /// Text written after the name on the sample line.
    pub fn value_text(&self) -> ValueText<'_> {
        ValueText(&self.value)
    }
}

/// Display adapter for a sample value.
///
/// Numbers keep their JSON text (integers exact, floats in shortest
/// round-trip form), strings are written without quotes, and anything
/// else is written as compact JSON.
#[derive(Debug, Clone, Copy)]
pub struct ValueText<'a>(&'a Value);

impl fmt::Display for ValueText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::Number(number) => write!(f, "{number}"),
            Value::String(text) => f.write_str(text),
            other => write!(f, "{other}"),
        }
    }
}

/// Ordered collection of samples, in the order the upstream object listed them.
///
/// Lives for a single scrape only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSet {
    samples: Vec<MetricSample>,
}

impl MetricSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw upstream body.
    ///
    /// Fails if the body is not JSON or is not a JSON object.
    pub fn from_json_bytes(body: &[u8]) -> Result<Self, UpstreamError> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_json_value(value)
    }

    /// Converts an already parsed JSON document.
    pub fn from_json_value(value: Value) -> Result<Self, UpstreamError> {
        match value {
            Value::Object(object) => Ok(object
                .into_iter()
                .map(|(key, value)| MetricSample::new(key, value))
                .collect()),
            other => Err(UpstreamError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }

    /// Appends a sample at the end of the set.
    pub fn push(&mut self, sample: MetricSample) {
        self.samples.push(sample);
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the upstream object had no keys.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterates samples in upstream order.
    pub fn iter(&self) -> std::slice::Iter<'_, MetricSample> {
        self.samples.iter()
    }
}

impl<'a> IntoIterator for &'a MetricSet {
    type Item = &'a MetricSample;
    type IntoIter = std::slice::Iter<'a, MetricSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<MetricSample> for MetricSet {
    fn from_iter<I: IntoIterator<Item = MetricSample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}
