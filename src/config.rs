//! Service configuration.
//!
//! Defaults reproduce the stock deployment: the source serves
//! `{"cpu": 0.42, "memory": 256}` on port 8080 and the adapter converts it
//! on port 9100. A TOML file may override any of it; command-line flags
//! are applied on top by the binary.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// Upstream endpoint polled by a default adapter.
pub const DEFAULT_UPSTREAM_URL: &str = "http://localhost:8080/metrics-json";

/// Configuration for the exposition adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Address the `/metrics` endpoint listens on.
    pub bind_addr: SocketAddr,
    /// JSON endpoint fetched on every scrape.
    pub upstream_url: String,
    /// Upstream request timeout in seconds. Unset means no timeout.
    pub timeout_secs: Option<u64>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            bind_addr: ([0, 0, 0, 0], 9100).into(),
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl AdapterConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.upstream_url()?;
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    /// Parsed upstream URL. Only `http` and `https` are accepted.
    pub fn upstream_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.upstream_url)
            .map_err(|e| ConfigError::InvalidUpstreamUrl(format!("{}: {e}", self.upstream_url)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(ConfigError::InvalidUpstreamUrl(format!(
                "{}: unsupported scheme {scheme}",
                self.upstream_url
            ))),
        }
    }

    /// Upstream request timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Configuration for the JSON metrics source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Address the `/metrics-json` endpoint listens on.
    pub bind_addr: SocketAddr,
    /// Object served verbatim. Key order is kept and values are not checked.
    pub payload: Map<String, Value>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        let mut payload = Map::new();
        payload.insert("cpu".to_string(), json!(0.42));
        payload.insert("memory".to_string(), json!(256));

        Self {
            bind_addr: ([0, 0, 0, 0], 8080).into(),
            payload,
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Upstream URL does not parse or is not http(s).
    #[error("invalid upstream URL {0}")]
    InvalidUpstreamUrl(String),
    /// Timeout of zero seconds.
    #[error("upstream timeout must be at least one second")]
    InvalidTimeout,
    /// Config file could not be read.
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    /// Config file is not valid TOML for [`FileConfig`].
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// `[adapter]` section.
    #[serde(default)]
    pub adapter: AdapterConfig,
    /// `[source]` section.
    #[serde(default)]
    pub source: SourceConfig,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.adapter.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = FileConfig::default();
        assert!(config.adapter.validate().is_ok());
        assert_eq!(config.adapter.bind_addr.port(), 9100);
        assert_eq!(config.source.bind_addr.port(), 8080);
        assert_eq!(config.adapter.timeout(), None);
    }

    #[test]
    fn test_default_payload_order() {
        let source = SourceConfig::default();
        let keys: Vec<&String> = source.payload.keys().collect();
        assert_eq!(keys, vec!["cpu", "memory"]);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = FileConfig::from_toml("").unwrap();
        assert_eq!(config.adapter.upstream_url, DEFAULT_UPSTREAM_URL);
        assert_eq!(config.source.payload.len(), 2);
    }

    #[test]
    fn test_partial_file() {
        let config = FileConfig::from_toml(
            r#"
            [adapter]
            upstream_url = "http://exporter.internal:8080/stats"
            timeout_secs = 5

            [source.payload]
            zeta = 1
            alpha = 2.5
            "#,
        )
        .unwrap();

        assert_eq!(config.adapter.bind_addr.port(), 9100);
        assert_eq!(config.adapter.timeout(), Some(Duration::from_secs(5)));
        let keys: Vec<&String> = config.source.payload.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_bad_upstream_scheme_invalid() {
        let mut config = AdapterConfig::default();
        config.upstream_url = "ftp://localhost/metrics".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidUpstreamUrl(_))
        ));
    }

    #[test]
    fn test_zero_timeout_invalid() {
        let mut config = AdapterConfig::default();
        config.timeout_secs = Some(0);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTimeout)));
    }

    #[test]
    fn test_mixed_payload_accepted() {
        let config = FileConfig::from_toml(
            r#"
            [source.payload]
            up = true
            host = "db-1"
            "#,
        )
        .unwrap();
        assert_eq!(config.source.payload["up"], Value::Bool(true));
        assert_eq!(config.source.payload["host"], json!("db-1"));
    }

    #[test]
    fn test_bad_bind_addr_is_parse_error() {
        let result = FileConfig::from_toml(
            r#"
            [adapter]
            bind_addr = "not-an-address"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
