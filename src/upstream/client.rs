//! HTTP client for the upstream JSON endpoint.

use super::UpstreamError;
use crate::exposition::MetricSet;
use reqwest::{Client, Url};
use std::time::Duration;

/// Fetches the metrics object from a single fixed URL.
///
/// One request per [`fetch`](Self::fetch) call. No caching, no retries.
/// The response status is not inspected; only the body matters.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    url: Url,
}

impl UpstreamClient {
    /// Builds a client for `url`.
    ///
    /// `timeout` of `None` leaves the request unbounded.
    pub fn new(url: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url,
        })
    }

    /// Returns the upstream URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Performs one GET and decodes the body into a [`MetricSet`].
    pub async fn fetch(&self) -> Result<MetricSet, UpstreamError> {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        tracing::debug!(
            url = %self.url,
            %status,
            bytes = body.len(),
            "Fetched upstream payload"
        );

        MetricSet::from_json_bytes(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_keeps_url() {
        let url: Url = "http://localhost:8080/metrics-json".parse().unwrap();
        let client = UpstreamClient::new(url.clone(), None).unwrap();
        assert_eq!(client.url(), &url);
    }

    #[tokio::test]
    async fn test_fetch_unreachable_is_request_error() {
        // Port 9 (discard) is not expected to be listening on loopback
        let url: Url = "http://127.0.0.1:9/metrics-json".parse().unwrap();
        let client = UpstreamClient::new(url, Some(Duration::from_secs(2))).unwrap();
        assert!(matches!(
            client.fetch().await,
            Err(UpstreamError::Request(_))
        ));
    }
}
