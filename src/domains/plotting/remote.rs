//! Remote rendering through the Desmos HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use super::error::RemoteError;
use super::range::PlotRange;

/// Renders a formula on a remote service.
///
/// A failed attempt yields `None`; the caller decides what to do next.
#[async_trait]
pub trait RemoteRenderer: Send + Sync {
    async fn render(&self, formula: &str, x_range: PlotRange, y_range: Option<PlotRange>)
    -> Option<Vec<u8>>;
}

#[derive(Debug, Serialize)]
struct PlotPayload<'a> {
    formula: &'a str,
    x_range: [f64; 2],
    y_range: Option<[f64; 2]>,
    format: &'static str,
}

/// HTTP client for the Desmos plot endpoint.
///
/// Holds only read-only state and is shared between concurrent requests.
pub struct DesmosClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl DesmosClient {
    /// Build a client. An empty or missing key makes the client unavailable.
    pub fn new(api_key: Option<&str>, base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let api_key = api_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(RemoteError::MissingCredential)?;

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/plot", base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for DesmosClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesmosClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl RemoteRenderer for DesmosClient {
    async fn render(
        &self,
        formula: &str,
        x_range: PlotRange,
        y_range: Option<PlotRange>,
    ) -> Option<Vec<u8>> {
        let payload = PlotPayload {
            formula,
            x_range: x_range.as_pair(),
            y_range: y_range.map(|r| r.as_pair()),
            format: "png",
        };
        debug!("POST {} for '{}'", self.endpoint, formula);

        let response = match self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Error connecting to Desmos API: {}", e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Desmos API returned an error: {} {}", status, body);
            return None;
        }

        match response.bytes().await {
            Ok(bytes) => Some(bytes.to_vec()),
            Err(e) => {
                warn!("Failed to read Desmos API response: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.desmos.com/api/v1.11/";

    #[test]
    fn test_requires_credential() {
        let timeout = Duration::from_secs(15);
        assert!(matches!(
            DesmosClient::new(None, BASE, timeout),
            Err(RemoteError::MissingCredential)
        ));
        assert!(matches!(
            DesmosClient::new(Some("   "), BASE, timeout),
            Err(RemoteError::MissingCredential)
        ));
        assert!(DesmosClient::new(Some("key"), BASE, timeout).is_ok());
    }

    #[test]
    fn test_endpoint_and_redaction() {
        let client = DesmosClient::new(Some("secret"), BASE, Duration::from_secs(1)).unwrap();
        assert_eq!(client.endpoint(), "https://www.desmos.com/api/v1.11/plot");
        assert!(!format!("{:?}", client).contains("secret"));
    }

    #[test]
    fn test_payload_shape() {
        let payload = PlotPayload {
            formula: "x^2",
            x_range: [-10.0, 10.0],
            y_range: None,
            format: "png",
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "formula": "x^2",
                "x_range": [-10.0, 10.0],
                "y_range": null,
                "format": "png"
            })
        );
    }

    #[tokio::test]
    async fn test_connection_failure_yields_none() {
        let client =
            DesmosClient::new(Some("key"), "http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let image = client.render("x", PlotRange::default(), None).await;
        assert!(image.is_none());
    }

    // Network test (requires a real key in DESMOS_API_KEY, run with --ignored)
    #[ignore]
    #[tokio::test]
    async fn test_real_api() {
        let key = std::env::var("DESMOS_API_KEY").ok();
        let client = DesmosClient::new(key.as_deref(), BASE, Duration::from_secs(15)).unwrap();
        let image = client.render("sin(x)", PlotRange::default(), None).await;
        assert!(image.is_some());
    }
}
