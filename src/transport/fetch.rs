use std::time::Duration;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use url::Url;

use crate::errors::TransportError;
use crate::transport::{Transport, TransportResponse};

/// Primary transport: a plain HTTP GET through reqwest.
///
/// Like a browser `fetch`, it refuses resources on a file:// origin and only
/// treats 2xx statuses as success.
#[derive(Debug)]
pub struct FetchTransport {
    /// HTTP client for requests
    client: Client,
}

impl FetchTransport {
    /// Create a new fetch transport with the given request timeout
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl Transport for FetchTransport {
    fn name(&self) -> &str {
        "fetch"
    }

    async fn fetch(&self, url: &Url) -> Result<TransportResponse, TransportError> {
        if url.scheme() == "file" {
            return Err(TransportError::Blocked {
                scheme: url.scheme().to_string(),
            });
        }

        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("fetch {} -> {} ({} bytes)", url, status, body.len());

        Ok(TransportResponse::new(status, body))
    }

    fn accepts(&self, status: u16) -> bool {
        (200..300).contains(&status)
    }
}
