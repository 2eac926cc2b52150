use std::time::Duration;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use url::Url;

use crate::errors::TransportError;
use crate::transport::{Transport, TransportResponse};

/// Status reported for a resource read straight from the local filesystem
pub const LOCAL_FILE_STATUS: u16 = 0;

/// Secondary transport, used when the primary one fails.
///
/// Reads file:// resources from disk and reports them with status 0, the
/// convention of legacy request APIs for local loads. Other schemes go over HTTP.
#[derive(Debug)]
pub struct LegacyTransport {
    client: Client,
}

impl LegacyTransport {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
        }
    }

    async fn read_local(url: &Url) -> Result<TransportResponse, TransportError> {
        let path = url
            .to_file_path()
            .map_err(|_| TransportError::InvalidUrl(url.to_string()))?;
        let body = tokio::fs::read_to_string(&path).await?;
        debug!("legacy read {} ({} bytes)", path.display(), body.len());

        Ok(TransportResponse::new(LOCAL_FILE_STATUS, body))
    }
}

#[async_trait]
impl Transport for LegacyTransport {
    fn name(&self) -> &str {
        "legacy"
    }

    async fn fetch(&self, url: &Url) -> Result<TransportResponse, TransportError> {
        if url.scheme() == "file" {
            return Self::read_local(url).await;
        }

        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("legacy {} -> {} ({} bytes)", url, status, body.len());

        Ok(TransportResponse::new(status, body))
    }

    fn accepts(&self, status: u16) -> bool {
        status == 200 || status == LOCAL_FILE_STATUS
    }
}
