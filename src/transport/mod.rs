/*!
 * Transport implementations for fetching caption resources.
 *
 * Each transport is one strategy in the loader's fallback chain:
 * - Fetch: promise-style HTTP client, refused on file:// origins
 * - Legacy: older request path that also reads local files (status 0)
 * - Mock: scripted transport for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;
use url::Url;

use crate::errors::TransportError;

/// Status plus body returned by a transport
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status, or 0 for a local-file load
    pub status: u16,

    /// Response body as text
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Common trait for all caption transports
///
/// A transport only moves bytes. Deciding whether a status counts as success is
/// left to [`Transport::accepts`] so that each strategy keeps its own convention.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Short name used in logs and error reports
    fn name(&self) -> &str;

    /// Retrieve the resource at `url`
    ///
    /// # Returns
    /// * `Result<TransportResponse, TransportError>` - Status and body, or an error
    ///   when nothing could be retrieved at all
    async fn fetch(&self, url: &Url) -> Result<TransportResponse, TransportError>;

    /// Whether `status` counts as a successful load for this transport
    fn accepts(&self, status: u16) -> bool;
}

pub mod fetch;
pub mod legacy;
pub mod mock;

pub use fetch::FetchTransport;
pub use legacy::LegacyTransport;
pub use mock::{MockBehavior, MockTransport};
