/*!
 * Mock transport for testing.
 *
 * - `MockTransport::working(body)` - Always returns the body with status 200
 * - `MockTransport::failing()` - Always fails before any status is known
 * - `MockTransport::status(code)` - Completes with the given status and no body
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use url::Url;

use crate::errors::TransportError;
use crate::transport::{Transport, TransportResponse};

/// Behavior mode for the mock transport
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Returns the body with status 200
    Working { body: String },
    /// Returns the body with status 0, like a local-file load
    Local { body: String },
    /// Completes with a status and an empty body
    Status(u16),
    /// Fails with a request error
    Failing,
}

/// Mock transport that counts how often it is called
#[derive(Debug)]
pub struct MockTransport {
    name: String,
    behavior: MockBehavior,
    accept_local: bool,
    request_count: Arc<AtomicUsize>,
}

impl MockTransport {
    pub fn new(name: impl Into<String>, behavior: MockBehavior) -> Self {
        Self {
            name: name.into(),
            behavior,
            accept_local: false,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn working(body: impl Into<String>) -> Self {
        Self::new("mock", MockBehavior::Working { body: body.into() })
    }

    pub fn local(body: impl Into<String>) -> Self {
        Self::new("mock", MockBehavior::Local { body: body.into() }).accepting_local()
    }

    pub fn failing() -> Self {
        Self::new("mock", MockBehavior::Failing)
    }

    pub fn status(status: u16) -> Self {
        Self::new("mock", MockBehavior::Status(status))
    }

    /// Rename the transport (shows up in logs and error reports)
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Also accept status 0, as the legacy transport does
    pub fn accepting_local(mut self) -> Self {
        self.accept_local = true;
        self
    }

    /// Shared handle on the call counter, still readable after the mock is boxed
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.request_count)
    }

    pub fn call_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, url: &Url) -> Result<TransportResponse, TransportError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Working { body } => Ok(TransportResponse::new(200, body.clone())),
            MockBehavior::Local { body } => Ok(TransportResponse::new(0, body.clone())),
            MockBehavior::Status(status) => Ok(TransportResponse::new(*status, String::new())),
            MockBehavior::Failing => Err(TransportError::RequestFailed(format!(
                "Simulated failure for {}",
                url
            ))),
        }
    }

    fn accepts(&self, status: u16) -> bool {
        (200..300).contains(&status) || (self.accept_local && status == 0)
    }
}
