use log::{debug, info, warn};
use url::Url;

use crate::caption_track::CaptionTrack;
use crate::errors::CaptionError;
use crate::transport::{FetchTransport, LegacyTransport, Transport};

// @module: Caption loading through an ordered chain of transports

/// Loads caption tracks by trying each transport in order.
///
/// The first transport that returns an accepted status wins and its body is
/// parsed. A transport error or a rejected status moves on to the next one.
/// Each transport is tried at most once per load.
#[derive(Debug)]
pub struct CaptionLoader {
    transports: Vec<Box<dyn Transport>>,
}

impl CaptionLoader {
    /// Build a loader from transports in the order they should be tried
    pub fn new(transports: Vec<Box<dyn Transport>>) -> Self {
        Self { transports }
    }

    /// Fetch first, then the legacy transport that can read local files
    pub fn with_default_chain(timeout_secs: u64) -> Self {
        Self::new(vec![
            Box::new(FetchTransport::new(timeout_secs)),
            Box::new(LegacyTransport::new(timeout_secs)),
        ])
    }

    pub fn transport_names(&self) -> Vec<&str> {
        self.transports.iter().map(|t| t.name()).collect()
    }

    /// Load and parse the caption resource at `url`
    pub async fn load(&self, url: &Url) -> Result<CaptionTrack, CaptionError> {
        if self.transports.is_empty() {
            return Err(CaptionError::NoTransports);
        }

        let mut attempts = Vec::with_capacity(self.transports.len());

        for (index, transport) in self.transports.iter().enumerate() {
            debug!("Loading captions from {} via {}", url, transport.name());

            let failure = match transport.fetch(url).await {
                Ok(response) if transport.accepts(response.status) => {
                    let track = CaptionTrack::parse(&response.body);
                    info!(
                        "Loaded {} caption cue(s) via {} (status {})",
                        track.len(),
                        transport.name(),
                        response.status
                    );
                    return Ok(track);
                }
                Ok(response) => format!("{}: unexpected status {}", transport.name(), response.status),
                Err(e) => format!("{}: {}", transport.name(), e),
            };

            if index + 1 < self.transports.len() {
                warn!("Caption transport failed ({}), falling back", failure);
            }
            attempts.push(failure);
        }

        Err(CaptionError::Unavailable { attempts })
    }
}
