use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use url::Url;

use crate::app_config::Config;
use crate::caption_sync::{CaptionSync, SyncState};
use crate::caption_track::{CaptionTrack, Cue};
use crate::display::{DisplaySurface, TerminalDisplay};
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::loader::CaptionLoader;
use crate::playback::{PlaybackEvent, SimulatedPlayer};

// @module: Application controller wiring loader, sync and player

/// Main application controller for caption playback
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Caption URL to load: the explicit override if given, else the configured one
    pub fn resolve_resource(&self, resource: Option<&str>) -> Result<Option<Url>, AppError> {
        let Some(resource) = resource.or(self.config.caption_resource.as_deref()) else {
            return Ok(None);
        };
        Ok(Some(FileManager::resolve_from_cwd(resource)?))
    }

    /// Loader with the standard fetch-then-legacy chain
    pub fn build_loader(&self) -> CaptionLoader {
        CaptionLoader::with_default_chain(self.config.timeout_secs)
    }

    /// Load captions and play a simulated timeline in the terminal
    pub async fn play(&self, resource: Option<&str>, duration: Option<f64>) -> Result<SyncState> {
        if let Some(duration) = duration {
            Config::validate_duration(duration)?;
        }

        let url = self.resolve_resource(resource)?;
        let loader = self.build_loader();

        let mut sync = CaptionSync::new(TerminalDisplay::new(0.0), self.config.messages.clone());
        let state = sync.initialize(&loader, url.as_ref()).await;
        if state != SyncState::Ready {
            sync.display().finish();
            warn!("Captions not available, nothing to play");
            return Ok(state);
        }

        let duration = duration
            .or(self.config.playback.duration_secs)
            .unwrap_or_else(|| sync.track().map(CaptionTrack::total_duration).unwrap_or(0.0));
        info!("Playing {:.1}s of captions", duration);

        sync.display().set_duration(duration);
        let player = SimulatedPlayer::new(duration, Duration::from_millis(self.config.playback.tick_ms));

        Self::run_playback(&mut sync, player.spawn(), |sync, event| {
            if let PlaybackEvent::TimeUpdate(clock) = event {
                sync.display().set_position(clock.current_time);
            }
        })
        .await;

        sync.display().finish();
        Ok(sync.state())
    }

    /// Feed every playback event to `sync` in delivery order until the stream
    /// ends. `observe` runs before each dispatch. Returns the number of events.
    pub async fn run_playback<D, F>(
        sync: &mut CaptionSync<D>,
        mut events: mpsc::Receiver<PlaybackEvent>,
        mut observe: F,
    ) -> usize
    where
        D: DisplaySurface,
        F: FnMut(&mut CaptionSync<D>, &PlaybackEvent),
    {
        let mut processed = 0;
        while let Some(event) = events.recv().await {
            observe(sync, &event);
            sync.handle_event(event);
            processed += 1;
        }
        debug!("Playback finished after {} event(s)", processed);
        processed
    }

    /// Parse a local caption file
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<CaptionTrack> {
        CaptionTrack::parse_file(path)
    }

    /// The cue active at `seconds` in a local caption file
    pub fn cue_at<P: AsRef<Path>>(&self, path: P, seconds: f64) -> Result<Option<Cue>> {
        let track = self
            .parse_file(path)
            .context("Failed to parse caption file")?;
        Ok(track.active_cue_at(seconds).cloned())
    }
}
