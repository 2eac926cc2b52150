use log::{debug, error, info, warn};
use url::Url;

use crate::app_config::CaptionMessages;
use crate::caption_track::{CaptionTrack, Cue};
use crate::display::DisplaySurface;
use crate::loader::CaptionLoader;
use crate::playback::PlaybackEvent;

// @module: Caption synchronization against a playback clock

/// Lifecycle of the caption source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Nothing loaded yet, or no caption resource configured
    Uninitialized,
    /// Load in progress
    Loading,
    /// Track loaded, time updates are honoured
    Ready,
    /// Every transport failed; terminal until teardown
    LoadFailed,
}

/// What the display surface currently shows, as far as captions are concerned
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayState {
    /// Never published to
    Untouched,
    /// A status message (loading, ready prompt)
    Message(String),
    /// Text of the active cue
    ShowingCue(String),
    /// Between cues while playing
    Idle,
    /// Terminal load failure message
    Unavailable,
}

/// Keeps a display surface in step with playback.
///
/// Owns the loaded track and the surface for its whole lifetime; callers feed
/// it playback notifications in delivery order.
pub struct CaptionSync<D: DisplaySurface> {
    display: D,
    messages: CaptionMessages,
    track: Option<CaptionTrack>,
    state: SyncState,
    display_state: DisplayState,
}

impl<D: DisplaySurface> CaptionSync<D> {
    /// Create an uninitialized sync publishing to `display`
    pub fn new(display: D, messages: CaptionMessages) -> Self {
        Self {
            display,
            messages,
            track: None,
            state: SyncState::Uninitialized,
            display_state: DisplayState::Untouched,
        }
    }

    /// Create a sync that is ready with an already loaded track
    pub fn with_track(display: D, messages: CaptionMessages, track: CaptionTrack) -> Self {
        let mut sync = Self::new(display, messages);
        sync.track = Some(track);
        sync.state = SyncState::Ready;
        sync
    }

    /// Load the caption track once.
    ///
    /// Without a resource the sync stays inert and the display is never touched.
    /// A failed load publishes the unavailable message and is not retried.
    pub async fn initialize(&mut self, loader: &CaptionLoader, resource: Option<&Url>) -> SyncState {
        if self.state != SyncState::Uninitialized {
            warn!("Caption sync already initialized ({:?}), ignoring", self.state);
            return self.state;
        }

        let Some(url) = resource else {
            warn!("No caption track configured, captions disabled");
            return self.state;
        };

        self.state = SyncState::Loading;
        let loading = self.messages.loading.clone();
        self.publish_message(loading);

        match loader.load(url).await {
            Ok(track) => {
                info!("Captions ready: {} cue(s)", track.len());
                if track.overlap_count() > 0 {
                    debug!("Track has {} overlapping cue pair(s)", track.overlap_count());
                }
                self.track = Some(track);
                self.state = SyncState::Ready;
                let ready = self.messages.ready.clone();
                self.publish_message(ready);
            }
            Err(e) => {
                error!("Failed to load captions: {}", e);
                self.state = SyncState::LoadFailed;
                self.display.show(&self.messages.unavailable, false);
                self.display_state = DisplayState::Unavailable;
            }
        }

        self.state
    }

    /// First cue in stored order whose interval contains `current_time`
    pub fn resolve_active_cue(&self, current_time: f64) -> Option<&Cue> {
        self.track.as_ref()?.active_cue_at(current_time)
    }

    /// React to a playback position change.
    ///
    /// Shows the active cue; otherwise shows the placeholder while playing past
    /// zero; otherwise leaves the display alone.
    pub fn on_time_update(&mut self, current_time: f64, is_paused: bool) {
        if self.state != SyncState::Ready {
            return;
        }

        if let Some(text) = self.resolve_active_cue(current_time).map(|cue| cue.text.clone()) {
            self.display.show(&text, true);
            self.display_state = DisplayState::ShowingCue(text);
        } else if current_time > 0.0 && !is_paused {
            self.show_placeholder();
        }
    }

    /// Playback started or resumed
    pub fn on_play(&mut self, current_time: f64) {
        if self.state != SyncState::Ready {
            return;
        }

        if self.resolve_active_cue(current_time).is_some() {
            self.on_time_update(current_time, false);
        } else {
            self.show_placeholder();
        }
    }

    /// Playback paused; the current text stays
    pub fn on_pause(&mut self, current_time: f64) {
        debug!("Playback paused at {:.3}s", current_time);
    }

    /// Playback reached the end; back to the ready prompt
    pub fn on_ended(&mut self) {
        if self.state != SyncState::Ready {
            return;
        }

        let ready = self.messages.ready.clone();
        self.publish_message(ready);
    }

    /// Dispatch one playback notification
    pub fn handle_event(&mut self, event: PlaybackEvent) {
        match event {
            PlaybackEvent::TimeUpdate(clock) => self.on_time_update(clock.current_time, clock.paused),
            PlaybackEvent::Play(clock) => self.on_play(clock.current_time),
            PlaybackEvent::Pause(clock) => self.on_pause(clock.current_time),
            PlaybackEvent::Ended => self.on_ended(),
        }
    }

    /// Drop the track and hand the display surface back
    pub fn teardown(self) -> D {
        debug!("Caption sync torn down in state {:?}", self.state);
        self.display
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn display_state(&self) -> &DisplayState {
        &self.display_state
    }

    pub fn track(&self) -> Option<&CaptionTrack> {
        self.track.as_ref()
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    fn show_placeholder(&mut self) {
        self.display.show(&self.messages.placeholder, false);
        self.display_state = DisplayState::Idle;
    }

    fn publish_message(&mut self, text: String) {
        self.display.show(&text, false);
        self.display_state = DisplayState::Message(text);
    }
}
