use std::time::Duration;
use log::debug;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};

// @module: Playback signal observed by caption sync

/// Read-only view of the media clock
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackClock {
    /// Current playback position in seconds
    pub current_time: f64,

    /// Whether playback is paused
    pub paused: bool,
}

impl PlaybackClock {
    pub fn playing(current_time: f64) -> Self {
        Self { current_time, paused: false }
    }

    pub fn paused(current_time: f64) -> Self {
        Self { current_time, paused: true }
    }
}

/// Notifications emitted by the media-playback collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackEvent {
    /// Position changed
    TimeUpdate(PlaybackClock),
    /// Playback started or resumed
    Play(PlaybackClock),
    /// Playback paused
    Pause(PlaybackClock),
    /// Reached the end of the media
    Ended,
}

/// Stand-in for an audio element: plays a timeline of `duration` seconds and
/// emits a time update on every tick.
#[derive(Debug, Clone)]
pub struct SimulatedPlayer {
    duration: f64,
    tick: Duration,
    pause_at: Option<f64>,
}

impl SimulatedPlayer {
    pub fn new(duration: f64, tick: Duration) -> Self {
        Self {
            duration: duration.max(0.0),
            tick,
            pause_at: None,
        }
    }

    /// Pause once the position reaches `at` seconds, then stop emitting
    pub fn with_pause_at(mut self, at: f64) -> Self {
        self.pause_at = Some(at);
        self
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Start playing on a background task, returning the event stream
    pub fn spawn(self) -> mpsc::Receiver<PlaybackEvent> {
        let (tx, rx) = mpsc::channel(32);
        tokio::spawn(async move {
            self.run(tx).await;
        });
        rx
    }

    /// Drive the timeline, sending events until the end, a pause, or the
    /// receiver going away
    pub async fn run(self, tx: mpsc::Sender<PlaybackEvent>) {
        let step = self.tick.as_secs_f64();
        if step <= 0.0 {
            debug!("Tick interval is zero, nothing to play");
            let _ = tx.send(PlaybackEvent::Ended).await;
            return;
        }

        if tx.send(PlaybackEvent::Play(PlaybackClock::playing(0.0))).await.is_err() {
            return;
        }

        let mut ticker = interval(self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately
        ticker.tick().await;

        let mut ticks: u64 = 0;
        loop {
            ticker.tick().await;
            ticks += 1;
            let position = (ticks as f64 * step).min(self.duration);

            if let Some(pause_at) = self.pause_at {
                if position >= pause_at {
                    let clock = PlaybackClock::paused(pause_at.min(self.duration));
                    let _ = tx.send(PlaybackEvent::TimeUpdate(clock)).await;
                    let _ = tx.send(PlaybackEvent::Pause(clock)).await;
                    return;
                }
            }

            if tx.send(PlaybackEvent::TimeUpdate(PlaybackClock::playing(position))).await.is_err() {
                return;
            }

            if position >= self.duration {
                let _ = tx.send(PlaybackEvent::Ended).await;
                return;
            }
        }
    }
}
