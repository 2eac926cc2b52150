use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::errors::AppError;

/// Application configuration module
/// This module handles loading, validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Caption resource, relative path or absolute URL. `None` leaves captions off.
    #[serde(default = "default_caption_resource")]
    pub caption_resource: Option<String>,

    /// Transport timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Texts shown on the display surface outside of cues
    #[serde(default)]
    pub messages: CaptionMessages,

    /// Simulated playback settings
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Texts published to the display surface outside of cues
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CaptionMessages {
    /// Shown while the track is loading
    #[serde(default = "default_loading_message")]
    pub loading: String,

    /// Shown once the track is loaded and at the end of playback
    #[serde(default = "default_ready_message")]
    pub ready: String,

    /// Shown between cues while playing
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Shown when every transport failed
    #[serde(default = "default_unavailable_message")]
    pub unavailable: String,
}

impl Default for CaptionMessages {
    fn default() -> Self {
        Self {
            loading: default_loading_message(),
            ready: default_ready_message(),
            placeholder: default_placeholder(),
            unavailable: default_unavailable_message(),
        }
    }
}

/// Configuration for the simulated player
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaybackConfig {
    /// Interval between time updates in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Playback length in seconds; the track's duration when unset
    #[serde(default)]
    pub duration_secs: Option<f64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            duration_secs: None,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_caption_resource() -> Option<String> {
    Some("audio/captions.vtt".to_string())
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_tick_ms() -> u64 {
    250 // roughly the cadence of media time updates in browsers
}

fn default_loading_message() -> String {
    "Loading captions...".to_string()
}

fn default_ready_message() -> String {
    "Press play to start the audio".to_string()
}

fn default_placeholder() -> String {
    "...".to_string()
}

fn default_unavailable_message() -> String {
    "Captions unavailable".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::Config("timeout_secs must be greater than zero".to_string()));
        }

        if self.playback.tick_ms == 0 {
            return Err(AppError::Config("playback.tick_ms must be greater than zero".to_string()));
        }

        if let Some(duration) = self.playback.duration_secs {
            Self::validate_duration(duration)?;
        }

        if let Some(resource) = &self.caption_resource {
            if resource.trim().is_empty() {
                return Err(AppError::Config("caption_resource must not be empty".to_string()));
            }
        }

        Ok(())
    }

    /// A playback length must be a finite, non-negative number of seconds
    pub fn validate_duration(duration: f64) -> Result<(), AppError> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(AppError::Config(format!("Invalid playback duration: {}", duration)));
        }
        Ok(())
    }

    /// Load a configuration file, or write a default one when it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        log::warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            caption_resource: default_caption_resource(),
            timeout_secs: default_timeout_secs(),
            messages: CaptionMessages::default(),
            playback: PlaybackConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
