/*!
 * Error types for the capsync application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while fetching a caption resource
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request could not be sent or the body could not be read
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The transport refuses this kind of URL (e.g. fetch on a file:// origin)
    #[error("Transport blocked for {scheme}:// resources")]
    Blocked {
        /// URL scheme that was refused
        scheme: String,
    },

    /// The resource location is not a usable URL
    #[error("Invalid resource URL: {0}")]
    InvalidUrl(String),

    /// Local file access failed
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for TransportError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        Self::RequestFailed(error.to_string())
    }
}

/// Errors that can occur while loading a caption track
#[derive(Error, Debug)]
pub enum CaptionError {
    /// Every transport in the chain failed
    #[error("Captions unavailable after {} attempt(s): {}", attempts.len(), attempts.join("; "))]
    Unavailable {
        /// One line per failed transport, in the order they were tried
        attempts: Vec<String>,
    },

    /// The loader was built without any transport
    #[error("No transport configured for caption loading")]
    NoTransports,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration handling
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a transport
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Error from caption loading
    #[error("Caption error: {0}")]
    Caption(#[from] CaptionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
