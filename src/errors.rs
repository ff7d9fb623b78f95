/*!
 * Error types for the sublines application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to a transcription engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// Error when making an API request fails
    #[error("Engine request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an engine response fails
    #[error("Failed to parse engine response: {0}")]
    ParseError(String),

    /// Error returned by the engine API itself
    #[error("Engine responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the engine
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The engine answered but produced no usable transcription
    #[error("Engine returned an empty transcription for {0}")]
    EmptyTranscription(String),
}

/// Errors that can occur while building subtitle lines
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// A segment or word entry carries an inverted or non-finite time range
    #[error("Malformed segment {segment}: {reason}")]
    MalformedSegment {
        /// Index of the offending segment in the transcription
        segment: usize,
        /// Description of the violation
        reason: String
    },

    /// The configured character budget cannot produce lines
    #[error("Invalid line budget: max_chars must be positive, got {0}")]
    InvalidLineBudget(usize),

    /// The configured inter-line gap is not a non-negative number of seconds
    #[error("Invalid line gap: lines_distance must be a non-negative number, got {0}")]
    InvalidLineGap(f64),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a transcription engine
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Error from subtitle line building
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

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
