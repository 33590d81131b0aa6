/*!
 * Error types for the subsplit application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur during subtitle processing
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Structural failure while parsing one file; the caller should attempt
    /// the repair fallback before giving up
    #[error("Failed to parse subtitle content: {0}")]
    Parse(String),

    /// A single bad timecode string; soft-failed to 0 by the codec, so this
    /// variant only surfaces from strict parsing paths
    #[error("Invalid timecode: {0}")]
    Timecode(String),

    /// A whole file yielded zero usable cues after both parse and repair.
    /// Fatal for that file only; the original input must be left untouched.
    #[error("No usable subtitle entries: {0}")]
    EmptyResult(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle processing
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
