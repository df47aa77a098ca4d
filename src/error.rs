//! # Error Types
//!
//! This module defines error types used throughout the cartel library.

use thiserror::Error;

/// Main error type for cartel operations
#[derive(Debug, Error)]
pub enum CartelError {
    /// Caller supplied an inconsistent or incomplete declaration
    /// (empty template path, empty caption text, zero/multiple image
    /// sources, empty QR data, malformed fixed-size array input).
    /// Detected during validation, fatal to the whole render.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The QR encoder cannot represent the data under the chosen
    /// version/encoding/error-correction combination.
    #[error("QR encoding error: {0}")]
    Encoding(String),

    /// The map service returned a failed or undecodable response.
    #[error("Map service error: {0}")]
    Service(String),

    /// An unrecognized map type was requested.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Image codec error wrapper
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
