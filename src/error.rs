//! Unified error type for merge-images.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while merging images.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The input list was empty or otherwise unusable.
    #[error("Invalid input: {0}")]
    Input(String),

    /// An input could not be read or is not a supported image.
    #[error("Failed to decode '{path}': {message}")]
    Decode {
        /// The input path exactly as the caller passed it.
        path: String,
        /// Reason reported by the reader or decoder.
        message: String,
    },

    /// A merge option is out of range.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// The merged canvas could not be encoded.
    #[error("Failed to encode merged image: {0}")]
    Encode(String),

    /// The encoded image could not be written.
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        /// Destination that was being written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),
}

/// Error category, stable across messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`MergeError::Input`].
    Input,
    /// See [`MergeError::Decode`].
    Decode,
    /// See [`MergeError::InvalidOptions`].
    InvalidOptions,
    /// See [`MergeError::Encode`].
    Encode,
    /// See [`MergeError::Write`].
    Write,
    /// See [`MergeError::Config`].
    Config,
}

impl MergeError {
    /// The category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Input(_) => ErrorKind::Input,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::InvalidOptions(_) => ErrorKind::InvalidOptions,
            Self::Encode(_) => ErrorKind::Encode,
            Self::Write { .. } => ErrorKind::Write,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// The offending input or output path, when the error has one.
    #[must_use]
    pub fn path(&self) -> Option<String> {
        match self {
            Self::Decode { path, .. } => Some(path.clone()),
            Self::Write { path, .. } => Some(path.display().to_string()),
            _ => None,
        }
    }

    pub(crate) fn decode(path: &str, message: impl std::fmt::Display) -> Self {
        Self::Decode { path: path.to_string(), message: message.to_string() }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write { path: path.into(), source }
    }
}
