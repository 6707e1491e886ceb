//! Error types for the decoder module.

use std::path::PathBuf;
use thiserror::Error;

use super::bencode::BencodeError;

/// Errors that can occur while extracting a torrent name.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A required field is absent or has the wrong type.
    #[error("Missing field: {field}")]
    MissingField { field: &'static str },

    /// The name bytes are not valid UTF-8.
    #[error("Torrent name is not valid UTF-8")]
    EncodingError(#[source] std::string::FromUtf8Error),

    /// The bencode structure could not be parsed.
    #[error("Malformed torrent file: {0}")]
    MalformedFile(#[from] BencodeError),

    /// The file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DecodeError {
    /// Creates a missing field error.
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Short label used in console output and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing field",
            Self::EncodingError(_) => "encoding error",
            Self::MalformedFile(_) => "malformed file",
            Self::Io { .. } => "io error",
        }
    }
}
