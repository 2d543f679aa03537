//! Error types for pfsi-output.

use thiserror::Error;

use crate::StreamKey;

/// Errors that can occur when opening or writing log streams.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown stream key {0:?} (expected pfsi, mosquito, or vaccination)")]
    UnknownKey(String),

    #[error("{key} header has {got} columns, expected {expected}")]
    Header { key: StreamKey, expected: usize, got: usize },

    #[error("{key} record has {got} columns, expected {expected}")]
    Width { key: StreamKey, expected: usize, got: usize },

    #[error("{0} stream opened more than once")]
    DuplicateStream(StreamKey),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
