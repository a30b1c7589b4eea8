//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building a call set
#[derive(Error, Debug)]
pub enum CallSetError {
    #[error("Invalid call range syntax: {0}")]
    InvalidRangeSyntax(String),

    #[error("Failed to read call set from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while reading a trace
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed call record on line {line}: {source}")]
    Json {
        line: u64,
        #[source]
        source: serde_json::Error,
    },

    #[error("Call numbers must increase: call {found} follows call {previous}")]
    OutOfOrder { previous: u64, found: u64 },

    #[error("Bookmark {0} does not belong to this trace")]
    InvalidBookmark(u64),
}

/// Errors that can occur while writing a trace
#[derive(Error, Debug)]
pub enum WriterError {
    #[error("Failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize call: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Errors surfaced by a trim run
#[derive(Error, Debug)]
pub enum TrimError {
    #[error("Failed to open trace: {0}")]
    OpenError(#[source] ParseError),

    #[error("Failed to create trimmed trace: {0}")]
    CreateError(#[source] WriterError),

    #[error("Failed to read trace: {0}")]
    Read(#[source] ParseError),

    #[error("Failed to write trimmed trace: {0}")]
    Write(#[source] WriterError),
}
