//! Storage layer error types
//!
//! Defines the errors that can occur while reading, parsing, and writing
//! CPU usage log files.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced when a single log line cannot be turned into a record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Line did not split into exactly four columns
    #[error("expected 4 columns, found {0}")]
    ColumnCount(usize),

    /// Timestamp column is not a base-10 integer
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// CPU id column is not a small non-negative integer
    #[error("invalid cpu id: {0}")]
    InvalidCpuId(String),

    /// Usage column is not an integer
    #[error("invalid usage: {0}")]
    InvalidUsage(String),

    /// Line is not valid UTF-8
    #[error("line is not valid UTF-8")]
    InvalidEncoding,

    /// Usage is numeric but above 100 percent
    #[error("usage out of range: {0}")]
    UsageOutOfRange(u32),
}

/// Errors that can occur in the storage layer
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O failure tied to a specific file or directory
    #[error("IO error on {path:?}: {source}")]
    Path {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A log line could not be parsed
    #[error("Parse error at line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },

    /// A calendar value has no representation in the configured zone
    #[error("Invalid time: {0}")]
    InvalidTime(String),
}

impl StorageError {
    /// Attach a path to an I/O error
    pub fn at_path(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Path {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
