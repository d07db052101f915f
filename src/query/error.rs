//! Query error types
//!
//! Defines all error conditions that can occur while parsing a command line
//! or evaluating a usage query. Display strings are shown to the user as-is.

use thiserror::Error;

/// Usage line printed when a QUERY has the wrong number of arguments
pub const QUERY_USAGE: &str =
    "Usage: QUERY <serverIp> <cpuID> <startDate> <startTime> <endDate> <endTime>";

/// Errors that can occur during query operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// QUERY was given the wrong number of arguments
    #[error("{}", QUERY_USAGE)]
    Usage,

    /// Unknown command verb
    #[error("Invalid Command!")]
    InvalidCommand(String),

    /// CPU id argument is not a small non-negative integer
    #[error("Invalid cpu id: {0}")]
    InvalidCpuId(String),

    /// Date argument is not a valid YYYY-MM-DD calendar date
    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// Time argument is not a valid HH:MM time of day
    #[error("Invalid time: {0} (expected HH:MM)")]
    InvalidTime(String),

    /// Calendar value has no instant in the configured zone
    #[error("Invalid time range: {0}")]
    InvalidTimeRange(String),
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
