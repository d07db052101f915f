//! Core data types for CPU usage logs
//!
//! This module defines the fundamental types shared by the parser, the index
//! and the query engine:
//! - `Record`: One parsed log line
//! - `Sample`: A (timestamp, usage) pair stored in the index
//! - `TimeRange`: An inclusive time window for queries

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seconds since the Unix epoch
pub type AbsoluteTime = i64;

/// Name of the first column in a log file header
pub const HEADER_TOKEN: &str = "Timestamp";

/// Header line written at the top of every log file
pub const HEADER_LINE: &str = "Timestamp\tIP\tCPU_ID\tUsage";

/// A single CPU usage measurement read from a log file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unix timestamp in seconds
    pub timestamp: AbsoluteTime,
    /// Dotted server address, not validated
    pub server_ip: String,
    /// Core number on that server
    pub cpu_id: u16,
    /// Usage in percent, 0-100
    pub usage: u8,
}

impl Record {
    pub fn new(
        timestamp: AbsoluteTime,
        server_ip: impl Into<String>,
        cpu_id: u16,
        usage: u8,
    ) -> Self {
        Self {
            timestamp,
            server_ip: server_ip.into(),
            cpu_id,
            usage,
        }
    }

    /// The sample this record contributes to the index
    pub fn sample(&self) -> Sample {
        Sample {
            timestamp: self.timestamp,
            usage: self.usage,
        }
    }
}

/// Serializes back to the log file column layout
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.timestamp, self.server_ip, self.cpu_id, self.usage
        )
    }
}

/// One (timestamp, usage) pair held by the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: AbsoluteTime,
    pub usage: u8,
}

impl Sample {
    pub fn new(timestamp: AbsoluteTime, usage: u8) -> Self {
        Self { timestamp, usage }
    }
}

/// Time window for queries (closed interval: [start, end])
///
/// Unlike a half-open range, both bounds match. A window whose start lies
/// after its end is valid and simply contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start timestamp (inclusive), in seconds
    pub start: AbsoluteTime,
    /// End timestamp (inclusive), in seconds
    pub end: AbsoluteTime,
}

impl TimeRange {
    pub fn new(start: AbsoluteTime, end: AbsoluteTime) -> Self {
        Self { start, end }
    }

    /// Check if a timestamp falls within this range
    pub fn contains(&self, timestamp: AbsoluteTime) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }

    /// True when no timestamp can satisfy the window
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
