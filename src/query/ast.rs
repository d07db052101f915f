//! Query types
//!
//! Typed values produced by the command parser and consumed by the executor.

use crate::index::IndexKey;
use crate::query::error::{QueryError, QueryResult};
use crate::storage::{TimeRange, Zone};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A request for one core's samples within a calendar window
///
/// Both bounds are inclusive. A start after the end is accepted and matches
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageQuery {
    pub server_ip: String,
    pub cpu_id: u16,
    /// Window start, in calendar form
    pub start: NaiveDateTime,
    /// Window end, in calendar form
    pub end: NaiveDateTime,
}

impl UsageQuery {
    pub fn new(
        server_ip: impl Into<String>,
        cpu_id: u16,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            server_ip: server_ip.into(),
            cpu_id,
            start,
            end,
        }
    }

    /// Index key this query reads
    pub fn key(&self) -> IndexKey {
        IndexKey::new(self.server_ip.clone(), self.cpu_id)
    }

    /// Convert the calendar window to absolute seconds in `zone`
    pub fn time_range(&self, zone: Zone) -> QueryResult<TimeRange> {
        let convert = |at: NaiveDateTime| {
            zone.to_absolute(at)
                .ok_or_else(|| QueryError::InvalidTimeRange(format!("{} in {} time", at, zone)))
        };
        let start = convert(self.start)?;
        let end = convert(self.end)?;
        Ok(TimeRange::new(start, end))
    }
}

/// One line of interactive input, parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line
    Empty,
    /// QUERY with validated arguments
    Query(UsageQuery),
    /// EXIT
    Exit,
}
