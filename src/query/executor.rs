//! Query Executor
//!
//! Evaluates a [`UsageQuery`] against a sealed [`UsageIndex`]:
//! 1. Key lookup
//! 2. Calendar → absolute conversion of the window
//! 3. Linear scan of the key's samples in stored order
//! 4. Absolute → calendar conversion of each match
//!
//! # Execution Pipeline
//!
//! ```text
//! Query → Key → Lookup ─(absent)→ "No logs found."
//!                  │
//!                  └→ Window → Scan (insertion order) → Format → Output
//! ```
//!
//! The scan does not sort. A key fed from several files may hold samples
//! out of chronological order, and matches come back in that same order.

use crate::index::{IndexKey, UsageIndex};
use crate::query::ast::UsageQuery;
use crate::query::error::QueryResult;
use crate::storage::{AbsoluteTime, TimeRange, Zone};
use serde::Serialize;
use std::fmt;

/// Text shown when the key has never been indexed
pub const NO_LOGS_FOUND: &str = "No logs found.";

/// A matched sample with its calendar rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageRow {
    /// Unix timestamp in seconds
    pub timestamp: AbsoluteTime,
    /// `YYYY-MM-DD HH:MM` in the executor's zone
    pub time: String,
    /// Usage in percent
    pub usage: u8,
}

impl fmt::Display for UsageRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}%),", self.time, self.usage)
    }
}

/// Result of a query execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryOutput {
    /// Key that was looked up
    pub key: IndexKey,
    /// Whether the key exists in the index at all
    pub key_found: bool,
    /// Absolute window that was applied (absent when the key was unknown)
    pub range: Option<TimeRange>,
    /// Matches in scan order
    pub rows: Vec<UsageRow>,
    /// Number of samples examined
    pub samples_scanned: usize,
}

impl QueryOutput {
    fn not_found(key: IndexKey) -> Self {
        Self {
            key,
            key_found: false,
            range: None,
            rows: Vec::new(),
            samples_scanned: 0,
        }
    }

    /// Get the number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Matched usages, in scan order
    pub fn usages(&self) -> Vec<u8> {
        self.rows.iter().map(|row| row.usage).collect()
    }

    /// Body line: either the not-found message or all rows concatenated
    pub fn body(&self) -> String {
        if !self.key_found {
            return NO_LOGS_FOUND.to_string();
        }
        self.rows.iter().map(UsageRow::to_string).collect()
    }
}

/// Two lines: the `CPU<n> usage on <ip>:` header and the body
impl fmt::Display for QueryOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CPU{} usage on {}:", self.key.cpu_id, self.key.server_ip)?;
        write!(f, "{}", self.body())
    }
}

/// Query executor
///
/// Borrows a sealed index; evaluation never mutates it.
#[derive(Debug, Clone, Copy)]
pub struct QueryExecutor<'a> {
    index: &'a UsageIndex,
    zone: Zone,
}

impl<'a> QueryExecutor<'a> {
    /// Create a new query executor
    pub fn new(index: &'a UsageIndex, zone: Zone) -> Self {
        Self { index, zone }
    }

    /// Execute a parsed query
    ///
    /// The window is only converted when the key exists, so an unknown key
    /// always yields the not-found output.
    pub fn execute(&self, query: &UsageQuery) -> QueryResult<QueryOutput> {
        let key = query.key();
        if !self.index.contains_key(&key) {
            tracing::debug!("No samples for {}", key);
            return Ok(QueryOutput::not_found(key));
        }

        let range = query.time_range(self.zone)?;
        Ok(self.execute_range(key, range))
    }

    /// Select every sample of `key` whose timestamp lies in `range`
    pub fn execute_range(&self, key: IndexKey, range: TimeRange) -> QueryOutput {
        let samples = match self.index.lookup(&key) {
            Some(samples) => samples,
            None => return QueryOutput::not_found(key),
        };

        let rows: Vec<UsageRow> = samples
            .iter()
            .filter(|sample| range.contains(sample.timestamp))
            .map(|sample| UsageRow {
                timestamp: sample.timestamp,
                time: self.zone.format_minute(sample.timestamp),
                usage: sample.usage,
            })
            .collect();

        tracing::debug!(
            "{} {}: {} of {} samples matched",
            key,
            range,
            rows.len(),
            samples.len()
        );

        QueryOutput {
            key,
            key_found: true,
            range: Some(range),
            rows,
            samples_scanned: samples.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexBuilder;
    use crate::storage::Record;
    use chrono::NaiveDate;

    fn index_with(records: &[(i64, &str, u16, u8)]) -> UsageIndex {
        let mut builder = IndexBuilder::new();
        for &(ts, ip, cpu, usage) in records {
            builder.add_record(Record::new(ts, ip, cpu, usage));
        }
        builder.finish()
    }

    fn timestamps(output: &QueryOutput) -> Vec<i64> {
        output.rows.iter().map(|r| r.timestamp).collect()
    }

    #[test]
    fn test_range_inclusivity() {
        let index = index_with(&[
            (100, "10.0.0.1", 0, 1),
            (200, "10.0.0.1", 0, 2),
            (300, "10.0.0.1", 0, 3),
        ]);
        let executor = QueryExecutor::new(&index, Zone::Utc);
        let key = IndexKey::new("10.0.0.1", 0);

        let all = executor.execute_range(key.clone(), TimeRange::new(100, 300));
        assert_eq!(timestamps(&all), vec![100, 200, 300]);

        let inner = executor.execute_range(key.clone(), TimeRange::new(101, 299));
        assert_eq!(timestamps(&inner), vec![200]);

        let after = executor.execute_range(key, TimeRange::new(301, 400));
        assert!(after.is_empty());
        assert!(after.key_found);
        assert_eq!(after.samples_scanned, 3);
    }

    #[test]
    fn test_unknown_key() {
        let index = index_with(&[(100, "10.0.0.1", 0, 1)]);
        let executor = QueryExecutor::new(&index, Zone::Utc);

        let start = NaiveDate::from_ymd_opt(2023, 5, 14).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let query = UsageQuery::new("10.0.0.2", 0, start, start);
        let output = executor.execute(&query).unwrap();

        assert!(!output.key_found);
        assert!(output.is_empty());
        assert_eq!(output.body(), NO_LOGS_FOUND);
        assert_eq!(output.to_string(), "CPU0 usage on 10.0.0.2:\nNo logs found.");
    }

    #[test]
    fn test_scan_keeps_insertion_order() {
        let index = index_with(&[
            (500, "10.0.0.1", 1, 50),
            (100, "10.0.0.1", 1, 10),
            (300, "10.0.0.1", 1, 30),
        ]);
        let executor = QueryExecutor::new(&index, Zone::Utc);

        let output = executor.execute_range(IndexKey::new("10.0.0.1", 1), TimeRange::new(0, 1000));
        assert_eq!(timestamps(&output), vec![500, 100, 300]);
        assert_eq!(output.usages(), vec![50, 10, 30]);
    }

    #[test]
    fn test_degenerate_window() {
        let index = index_with(&[(1684022400, "10.0.0.1", 0, 1)]);
        let executor = QueryExecutor::new(&index, Zone::Utc);

        let day = NaiveDate::from_ymd_opt(2023, 5, 14).unwrap();
        let query = UsageQuery::new(
            "10.0.0.1",
            0,
            day.and_hms_opt(1, 0, 0).unwrap(),
            day.and_hms_opt(0, 0, 0).unwrap(),
        );

        let output = executor.execute(&query).unwrap();
        assert!(output.key_found);
        assert!(output.is_empty());
        assert_eq!(output.body(), "");
    }

    #[test]
    fn test_calendar_query_and_rendering() {
        let index = index_with(&[
            (1684022400, "192.168.1.1", 0, 55),
            (1684022460, "192.168.1.1", 0, 60),
            (1684022580, "192.168.1.1", 0, 70),
        ]);
        let executor = QueryExecutor::new(&index, Zone::Utc);

        let day = NaiveDate::from_ymd_opt(2023, 5, 14).unwrap();
        let query = UsageQuery::new(
            "192.168.1.1",
            0,
            day.and_hms_opt(0, 0, 0).unwrap(),
            day.and_hms_opt(0, 2, 0).unwrap(),
        );

        let output = executor.execute(&query).unwrap();
        assert_eq!(output.usages(), vec![55, 60]);
        assert_eq!(output.range, Some(TimeRange::new(1684022400, 1684022520)));
        assert_eq!(
            output.to_string(),
            "CPU0 usage on 192.168.1.1:\n(2023-05-14 00:00, 55%),(2023-05-14 00:01, 60%),"
        );
    }

    #[test]
    fn test_output_serializes_to_json() {
        let index = index_with(&[(1684022400, "192.168.1.1", 0, 55)]);
        let executor = QueryExecutor::new(&index, Zone::Utc);

        let output =
            executor.execute_range(IndexKey::new("192.168.1.1", 0), TimeRange::new(0, i64::MAX));
        let json = serde_json::to_value(&output).unwrap();

        assert_eq!(json["key_found"], true);
        assert_eq!(json["rows"][0]["time"], "2023-05-14 00:00");
        assert_eq!(json["rows"][0]["usage"], 55);
    }
}
