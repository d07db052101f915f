//! Log line parser
//!
//! Turns one line of a CPU usage log into a [`Record`].
//!
//! ```text
//! Timestamp   IP          CPU_ID  Usage      <- header, skipped
//! 1684022400  192.168.1.1 0       55         <- record
//! ```
//!
//! Columns may be separated by any mix of tabs and spaces.

use crate::storage::error::ParseError;
use crate::storage::types::{Record, HEADER_TOKEN};

const COLUMNS: usize = 4;

/// Parse a single log line
///
/// Returns `Ok(None)` for lines that carry no data (blank lines and the
/// header), `Ok(Some(record))` for a well-formed data line, and an error
/// otherwise. The caller decides what to do with failures.
pub fn parse_line(line: &str) -> Result<Option<Record>, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let first = match tokens.first() {
        Some(first) => *first,
        None => return Ok(None),
    };

    if first.eq_ignore_ascii_case(HEADER_TOKEN) {
        return Ok(None);
    }

    if tokens.len() != COLUMNS {
        return Err(ParseError::ColumnCount(tokens.len()));
    }

    let timestamp = tokens[0]
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidTimestamp(tokens[0].to_string()))?;

    let cpu_id = tokens[2]
        .parse::<u16>()
        .map_err(|_| ParseError::InvalidCpuId(tokens[2].to_string()))?;

    let usage = tokens[3]
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidUsage(tokens[3].to_string()))?;

    if usage > 100 {
        return Err(ParseError::UsageOutOfRange(usage));
    }

    Ok(Some(Record {
        timestamp,
        server_ip: tokens[1].to_string(),
        cpu_id,
        usage: usage as u8,
    }))
}
