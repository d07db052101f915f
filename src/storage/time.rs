//! Calendar <-> absolute time conversion
//!
//! Log files store seconds since the Unix epoch. Queries and output use
//! calendar values interpreted in a [`Zone`]: the machine's local zone by
//! default, or UTC when reproducible results are needed.

use crate::storage::types::AbsoluteTime;
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display format for sample timestamps
pub const MINUTE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Zone used to interpret calendar values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// The process's local time zone
    #[default]
    Local,
    /// Coordinated Universal Time
    Utc,
}

impl Zone {
    /// Convert a calendar date/time to seconds since the epoch
    ///
    /// An ambiguous local time (clocks going back) resolves to the earlier
    /// instant. A local time skipped by a forward transition resolves to the
    /// instant one hour later. Returns `None` only when neither exists.
    pub fn to_absolute(&self, datetime: NaiveDateTime) -> Option<AbsoluteTime> {
        match self {
            Zone::Utc => Some(Utc.from_utc_datetime(&datetime).timestamp()),
            Zone::Local => Local
                .from_local_datetime(&datetime)
                .earliest()
                .or_else(|| {
                    Local
                        .from_local_datetime(&(datetime + Duration::hours(1)))
                        .earliest()
                })
                .map(|dt| dt.timestamp()),
        }
    }

    /// Convert seconds since the epoch to a calendar date/time
    pub fn to_calendar(&self, timestamp: AbsoluteTime) -> Option<NaiveDateTime> {
        match self {
            Zone::Utc => DateTime::from_timestamp(timestamp, 0).map(|dt| dt.naive_utc()),
            Zone::Local => Local
                .timestamp_opt(timestamp, 0)
                .single()
                .map(|dt| dt.naive_local()),
        }
    }

    /// Render a timestamp as `YYYY-MM-DD HH:MM`
    ///
    /// Falls back to the raw number for timestamps chrono cannot represent.
    pub fn format_minute(&self, timestamp: AbsoluteTime) -> String {
        self.to_calendar(timestamp)
            .map(|dt| dt.format(MINUTE_FORMAT).to_string())
            .unwrap_or_else(|| timestamp.to_string())
    }

    /// First second of a calendar day
    pub fn day_start(&self, date: NaiveDate) -> Option<AbsoluteTime> {
        self.to_absolute(date.and_hms_opt(0, 0, 0)?)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Local => write!(f, "local"),
            Zone::Utc => write!(f, "utc"),
        }
    }
}

impl FromStr for Zone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Zone::Local),
            "utc" => Ok(Zone::Utc),
            other => Err(format!("Unknown time zone: {}. Use: local, utc", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_utc_to_absolute() {
        let ts = Zone::Utc.to_absolute(datetime(2023, 5, 14, 0, 0)).unwrap();
        assert_eq!(ts, 1684022400);
    }

    #[test]
    fn test_utc_round_trip() {
        let dt = datetime(2023, 10, 1, 13, 37);
        let ts = Zone::Utc.to_absolute(dt).unwrap();
        assert_eq!(Zone::Utc.to_calendar(ts), Some(dt));
    }

    #[test]
    fn test_local_round_trip() {
        // Noon never falls in a DST transition
        let dt = datetime(2023, 5, 14, 12, 0);
        let ts = Zone::Local.to_absolute(dt).unwrap();
        assert_eq!(Zone::Local.to_calendar(ts), Some(dt));
    }

    #[test]
    fn test_format_minute() {
        assert_eq!(Zone::Utc.format_minute(1684022460), "2023-05-14 00:01");
    }

    #[test]
    fn test_format_minute_out_of_range() {
        assert_eq!(Zone::Utc.format_minute(i64::MAX), i64::MAX.to_string());
    }

    #[test]
    fn test_day_start() {
        let date = NaiveDate::from_ymd_opt(2023, 5, 14).unwrap();
        assert_eq!(Zone::Utc.day_start(date), Some(1684022400));
    }

    #[test]
    fn test_zone_from_str() {
        assert_eq!("local".parse::<Zone>(), Ok(Zone::Local));
        assert_eq!("UTC".parse::<Zone>(), Ok(Zone::Utc));
        assert!("mars".parse::<Zone>().is_err());
        assert_eq!(Zone::default(), Zone::Local);
    }
}
