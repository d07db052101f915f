//! # cpulog
//!
//! CPU usage log indexer - builds an in-memory index over per-day server CPU
//! logs and answers time-range queries for one core of one server.
//!
//! ## Features
//!
//! - **Resilient ingest**: malformed lines and unreadable files are skipped
//! - **Composite keys**: samples grouped by (server IP, CPU id)
//! - **Inclusive windows**: both query bounds match
//! - **Two-phase index**: built once, then sealed read-only
//!
//! ## Modules
//!
//! - [`storage`]: Log line parsing, directory layout, time conversion
//! - [`index`]: Index builder and sealed usage index
//! - [`query`]: Command parser and query executor
//! - [`shell`]: Interactive read-evaluate-print loop
//! - [`generator`]: Synthetic day-file writer
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cpulog::storage::{discover_log_files, Zone};
//! use cpulog::{parse_command, Command, QueryExecutor, UsageIndex};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Build phase
//!     let files = discover_log_files(Path::new("./logs"));
//!     let index = UsageIndex::build(&files);
//!
//!     // Query phase
//!     let executor = QueryExecutor::new(&index, Zone::Local);
//!     if let Command::Query(query) =
//!         parse_command("QUERY 192.168.1.1 0 2023-05-14 00:00 2023-05-14 00:02")?
//!     {
//!         println!("{}", executor.execute(&query)?);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod generator;
pub mod index;
pub mod logging;
pub mod query;
pub mod shell;
pub mod storage;

// Re-export top-level types for convenience
pub use storage::{
    AbsoluteTime, ParseError, Record, Sample, StorageError, StorageResult, TimeRange, Zone,
};

pub use index::{IndexBuilder, IndexKey, IndexStats, UsageIndex};

pub use query::{
    parse_command, Command, QueryError, QueryExecutor, QueryOutput, QueryResult, UsageQuery,
    UsageRow,
};

pub use shell::Shell;

pub use generator::LogGenerator;

pub use config::{Config, ConfigError, DataConfig, GeneratorConfig, LoggingConfig, TimeConfig};
