//! cpulog Query Engine
//!
//! Answers "what did core Y on server X report between A and B?":
//!
//! - **AST**: Query and command types
//! - **Parser**: Parse interactive command lines into commands
//! - **Executor**: Evaluate queries against a sealed index
//!
//! # Query Language
//!
//! ```text
//! QUERY <serverIp> <cpuId> <startDate> <startTime> <endDate> <endTime>
//! EXIT
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use cpulog::query::{parse_command, Command, QueryExecutor};
//!
//! let executor = QueryExecutor::new(&index, Zone::Local);
//! if let Command::Query(query) =
//!     parse_command("QUERY 192.168.1.10 1 2014-10-31 00:00 2014-10-31 00:05")?
//! {
//!     println!("{}", executor.execute(&query)?);
//! }
//! ```

mod ast;
mod error;
mod executor;
mod parser;

pub use ast::{Command, UsageQuery};
pub use error::{QueryError, QueryResult, QUERY_USAGE};
pub use executor::{QueryExecutor, QueryOutput, UsageRow, NO_LOGS_FOUND};
pub use parser::{parse_command, parse_date, parse_query_args, parse_time};
