//! cpulog storage layer
//!
//! Everything that touches raw log files:
//!
//! - **types**: Core data structures (Record, Sample, TimeRange)
//! - **parser**: One log line → one Record
//! - **time**: Calendar ↔ epoch-seconds conversion
//! - **layout**: Year/month/day directory layout and traversal
//! - **error**: Error types
//!
//! # Read Path
//!
//! ```text
//! root → discover_log_files → [day files] → lines → parse_line → Record
//! ```

pub mod error;
pub mod layout;
pub mod parser;
pub mod time;
pub mod types;

// Re-export commonly used types
pub use error::{ParseError, StorageError, StorageResult};
pub use layout::{day_file_path, discover_log_files};
pub use parser::parse_line;
pub use time::{Zone, MINUTE_FORMAT};
pub use types::{AbsoluteTime, Record, Sample, TimeRange, HEADER_LINE, HEADER_TOKEN};
