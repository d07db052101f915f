//! cpulog index structures
//!
//! An in-memory map from `(server_ip, cpu_id)` to every sample recorded for
//! that core, in the order the samples were read.
//!
//! # Lifecycle
//!
//! ```text
//! IndexBuilder (Building) ── add_record / index_file / build ──┐
//!                                                              │ finish()
//! UsageIndex   (Ready)    ◄────────────────────────────────────┘
//!              lookup / keys / stats, never mutated again
//! ```
//!
//! The transition consumes the builder, so nothing can write to an index
//! once queries are being served.

mod builder;
mod usage_index;

pub use builder::{FileReport, IndexBuilder};
pub use usage_index::UsageIndex;

use crate::storage::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Composite key identifying one CPU core on one server
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IndexKey {
    pub server_ip: String,
    pub cpu_id: u16,
}

impl IndexKey {
    pub fn new(server_ip: impl Into<String>, cpu_id: u16) -> Self {
        Self {
            server_ip: server_ip.into(),
            cpu_id,
        }
    }
}

impl From<&Record> for IndexKey {
    fn from(record: &Record) -> Self {
        Self::new(record.server_ip.clone(), record.cpu_id)
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/cpu{}", self.server_ip, self.cpu_id)
    }
}

/// Statistics collected while building an index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of distinct (server, cpu) keys
    pub keys: usize,
    /// Total samples across all keys
    pub samples: usize,
    /// Files read to completion
    pub files_indexed: usize,
    /// Files that could not be opened
    pub files_skipped: usize,
    /// Data lines rejected by the parser
    pub lines_skipped: usize,
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} keys, {} samples from {} files ({} files skipped, {} lines skipped)",
            self.keys, self.samples, self.files_indexed, self.files_skipped, self.lines_skipped
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_key_is_injective() {
        // "1" + "23" and "12" + "3" collide under plain concatenation
        let a = IndexKey::new("1", 23);
        let b = IndexKey::new("12", 3);
        assert_ne!(a, b);

        let set: HashSet<IndexKey> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_key_from_record() {
        let record = Record::new(1, "192.168.1.1", 1, 10);
        assert_eq!(IndexKey::from(&record), IndexKey::new("192.168.1.1", 1));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(IndexKey::new("10.0.0.2", 1).to_string(), "10.0.0.2/cpu1");
    }
}
