//! Usage Index - the Ready phase of the index
//!
//! Read-only view over the samples collected by [`IndexBuilder`]. Lookup is
//! O(1) per key; sequences are handed out as slices in insertion order.

use crate::index::{IndexBuilder, IndexKey, IndexStats};
use crate::storage::Sample;
use std::collections::HashMap;
use std::path::Path;

/// Immutable index from (server, cpu) to recorded samples
#[derive(Debug, Default)]
pub struct UsageIndex {
    entries: HashMap<IndexKey, Vec<Sample>>,
    stats: IndexStats,
}

impl UsageIndex {
    pub(crate) fn from_parts(entries: HashMap<IndexKey, Vec<Sample>>, stats: IndexStats) -> Self {
        Self { entries, stats }
    }

    /// Build and seal an index from a sequence of files
    pub fn build<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut builder = IndexBuilder::new();
        builder.build(paths);
        builder.finish()
    }

    /// All samples for a key, in insertion order
    pub fn lookup(&self, key: &IndexKey) -> Option<&[Sample]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &IndexKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate over indexed keys (unordered)
    pub fn keys(&self) -> impl Iterator<Item = &IndexKey> {
        self.entries.keys()
    }

    /// Indexed keys in (server, cpu) order
    pub fn sorted_keys(&self) -> Vec<&IndexKey> {
        let mut keys: Vec<&IndexKey> = self.entries.keys().collect();
        keys.sort();
        keys
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }
}
