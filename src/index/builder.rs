//! Index Builder - the Building phase of the index
//!
//! Accumulates samples from log files. Per-key sequences only ever grow at
//! the end; nothing is sorted or deduplicated.

use crate::index::{IndexKey, IndexStats, UsageIndex};
use crate::storage::{parse_line, ParseError, Record, Sample, StorageError, StorageResult};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Outcome of indexing a single file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileReport {
    /// Records added to the index
    pub records: usize,
    /// Lines rejected by the parser
    pub lines_skipped: usize,
}

/// Mutable index under construction
#[derive(Debug, Default)]
pub struct IndexBuilder {
    entries: HashMap<IndexKey, Vec<Sample>>,
    stats: IndexStats,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record's sample to its key, creating the key if needed
    pub fn add_record(&mut self, record: Record) {
        let sample = record.sample();
        let key = IndexKey::new(record.server_ip, record.cpu_id);
        self.entries.entry(key).or_default().push(sample);
        self.stats.samples += 1;
    }

    /// Parse every line of one file into the index
    ///
    /// Malformed lines are skipped. If reading fails part way through, the
    /// records read so far are kept and the rest of the file is dropped.
    /// Fails only when the file cannot be opened.
    pub fn index_file(&mut self, path: &Path) -> StorageResult<FileReport> {
        let file = File::open(path).map_err(|e| StorageError::at_path(path, e))?;
        let report = self.index_reader(BufReader::new(file), path);

        self.stats.files_indexed += 1;
        Ok(report)
    }

    /// Parse lines from an open reader, `origin` naming it in logs
    ///
    /// Lines are read as raw bytes; one that is not valid UTF-8 counts as
    /// malformed.
    pub fn index_reader<R: BufRead>(&mut self, mut reader: R, origin: &Path) -> FileReport {
        let mut report = FileReport::default();
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => line_no += 1,
                Err(e) => {
                    tracing::warn!("Stopped reading {:?} at line {}: {}", origin, line_no + 1, e);
                    break;
                }
            }

            let parsed = match std::str::from_utf8(&buf) {
                Ok(line) => parse_line(line),
                Err(_) => Err(ParseError::InvalidEncoding),
            };

            match parsed {
                Ok(Some(record)) => {
                    self.add_record(record);
                    report.records += 1;
                }
                Ok(None) => {}
                Err(e) => {
                    let err = StorageError::Parse {
                        line: line_no,
                        source: e,
                    };
                    tracing::debug!("Skipping line in {:?}: {}", origin, err);
                    report.lines_skipped += 1;
                }
            }
        }

        self.stats.lines_skipped += report.lines_skipped;
        report
    }

    /// Index every file in the given order
    ///
    /// Files that cannot be opened are logged and counted, never fatal.
    pub fn build<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for path in paths {
            let path = path.as_ref();
            match self.index_file(path) {
                Ok(report) => tracing::debug!(
                    "Indexed {:?}: {} records, {} lines skipped",
                    path,
                    report.records,
                    report.lines_skipped
                ),
                Err(e) => {
                    tracing::warn!("Skipping file: {}", e);
                    self.stats.files_skipped += 1;
                }
            }
        }
    }

    /// Seal the index; no further writes are possible
    pub fn finish(self) -> UsageIndex {
        let mut stats = self.stats;
        stats.keys = self.entries.len();
        UsageIndex::from_parts(self.entries, stats)
    }
}
