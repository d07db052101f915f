//! On-disk layout of log files
//!
//! ```text
//! <root>/
//!   2023/
//!     5/
//!       14.txt
//!       15.txt
//!     10/
//!       1.txt
//! ```
//!
//! One file per calendar day. Directory and file names are not zero padded.

use crate::storage::error::{StorageError, StorageResult};
use chrono::{Datelike, NaiveDate};
use std::path::{Path, PathBuf};

const LOG_EXTENSION: &str = ".txt";

/// Path of the log file for one calendar day
pub fn day_file_path(root: &Path, date: NaiveDate) -> PathBuf {
    root.join(date.year().to_string())
        .join(date.month().to_string())
        .join(format!("{}{}", date.day(), LOG_EXTENSION))
}

/// Collect every day file under `root`
///
/// Walks exactly two directory levels (year, then month) and returns the
/// `.txt` files found in each month directory. Every level is visited in
/// lexicographic name order, so month `10` comes before month `9`. Hidden
/// entries are ignored. Directories that cannot be read are logged and
/// skipped; a missing root yields no files.
pub fn discover_log_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for year_dir in subdirectories(root) {
        for month_dir in subdirectories(&year_dir) {
            match sorted_entries(&month_dir) {
                Ok(entries) => files.extend(
                    entries
                        .into_iter()
                        .filter(|(name, path)| name.contains(LOG_EXTENSION) && path.is_file())
                        .map(|(_, path)| path),
                ),
                Err(e) => tracing::warn!("Skipping month directory: {}", e),
            }
        }
    }

    tracing::debug!("Discovered {} log files under {:?}", files.len(), root);
    files
}

fn subdirectories(dir: &Path) -> Vec<PathBuf> {
    match sorted_entries(dir) {
        Ok(entries) => entries
            .into_iter()
            .filter(|(_, path)| path.is_dir())
            .map(|(_, path)| path)
            .collect(),
        Err(e) => {
            tracing::warn!("Skipping directory: {}", e);
            Vec::new()
        }
    }
}

/// Non-hidden entries of a directory, sorted by file name
fn sorted_entries(dir: &Path) -> StorageResult<Vec<(String, PathBuf)>> {
    let read_dir = std::fs::read_dir(dir).map_err(|e| StorageError::at_path(dir, e))?;

    let mut entries: Vec<(String, PathBuf)> = read_dir
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Unreadable entry in {:?}: {}", dir, e);
                None
            }
        })
        .map(|entry| (entry.file_name().to_string_lossy().into_owned(), entry.path()))
        .filter(|(name, _)| !name.starts_with('.'))
        .collect();

    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}
