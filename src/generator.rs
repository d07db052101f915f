//! Synthetic log generator
//!
//! Writes day files in the layout the indexer reads, with one sample per
//! server per core at every interval step. Usage values are uniform in
//! 0..=100.
//!
//! Server `n` is addressed as `192.168.<n / 254 + 1>.<n % 254 + 1>`, which
//! caps a run at 254 * 254 servers.

use crate::config::GeneratorConfig;
use crate::storage::{day_file_path, AbsoluteTime, StorageError, StorageResult, Zone, HEADER_LINE};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Largest number of distinct server addresses
pub const MAX_SERVERS: usize = 254 * 254;

/// Address of the `n`-th simulated server (0-based)
pub fn server_ip(n: usize) -> String {
    format!("192.168.{}.{}", n / 254 + 1, n % 254 + 1)
}

pub struct LogGenerator {
    servers: usize,
    cpus_per_server: u16,
    interval_secs: i64,
    rng: StdRng,
}

impl LogGenerator {
    pub fn new(config: &GeneratorConfig) -> Self {
        if config.servers > MAX_SERVERS {
            tracing::warn!(
                "Generator supports at most {} servers, capping {}",
                MAX_SERVERS,
                config.servers
            );
        }

        Self {
            servers: config.servers.min(MAX_SERVERS),
            cpus_per_server: config.cpus_per_server,
            interval_secs: i64::try_from(config.interval_secs.max(1)).unwrap_or(i64::MAX),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Use a fixed seed for reproducible output
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Lines (excluding the header) written per interval step
    pub fn lines_per_step(&self) -> usize {
        self.servers * self.cpus_per_server as usize
    }

    /// Write a header plus samples for every step in `[start, end)`
    ///
    /// Returns the number of data lines written.
    pub fn write_range<W: Write>(
        &mut self,
        writer: &mut W,
        start: AbsoluteTime,
        end: AbsoluteTime,
    ) -> io::Result<u64> {
        writeln!(writer, "{}", HEADER_LINE)?;

        let addresses: Vec<String> = (0..self.servers).map(server_ip).collect();
        let mut written = 0u64;
        let mut timestamp = start;

        while timestamp < end {
            for ip in &addresses {
                for cpu in 0..self.cpus_per_server {
                    let usage: u8 = self.rng.random_range(0..=100);
                    writeln!(writer, "{}\t{}\t{} {}", timestamp, ip, cpu, usage)?;
                    written += 1;
                }
            }
            match timestamp.checked_add(self.interval_secs) {
                Some(next) => timestamp = next,
                None => break,
            }
        }

        Ok(written)
    }

    /// Append one calendar day of samples to `<root>/<year>/<month>/<day>.txt`
    pub fn generate_day(
        &mut self,
        root: &Path,
        date: NaiveDate,
        zone: Zone,
    ) -> StorageResult<PathBuf> {
        let start = zone
            .day_start(date)
            .ok_or_else(|| StorageError::InvalidTime(format!("start of {}", date)))?;
        let end = date
            .succ_opt()
            .and_then(|next| zone.day_start(next))
            .ok_or_else(|| StorageError::InvalidTime(format!("end of {}", date)))?;

        let path = day_file_path(root, date);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::at_path(parent, e))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| StorageError::at_path(&path, e))?;
        let mut writer = BufWriter::new(file);

        let written = self
            .write_range(&mut writer, start, end)
            .and_then(|n| writer.flush().map(|_| n))
            .map_err(|e| StorageError::at_path(&path, e))?;

        tracing::info!("Wrote {} samples for {} to {:?}", written, date, path);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{IndexKey, UsageIndex};
    use crate::storage::{discover_log_files, parse_line};
    use tempfile::tempdir;

    fn small_config() -> GeneratorConfig {
        GeneratorConfig {
            servers: 3,
            cpus_per_server: 2,
            interval_secs: 60,
        }
    }

    #[test]
    fn test_server_ip() {
        assert_eq!(server_ip(0), "192.168.1.1");
        assert_eq!(server_ip(253), "192.168.1.254");
        assert_eq!(server_ip(254), "192.168.2.1");
        assert_eq!(server_ip(MAX_SERVERS - 1), "192.168.254.254");
    }

    #[test]
    fn test_write_range_is_parseable() {
        let mut generator = LogGenerator::new(&small_config()).with_seed(7);
        let mut buf = Vec::new();
        let written = generator.write_range(&mut buf, 0, 180).unwrap();

        // 3 steps * 3 servers * 2 cpus
        assert_eq!(written, 18);

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(parse_line(lines.next().unwrap()), Ok(None));

        let records: Vec<_> = lines.map(|l| parse_line(l).unwrap().unwrap()).collect();
        assert_eq!(records.len(), 18);
        assert!(records.iter().all(|r| r.usage <= 100));
        assert_eq!(records[0].server_ip, "192.168.1.1");
        assert_eq!(records[0].cpu_id, 0);
        assert_eq!(records[1].cpu_id, 1);
        assert_eq!(records.last().unwrap().timestamp, 120);
    }

    #[test]
    fn test_seed_is_reproducible() {
        let mut a = LogGenerator::new(&small_config()).with_seed(42);
        let mut b = LogGenerator::new(&small_config()).with_seed(42);
        let (mut out_a, mut out_b) = (Vec::new(), Vec::new());
        a.write_range(&mut out_a, 0, 600).unwrap();
        b.write_range(&mut out_b, 0, 600).unwrap();
        assert_eq!(out_a, out_b);
    }

    #[test]
    fn test_server_count_is_capped() {
        let config = GeneratorConfig {
            servers: MAX_SERVERS + 10,
            cpus_per_server: 1,
            interval_secs: 60,
        };
        let generator = LogGenerator::new(&config);
        assert_eq!(generator.lines_per_step(), MAX_SERVERS);
    }

    #[test]
    fn test_huge_interval_writes_one_step() {
        let config = GeneratorConfig {
            servers: 1,
            cpus_per_server: 1,
            interval_secs: u64::MAX,
        };
        let mut generator = LogGenerator::new(&config).with_seed(7);
        let mut out = Vec::new();
        assert_eq!(generator.write_range(&mut out, 1_684_022_400, 1_684_108_800).unwrap(), 1);
    }

    #[test]
    fn test_generate_day_feeds_index() {
        let dir = tempdir().unwrap();
        let config = GeneratorConfig {
            servers: 2,
            cpus_per_server: 2,
            interval_secs: 3600,
        };
        let date = NaiveDate::from_ymd_opt(2023, 5, 14).unwrap();

        let mut generator = LogGenerator::new(&config).with_seed(1);
        let path = generator.generate_day(dir.path(), date, Zone::Utc).unwrap();
        assert_eq!(path, dir.path().join("2023/5/14.txt"));

        let index = UsageIndex::build(discover_log_files(dir.path()));
        assert_eq!(index.len(), 4);

        let samples = index.lookup(&IndexKey::new("192.168.1.2", 1)).unwrap();
        assert_eq!(samples.len(), 24);
        assert_eq!(samples[0].timestamp, 1684022400);
        assert_eq!(samples[23].timestamp, 1684022400 + 23 * 3600);
    }
}
