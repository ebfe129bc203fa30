//! Test-data generator
//!
//! Writes synthetic log files for exercising the pipeline. The only
//! guarantees are syntactic validity and per-file ascending timestamps -
//! exactly what the analysis stages assume of real input. Levels and
//! messages are random; consumers must not rely on their distribution.

use crate::record::{LogLevel, LogRecord};
use chrono::{Duration, NaiveDateTime};
use rand::rngs::ThreadRng;
use rand::Rng;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Maximum random gap between consecutive generated records
const MAX_STEP_MILLIS: i64 = 5 * 60 * 1000;

/// Word pool for generated messages
const WORDS: &[&str] = &[
    "connection",
    "established",
    "request",
    "timed",
    "out",
    "cache",
    "miss",
    "user",
    "session",
    "expired",
    "retrying",
    "upstream",
    "payload",
    "accepted",
    "queue",
    "drained",
    "worker",
    "started",
    "shutdown",
    "complete",
];

/// Generator of log records with monotonically advancing timestamps
///
/// A single clock cursor is shared across all output files, so each file
/// receives an ascending subsequence of one globally ascending stream.
pub struct LogGenerator<R: Rng> {
    rng: R,
    cursor: NaiveDateTime,
}

impl LogGenerator<ThreadRng> {
    /// Generator starting at `start`, driven by the thread RNG
    pub fn new(start: NaiveDateTime) -> Self {
        Self::with_rng(start, rand::thread_rng())
    }
}

impl<R: Rng> LogGenerator<R> {
    /// Generator with an explicit RNG (deterministic in tests)
    pub fn with_rng(start: NaiveDateTime, rng: R) -> Self {
        Self { rng, cursor: start }
    }

    /// Produce the next record and advance the clock by a random
    /// 0-5 minute step
    pub fn next_record(&mut self) -> LogRecord {
        let level = LogLevel::all()[self.rng.gen_range(0..LogLevel::all().len())];
        let word_count = self.rng.gen_range(3..8);
        let message = (0..word_count)
            .map(|_| WORDS[self.rng.gen_range(0..WORDS.len())])
            .collect::<Vec<_>>()
            .join(" ");

        let record = LogRecord::new(self.cursor, level, message);
        self.cursor += Duration::milliseconds(self.rng.gen_range(0..MAX_STEP_MILLIS));
        record
    }

    /// Write `record_count` records spread randomly across `file_count`
    /// files under `dir` (`log-1.txt`, `log-2.txt`, ...)
    ///
    /// Creates the directory if needed and returns the written paths.
    pub fn write_files(
        &mut self,
        dir: &Path,
        file_count: usize,
        record_count: usize,
    ) -> io::Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;

        let paths: Vec<PathBuf> = (1..=file_count)
            .map(|i| dir.join(format!("log-{i}.txt")))
            .collect();
        let mut writers = paths
            .iter()
            .map(|path| File::create(path).map(BufWriter::new))
            .collect::<io::Result<Vec<_>>>()?;

        for _ in 0..record_count {
            let record = self.next_record();
            let index = self.rng.gen_range(0..writers.len());
            writeln!(writers[index], "{record}")?;
        }
        for writer in &mut writers {
            writer.flush()?;
        }

        tracing::debug!(
            "Generated {} records across {} files under {:?}",
            record_count,
            file_count,
            dir
        );
        Ok(paths)
    }
}
