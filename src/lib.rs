//! # logstat
//!
//! Streaming log statistics: merges any number of individually sorted log
//! files into one timestamp-ordered stream and counts records per severity
//! level in fixed-width time buckets, without materializing whole files in
//! memory.
//!
//! ## Pipeline
//!
//! ```text
//! N files → N record streams → ordered merge (folded) → bucket aggregation
//! ```
//!
//! The whole chain is pull-based: the consumer drives production, buffering
//! stays bounded (one line of read-ahead per file, one pending element per
//! merge side, one open bucket), and dropping the chain releases the file
//! handles. Ordering is preserved, never created: the output is totally
//! ordered by timestamp iff every input file was.
//!
//! ## Modules
//!
//! - [`record`]: log levels, records, and the line parser
//! - [`stream`]: lazy record streams, ordered merge, keyed windowing
//! - [`stats`]: bucketed per-level statistics
//! - [`pipeline`]: end-to-end wiring from file list to bucket list
//! - [`generator`]: synthetic test-data generation
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use logstat::pipeline;
//! use logstat::stats::BucketPeriod;
//! use std::path::PathBuf;
//!
//! fn main() -> Result<(), logstat::StreamError> {
//!     let files = vec![
//!         PathBuf::from("data/log-1.txt"),
//!         PathBuf::from("data/log-2.txt"),
//!     ];
//!
//!     // One-minute buckets by default
//!     let buckets = pipeline::run(&files, BucketPeriod::default())?;
//!
//!     for bucket in &buckets {
//!         println!("{bucket}");
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod generator;
pub mod pipeline;
pub mod record;
pub mod stats;
pub mod stream;

// Re-export top-level types for convenience
pub use record::{parse_record, LogLevel, LogRecord, ParseError, ParseResult};

pub use stream::{
    merge_all, open_log, windows_by, BoxedRecordStream, Merge, RecordStream, StreamError,
    StreamResult, WindowsBy,
};

pub use stats::{aggregate, BucketPeriod, BucketStatistic, TimeUnit};

pub use config::{Config, ConfigError};

pub use generator::LogGenerator;
