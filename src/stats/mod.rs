//! Bucketed log statistics
//!
//! Consumes a timestamp-ordered record stream and counts records per
//! severity level in fixed-width, half-open time buckets. Aggregation is
//! built on the generic [`windows_by`] operator: the stream is partitioned
//! into contiguous runs sharing a bucket key, and each run reduces to one
//! [`BucketStatistic`]. A bucket is open while its run lasts and immutable
//! as soon as a record outside its interval arrives.

use crate::record::{LogLevel, LogRecord};
use crate::stream::windows_by;
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Display format for bucket boundaries in the pretty rendering
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Unit of the bucket period
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
}

impl TimeUnit {
    /// Convert an amount of this unit to milliseconds
    pub const fn to_millis(self, amount: i64) -> i64 {
        match self {
            TimeUnit::Milliseconds => amount,
            TimeUnit::Seconds => amount * 1_000,
            TimeUnit::Minutes => amount * 60_000,
            TimeUnit::Hours => amount * 3_600_000,
        }
    }
}

impl FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "milliseconds" | "ms" => Ok(TimeUnit::Milliseconds),
            "seconds" | "s" => Ok(TimeUnit::Seconds),
            "minutes" | "m" => Ok(TimeUnit::Minutes),
            "hours" | "h" => Ok(TimeUnit::Hours),
            other => Err(format!(
                "unknown time unit '{other}' (expected milliseconds, seconds, minutes or hours)"
            )),
        }
    }
}

/// Fixed bucket width: an amount of a time unit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BucketPeriod {
    pub amount: i64,
    pub unit: TimeUnit,
}

impl BucketPeriod {
    /// Create a new bucket period
    ///
    /// # Panics
    /// Panics if the period is not positive
    pub fn new(amount: i64, unit: TimeUnit) -> Self {
        assert!(amount > 0, "BucketPeriod: amount must be positive");
        Self { amount, unit }
    }

    /// Period length in milliseconds
    pub const fn millis(self) -> i64 {
        self.unit.to_millis(self.amount)
    }
}

impl Default for BucketPeriod {
    /// One-minute buckets
    fn default() -> Self {
        Self {
            amount: 1,
            unit: TimeUnit::Minutes,
        }
    }
}

/// Per-level record counts for one time bucket
///
/// Covers the half-open interval `[start_ts, end_ts)` with
/// `end_ts = start_ts + period`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BucketStatistic {
    /// Start of the interval (inclusive)
    pub start_ts: NaiveDateTime,
    /// End of the interval (exclusive)
    pub end_ts: NaiveDateTime,
    pub count_debug: u64,
    pub count_info: u64,
    pub count_warn: u64,
    pub count_err: u64,
}

impl BucketStatistic {
    /// Empty bucket covering `[start, start + period)`
    fn empty(start_millis: i64, period_millis: i64) -> Self {
        Self {
            start_ts: datetime_from_millis(start_millis),
            end_ts: datetime_from_millis(start_millis + period_millis),
            count_debug: 0,
            count_info: 0,
            count_warn: 0,
            count_err: 0,
        }
    }

    fn count(&mut self, level: LogLevel) {
        match level {
            LogLevel::Debug => self.count_debug += 1,
            LogLevel::Info => self.count_info += 1,
            LogLevel::Warn => self.count_warn += 1,
            LogLevel::Error => self.count_err += 1,
        }
    }

    /// Total records counted in this bucket
    pub fn total(&self) -> u64 {
        self.count_debug + self.count_info + self.count_warn + self.count_err
    }

    /// Tab-separated rendering with width-6 right-aligned counters
    pub fn pretty(&self) -> String {
        format!(
            "{} - {}\tDEBUG: {:>6}\tINFO: {:>6}\tWARN: {:>6}\tERR: {:>6}",
            self.start_ts.format(DISPLAY_FORMAT),
            self.end_ts.format(DISPLAY_FORMAT),
            self.count_debug,
            self.count_info,
            self.count_warn,
            self.count_err
        )
    }
}

impl std::fmt::Display for BucketStatistic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.pretty())
    }
}

fn datetime_from_millis(millis: i64) -> NaiveDateTime {
    DateTime::from_timestamp_millis(millis)
        .expect("bucket boundary is within the representable time range")
        .naive_utc()
}

/// Bucket key: the record's epoch-millisecond timestamp floored to the
/// period. Euclidean division keeps the flooring correct for pre-epoch
/// timestamps.
fn bucket_key(record: &LogRecord, period_millis: i64) -> i64 {
    record.epoch_millis().div_euclid(period_millis)
}

/// Aggregate a timestamp-ordered record stream into per-bucket level counts
///
/// Produces one [`BucketStatistic`] per distinct period-aligned bucket
/// touched, ascending, with gap-free contiguity guaranteed only when the
/// input is globally sorted - a caller responsibility, not a detected
/// error. The bucket list is materialized in full; bucket count stays far
/// below record count for realistic periods.
///
/// The first upstream failure aborts the aggregation with that error and no
/// partial output.
///
/// # Panics
/// Panics if the period is zero or negative milliseconds.
pub fn aggregate<I, E>(records: I, period: BucketPeriod) -> Result<Vec<BucketStatistic>, E>
where
    I: IntoIterator<Item = Result<LogRecord, E>>,
{
    let period_millis = period.millis();
    assert!(period_millis > 0, "aggregate: period must be positive");

    // Shunt the fallible stream: pass records through until the first
    // error, then stop pulling and remember the failure.
    let mut failure = None;
    let records = records.into_iter().map_while(|next| match next {
        Ok(record) => Some(record),
        Err(e) => {
            failure = Some(e);
            None
        }
    });

    let mut buckets = Vec::new();
    for window in windows_by(records, |record| bucket_key(record, period_millis)) {
        let key = bucket_key(&window[0], period_millis);
        let mut bucket = BucketStatistic::empty(key * period_millis, period_millis);
        for record in &window {
            bucket.count(record.level);
        }
        buckets.push(bucket);
    }

    match failure {
        Some(e) => Err(e),
        None => Ok(buckets),
    }
}
