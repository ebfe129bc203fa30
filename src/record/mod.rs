//! Core log record types
//!
//! This module defines the data that flows through the pipeline:
//! - `LogLevel`: closed set of severity levels and their wire signatures
//! - `LogRecord`: a single parsed log line (timestamp, level, message)
//!
//! Records are created once by the parser, consumed exactly once downstream,
//! and never mutated.

mod error;
mod parser;

pub use error::{ParseError, ParseResult};
pub use parser::parse_record;

use chrono::NaiveDateTime;

/// Format of the timestamp token in a log line.
///
/// An ISO-8601-like local date-time, e.g. `2020-01-01T10:00:00.000`.
/// Fractional seconds are optional on input.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Rendering always carries millisecond precision.
const TIMESTAMP_RENDER_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Severity level of a log record
///
/// Each variant maps to a canonical textual signature in the wire format.
/// The mapping is total and case-exact in both directions. Note the
/// intentional asymmetry: `Warn`'s wire signature is literally `WARNING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// The level's signature as it appears in a log line
    pub const fn signature(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }

    /// Resolve a signature token to its level (case-exact)
    pub fn for_signature(signature: &str) -> Option<LogLevel> {
        LogLevel::all()
            .iter()
            .copied()
            .find(|level| level.signature() == signature)
    }

    /// Get all levels for iteration
    pub fn all() -> &'static [LogLevel] {
        &[
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
        ]
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.signature())
    }
}

/// A single log record
///
/// Ordering for merge purposes uses the timestamp only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Local date-time of the record (the wire format carries no zone)
    pub timestamp: NaiveDateTime,
    /// Severity level
    pub level: LogLevel,
    /// Verbatim remainder of the line
    pub message: String,
}

impl LogRecord {
    /// Create a new record
    pub fn new(timestamp: NaiveDateTime, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            level,
            message: message.into(),
        }
    }

    /// Timestamp as epoch milliseconds, read through UTC
    pub fn epoch_millis(&self) -> i64 {
        self.timestamp.and_utc().timestamp_millis()
    }

    /// Render the record back to its wire line form
    ///
    /// Re-parsing the result yields an equal record, provided the timestamp
    /// holds at most millisecond precision and the message contains no
    /// newline.
    pub fn to_line(&self) -> String {
        format!(
            "{} {} {}",
            self.timestamp.format(TIMESTAMP_RENDER_FORMAT),
            self.level.signature(),
            self.message
        )
    }
}

impl std::fmt::Display for LogRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_level_signatures() {
        assert_eq!(LogLevel::Debug.signature(), "DEBUG");
        assert_eq!(LogLevel::Info.signature(), "INFO");
        assert_eq!(LogLevel::Warn.signature(), "WARNING");
        assert_eq!(LogLevel::Error.signature(), "ERROR");
    }

    #[test]
    fn test_level_for_signature() {
        assert_eq!(LogLevel::for_signature("WARNING"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::for_signature("INFO"), Some(LogLevel::Info));

        // Case-exact: no normalization, and the enum name is not a signature
        assert_eq!(LogLevel::for_signature("warning"), None);
        assert_eq!(LogLevel::for_signature("WARN"), None);
        assert_eq!(LogLevel::for_signature("TRACE"), None);
    }

    #[test]
    fn test_signature_mapping_is_total() {
        for level in LogLevel::all() {
            assert_eq!(LogLevel::for_signature(level.signature()), Some(*level));
        }
    }

    #[test]
    fn test_record_to_line() {
        let record = LogRecord::new(ts(10, 0, 0), LogLevel::Warn, "disk almost full");
        assert_eq!(
            record.to_line(),
            "2020-01-01T10:00:00.000 WARNING disk almost full"
        );
    }

    #[test]
    fn test_epoch_millis() {
        let record = LogRecord::new(ts(0, 0, 0), LogLevel::Info, "x");
        assert_eq!(record.epoch_millis(), 1_577_836_800_000);
    }
}
