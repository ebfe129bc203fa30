//! Log line parser
//!
//! A log line has the shape `<timestamp> <level-signature> <message>`:
//! the three groups are captured by a line pattern, the level token is
//! resolved against the signature table, and the timestamp token is parsed
//! with the fixed date-time format. Any step failing fails the whole line;
//! there are no partial records.

use super::error::{ParseError, ParseResult};
use super::{LogLevel, LogRecord, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::OnceLock;

/// Pattern of a log line: timestamp token, level token, verbatim remainder
const LINE_PATTERN: &str = r"^([\d\-T:.]+)\s+(\w+)\s+(.*)$";

fn line_regex() -> &'static Regex {
    static LINE_REGEX: OnceLock<Regex> = OnceLock::new();
    LINE_REGEX.get_or_init(|| Regex::new(LINE_PATTERN).expect("log line pattern is valid"))
}

/// Parse a single log line into a [`LogRecord`]
///
/// Pure function with no side effects. Failures are typed:
/// [`ParseError::MalformedLine`] when the line does not match the pattern,
/// [`ParseError::UnknownLevel`] when the level token is not a known
/// signature, [`ParseError::InvalidTimestamp`] when the timestamp token
/// does not parse.
pub fn parse_record(line: &str) -> ParseResult<LogRecord> {
    let captures = line_regex()
        .captures(line)
        .ok_or_else(|| ParseError::MalformedLine {
            line: line.to_string(),
        })?;
    let (ts_token, level_token, message) = (&captures[1], &captures[2], &captures[3]);

    let level =
        LogLevel::for_signature(level_token).ok_or_else(|| ParseError::UnknownLevel {
            level: level_token.to_string(),
            line: line.to_string(),
        })?;

    let timestamp = NaiveDateTime::parse_from_str(ts_token, TIMESTAMP_FORMAT).map_err(|e| {
        ParseError::InvalidTimestamp {
            value: ts_token.to_string(),
            line: line.to_string(),
            source: e,
        }
    })?;

    Ok(LogRecord::new(timestamp, level, message))
}
