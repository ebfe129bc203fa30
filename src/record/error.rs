//! Parser error types
//!
//! Parsing is all-or-nothing: any failure carries the offending line's
//! original text and, where one exists, the underlying cause.

use thiserror::Error;

/// Errors that can occur when parsing a log line
#[derive(Error, Debug)]
pub enum ParseError {
    /// Line does not match the `<timestamp> <level> <message>` shape
    #[error("Malformed log line: '{line}'")]
    MalformedLine { line: String },

    /// Level token is not one of the known signatures
    #[error("Unknown log level '{level}' in line '{line}'")]
    UnknownLevel { level: String, line: String },

    /// Timestamp token does not parse with the expected format
    #[error("Invalid timestamp '{value}' in line '{line}': {source}")]
    InvalidTimestamp {
        value: String,
        line: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Result type alias for parse operations
pub type ParseResult<T> = Result<T, ParseError>;
