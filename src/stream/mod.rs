//! Lazy record streams
//!
//! The pipeline is pull-based: the consumer drives production, so inputs
//! larger than memory can be processed with bounded buffering. This module
//! provides:
//!
//! - [`RecordStream`]: composes a buffered line source with the parser into
//!   a lazy, fallible stream of records
//! - [`merge`]: ordered merge of pre-sorted record streams
//! - [`window`]: generic partitioning of a stream into contiguous keyed runs
//!
//! Every per-file stream is assumed individually sorted ascending by
//! timestamp. The merge preserves global order only under that assumption;
//! the system merges, it never sorts.

pub mod merge;
pub mod window;

pub use merge::{merge_all, Merge};
pub use window::{windows_by, WindowsBy};

use crate::record::{parse_record, LogRecord, ParseError};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while pulling records through the pipeline
#[derive(Error, Debug)]
pub enum StreamError {
    /// Reading a line from the source failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Opening an input file failed
    #[error("Failed to open log file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result type alias for stream operations
pub type StreamResult<T> = Result<T, StreamError>;

/// A boxed record stream, as produced per input file and consumed by the
/// merge fold
pub type BoxedRecordStream = Box<dyn Iterator<Item = StreamResult<LogRecord>>>;

/// Lazy stream of parsed records over a buffered line source
///
/// Lines are read one at a time as the consumer pulls, never all at once.
/// The stream is fail-fast: the first IO or parse error is yielded once,
/// after which the stream is exhausted. The underlying reader is released
/// when the stream is dropped.
#[derive(Debug)]
pub struct RecordStream<R: BufRead> {
    lines: io::Lines<R>,
    failed: bool,
}

impl<R: BufRead> RecordStream<R> {
    /// Wrap a line source
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            failed: false,
        }
    }
}

impl<R: BufRead> Iterator for RecordStream<R> {
    type Item = StreamResult<LogRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let line = match self.lines.next()? {
            Ok(line) => line,
            Err(e) => {
                self.failed = true;
                return Some(Err(StreamError::Io(e)));
            }
        };
        match parse_record(&line) {
            Ok(record) => Some(Ok(record)),
            Err(e) => {
                self.failed = true;
                Some(Err(e.into()))
            }
        }
    }
}

/// Open a log file as a lazy record stream
pub fn open_log(path: &Path) -> StreamResult<RecordStream<BufReader<File>>> {
    let file = File::open(path).map_err(|e| StreamError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(RecordStream::new(BufReader::new(file)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::LogLevel;
    use std::io::Cursor;

    #[test]
    fn test_record_stream_parses_lines_in_order() {
        let input = "2020-01-01T10:00:00.000 INFO a\n2020-01-01T10:00:01.000 ERROR b\n";
        let records: Vec<_> = RecordStream::new(Cursor::new(input))
            .collect::<StreamResult<Vec<_>>>()
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].level, LogLevel::Info);
        assert_eq!(records[1].level, LogLevel::Error);
        assert!(records[0].timestamp < records[1].timestamp);
    }

    #[test]
    fn test_record_stream_is_fail_fast() {
        let input = "2020-01-01T10:00:00.000 INFO a\nnot a log line\n2020-01-01T10:00:02.000 INFO c\n";
        let mut stream = RecordStream::new(Cursor::new(input));

        assert!(stream.next().unwrap().is_ok());
        assert!(matches!(
            stream.next().unwrap(),
            Err(StreamError::Parse(ParseError::MalformedLine { .. }))
        ));
        // Fused after the failure: the valid third line is never produced
        assert!(stream.next().is_none());
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_empty_source_yields_nothing() {
        let mut stream = RecordStream::new(Cursor::new(""));
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_open_log_missing_file() {
        let err = open_log(Path::new("/nonexistent/log-1.txt")).unwrap_err();
        assert!(matches!(err, StreamError::Open { .. }));
    }
}
