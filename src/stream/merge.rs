//! Ordered merge of sorted record streams
//!
//! Neither the standard library nor the surrounding stack offers an adaptor
//! for merging pre-sorted fallible streams into one ordered stream, so the
//! binary merge lives here and is folded pairwise over the per-file streams.

use super::{BoxedRecordStream, StreamError, StreamResult};
use crate::record::LogRecord;

/// Merges two timestamp-ordered record streams into one ordered stream
///
/// Both inputs must be individually sorted ascending; the output then
/// contains every element of both exactly once, ascending. At most one
/// element per side is buffered between pulls, so memory use is independent
/// of input size. On equal timestamps the left side wins, which keeps the
/// interleaving stable.
///
/// The first error from either side halts the merge: the error is yielded,
/// both buffered elements are dropped, and the stream is exhausted.
pub struct Merge<L, R> {
    left: L,
    right: R,
    pending_left: Option<LogRecord>,
    pending_right: Option<LogRecord>,
    done: bool,
}

impl<L, R> Merge<L, R>
where
    L: Iterator<Item = StreamResult<LogRecord>>,
    R: Iterator<Item = StreamResult<LogRecord>>,
{
    pub fn new(left: L, right: R) -> Self {
        Self {
            left,
            right,
            pending_left: None,
            pending_right: None,
            done: false,
        }
    }

    fn fail(&mut self, e: StreamError) -> StreamResult<LogRecord> {
        // Terminal: release buffered elements and stop pulling either side
        self.pending_left = None;
        self.pending_right = None;
        self.done = true;
        Err(e)
    }
}

impl<L, R> Iterator for Merge<L, R>
where
    L: Iterator<Item = StreamResult<LogRecord>>,
    R: Iterator<Item = StreamResult<LogRecord>>,
{
    type Item = StreamResult<LogRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        // Refill whichever side has no pending element. A side that is
        // exhausted simply leaves its slot empty.
        if self.pending_left.is_none() {
            match self.left.next() {
                Some(Ok(record)) => self.pending_left = Some(record),
                Some(Err(e)) => return Some(self.fail(e)),
                None => {}
            }
        }
        if self.pending_right.is_none() {
            match self.right.next() {
                Some(Ok(record)) => self.pending_right = Some(record),
                Some(Err(e)) => return Some(self.fail(e)),
                None => {}
            }
        }

        match (&self.pending_left, &self.pending_right) {
            // Both sides available: emit the earlier, keep the other pending.
            // Ties go left so the interleaving is stable.
            (Some(l), Some(r)) => {
                if l.timestamp <= r.timestamp {
                    self.pending_left.take().map(Ok)
                } else {
                    self.pending_right.take().map(Ok)
                }
            }
            // One side exhausted: drain the other, one element per pull
            (Some(_), None) => self.pending_left.take().map(Ok),
            (None, Some(_)) => self.pending_right.take().map(Ok),
            // Both exhausted and nothing pending
            (None, None) => {
                self.done = true;
                None
            }
        }
    }
}

/// Merge any number of pre-sorted record streams by folding the binary
/// merge left over the list
///
/// `merge(merge(merge(s1, s2), s3), s4)...` - O(N) comparisons per emitted
/// element in the worst case rather than a heap merge's O(log N), which is
/// acceptable because N is the file count, not the record count. An empty
/// list yields an empty stream; a single stream passes through untouched.
pub fn merge_all(streams: Vec<BoxedRecordStream>) -> BoxedRecordStream {
    streams
        .into_iter()
        .reduce(|acc, next| Box::new(Merge::new(acc, next)) as BoxedRecordStream)
        .unwrap_or_else(|| Box::new(std::iter::empty()))
}
