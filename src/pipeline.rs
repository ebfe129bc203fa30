//! End-to-end analysis pipeline
//!
//! Wires the stages together: one lazy record stream per input file, the
//! ordered merge folded over all of them, and bucket aggregation at the
//! end. The whole chain is pull-based and single-threaded; file handles are
//! owned by the stream chain and released when it is dropped, on every exit
//! path including failure.

use crate::stats::{aggregate, BucketPeriod, BucketStatistic};
use crate::stream::{merge_all, open_log, BoxedRecordStream, StreamResult};
use std::path::PathBuf;

/// Merge the given pre-sorted log files and count records per severity
/// level in fixed-width time buckets
///
/// Every file must be individually sorted ascending by timestamp; the
/// merge preserves global order under that assumption but never sorts.
/// The first IO or parse failure in any file aborts the whole run with
/// that error - no partial bucket list is ever returned.
pub fn run(files: &[PathBuf], period: BucketPeriod) -> StreamResult<Vec<BucketStatistic>> {
    let mut streams: Vec<BoxedRecordStream> = Vec::with_capacity(files.len());
    for path in files {
        tracing::debug!("Opening log file {:?}", path);
        streams.push(Box::new(open_log(path)?));
    }

    let buckets = aggregate(merge_all(streams), period)?;

    tracing::info!(
        "Aggregated {} files into {} buckets",
        files.len(),
        buckets.len()
    );
    Ok(buckets)
}
