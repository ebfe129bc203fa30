//! Benchmarks for the logstat pipeline
//!
//! Run with: cargo bench

use chrono::{Duration, NaiveDate, NaiveDateTime};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use logstat::record::{parse_record, LogLevel, LogRecord};
use logstat::stats::{aggregate, BucketPeriod};
use logstat::stream::{merge_all, BoxedRecordStream, StreamError};

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Sorted records starting at `offset_millis`, one every `step_millis`
fn test_records(count: usize, offset_millis: i64, step_millis: i64) -> Vec<LogRecord> {
    (0..count)
        .map(|i| {
            LogRecord::new(
                base() + Duration::milliseconds(offset_millis + i as i64 * step_millis),
                LogLevel::all()[i % 4],
                format!("record {i}"),
            )
        })
        .collect()
}

fn stream_of(records: Vec<LogRecord>) -> BoxedRecordStream {
    Box::new(records.into_iter().map(Ok::<_, StreamError>))
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Elements(1));

    group.bench_function("parse_line", |b| {
        b.iter(|| parse_record(black_box("2020-01-01T10:00:00.123 WARNING low disk space on /var")))
    });

    group.bench_function("reject_malformed", |b| {
        b.iter(|| parse_record(black_box("not a log line at all")).is_err())
    });

    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");

    for file_count in [2, 4, 8] {
        let per_file = 10_000;
        group.throughput(Throughput::Elements((file_count * per_file) as u64));

        group.bench_function(format!("merge_{}x{}", file_count, per_file), |b| {
            b.iter(|| {
                let streams: Vec<BoxedRecordStream> = (0..file_count)
                    .map(|i| stream_of(test_records(per_file, i as i64 * 37, 1_000)))
                    .collect();
                merge_all(streams).count()
            })
        });
    }

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    let count = 100_000;
    group.throughput(Throughput::Elements(count as u64));

    group.bench_function("aggregate_100k", |b| {
        b.iter(|| {
            let records = test_records(count, 0, 500).into_iter().map(Ok::<_, StreamError>);
            aggregate(black_box(records), BucketPeriod::default()).unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_merge, bench_aggregate);
criterion_main!(benches);
