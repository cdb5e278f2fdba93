use chrono::NaiveDateTime;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use errlog_core::{FixedClock, LogEntry, Logger, TIMESTAMP_FORMAT};

fn bench_format(c: &mut Criterion) {
    let ts = NaiveDateTime::parse_from_str("2025-03-06 12:34:56", TIMESTAMP_FORMAT)
        .unwrap_or(NaiveDateTime::UNIX_EPOCH);
    c.bench_function("entry_to_line", |b| {
        b.iter(|| {
            let e = LogEntry::new(black_box(ts), "ERROR", black_box("disk full on /var"));
            black_box(e.to_line())
        })
    });
}

fn bench_append(c: &mut Criterion) {
    let dir = match tempfile::tempdir() {
        Ok(d) => d,
        Err(_) => return,
    };
    let clock = FixedClock::parse("2025-03-06 12:34:56")
        .unwrap_or_else(|| FixedClock::new(NaiveDateTime::UNIX_EPOCH));
    let logger = Logger::with_clock(dir.path().join("bench.log"), clock);
    c.bench_function("logger_append", |b| {
        b.iter(|| logger.log("WARNING", black_box("low memory")))
    });

    let disabled = Logger::new(dir.path().join("missing/bench.log"));
    c.bench_function("disabled_logger_drop", |b| {
        b.iter(|| disabled.log("WARNING", black_box("low memory")))
    });
}

criterion_group!(benches, bench_format, bench_append);
criterion_main!(benches);
