use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use modelboard::dashboard::{Metric, project_with_offset, value_range};
use modelboard::gateway::{HistoryRecord, RunMetrics};
use std::hint::black_box;
use time::UtcOffset;

const RUN_COUNT: usize = 2_000;

fn history(count: usize) -> Vec<HistoryRecord> {
    (0..count)
        .map(|i| {
            let day = i % 28 + 1;
            let hour = i % 24;
            HistoryRecord {
                run_id: Some(i.to_string()),
                timestamp: match i % 3 {
                    0 => format!("2024-02-{day:02}T{hour:02}:00:00Z"),
                    1 => format!("2024-02-{day:02} {hour:02}:30:00"),
                    _ => format!("Thu, 01 Feb 2024 {hour:02}:15:00 GMT"),
                },
                metrics: Some(RunMetrics {
                    accuracy: Some((i % 100) as f64 / 100.0),
                    precision: (i % 7 != 0).then_some(0.5),
                    recall: None,
                    f1_score: Some(0.7),
                }),
                ..HistoryRecord::default()
            }
        })
        .collect()
}

fn bench_projection(c: &mut Criterion) {
    let records = history(RUN_COUNT);
    c.bench_function("project_accuracy", |b| {
        b.iter(|| {
            let points = project_with_offset(
                black_box(&records),
                Metric::Accuracy,
                UtcOffset::UTC,
            );
            black_box(value_range(&points))
        })
    });

    c.bench_function("project_after_refetch", |b| {
        b.iter_batched(
            || history(RUN_COUNT),
            |records| project_with_offset(&records, Metric::Precision, UtcOffset::UTC),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_projection);
criterion_main!(benches);
