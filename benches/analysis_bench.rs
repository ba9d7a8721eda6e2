//! Benchmarks for the analysis routines
//!
//! Run with: cargo bench

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ratedash::analysis::{advise_axis_scaling, correlation_matrix, StatisticsEngine};
use ratedash::series::{Column, SeriesTable};

/// Daily dates with a mix of yield-like and FX-like columns
fn create_test_table(rows: usize, columns: usize) -> SeriesTable {
    let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
    let dates = (0..rows).map(|i| start + Duration::days(i as i64)).collect();

    let columns = (0..columns)
        .map(|c| {
            let level = if c % 2 == 0 { 3.0 } else { 1300.0 };
            let values = (0..rows)
                .map(|i| {
                    if i % 17 == 0 {
                        None
                    } else {
                        Some(level + ((i + c) as f64 * 0.1).sin() * level * 0.05)
                    }
                })
                .collect();
            Column::new(format!("series_{}", c), values)
        })
        .collect();

    SeriesTable::new(dates, columns).unwrap()
}

fn bench_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");
    let engine = StatisticsEngine::default();

    for rows in [250, 2500] {
        let table = create_test_table(rows, 4);

        group.throughput(Throughput::Elements((rows * 4) as u64));

        group.bench_function(format!("compute_table_{}", rows), |b| {
            b.iter(|| engine.compute_table(black_box(&table)))
        });
    }

    group.finish();
}

fn bench_axis(c: &mut Criterion) {
    let table = create_test_table(2500, 8);

    c.bench_function("advise_axis_scaling_8x2500", |b| {
        b.iter(|| advise_axis_scaling(black_box(&table), 5.0))
    });
}

fn bench_correlations(c: &mut Criterion) {
    let table = create_test_table(2500, 8);

    c.bench_function("correlation_matrix_8x2500", |b| {
        b.iter(|| correlation_matrix(black_box(&table)))
    });
}

criterion_group!(benches, bench_statistics, bench_axis, bench_correlations);
criterion_main!(benches);
