//! Criterion benchmarks for the timetable engine.
//!
//! Measures end-to-end pricing across path counts and time steps, plus
//! grid construction and ledger accumulation in isolation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tabula_models::dataset::Dataset;
use tabula_models::timetable::{Event, Op, Timetable};
use tabula_pricing::grid::TimeGrid;
use tabula_pricing::ledger::Ledger;
use tabula_pricing::LognormalModel;

fn european_call() -> Timetable {
    Timetable::new(vec![
        Event::new("", 1.0, Op::Add, 1.0, "SPX"),
        Event::new("", 1.0, Op::Add, -2800.0, "USD"),
        Event::new("", 1.0, Op::Floor, 0.0, "USD"),
    ])
    .expect("valid timetable")
}

fn dataset(paths: usize, timestep: f64) -> Dataset {
    Dataset::builder()
        .paths(paths)
        .timestep(timestep)
        .seed(1)
        .base_rate("USD", 0.0)
        .asset("SPX", 2900.0, 0.0)
        .volatility(0.175)
        .build()
        .expect("valid dataset")
}

/// Benchmark end-to-end pricing by path count.
fn bench_price_paths(c: &mut Criterion) {
    let timetable = european_call();
    let mut group = c.benchmark_group("price_paths");
    group.sample_size(10);

    for paths in [1_000, 10_000, 100_000] {
        let ds = dataset(paths, 1.0 / 52.0);
        group.bench_with_input(BenchmarkId::from_parameter(paths), &ds, |b, ds| {
            b.iter(|| {
                LognormalModel::price(black_box(&timetable), black_box(ds))
                    .expect("pricing should succeed")
                    .price
            })
        });
    }

    group.finish();
}

/// Benchmark end-to-end pricing by time step.
fn bench_price_timesteps(c: &mut Criterion) {
    let timetable = european_call();
    let mut group = c.benchmark_group("price_timesteps");
    group.sample_size(10);

    for steps in [12, 52, 250] {
        let ds = dataset(10_000, 1.0 / steps as f64);
        group.bench_with_input(BenchmarkId::from_parameter(steps), &ds, |b, ds| {
            b.iter(|| {
                LognormalModel::price(black_box(&timetable), black_box(ds))
                    .expect("pricing should succeed")
                    .price
            })
        });
    }

    group.finish();
}

/// Benchmark grid construction for a monthly schedule.
fn bench_grid(c: &mut Criterion) {
    let events: Vec<f64> = (1..=120).map(|m| m as f64 / 12.0).collect();
    c.bench_function("grid_monthly_10y_daily", |b| {
        b.iter(|| TimeGrid::build(black_box(&events), black_box(1.0 / 250.0)).unwrap())
    });
}

/// Benchmark ledger accumulation.
fn bench_ledger(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger_apply");
    for paths in [10_000, 100_000] {
        let flows = vec![1.0; paths];
        group.bench_with_input(BenchmarkId::from_parameter(paths), &flows, |b, flows| {
            let mut ledger = Ledger::new(1, paths);
            b.iter(|| ledger.apply(0, 1.0, Op::Floor, black_box(flows)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_price_paths,
    bench_price_timesteps,
    bench_grid,
    bench_ledger
);
criterion_main!(benches);
