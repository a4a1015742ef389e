//! Benchmarks for the full binning and rendering cycle.
//!
//! Run with: cargo bench --package renderer --bench render_benchmarks

use binning::{bin_readings, interpolate, visible_readings};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pressure_common::MapConfig;
use renderer::{project, ColorGradient};
use test_utils::fixtures::bbox;
use test_utils::scattered_readings;

fn bench_binning(c: &mut Criterion) {
    let mut group = c.benchmark_group("bin_readings");

    for count in [1_000usize, 10_000, 100_000] {
        let readings = scattered_readings(&bbox::CONUS, count, 42);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &readings, |b, readings| {
            b.iter(|| bin_readings(black_box(readings), 5).unwrap())
        });
    }

    group.finish();
}

fn bench_interpolation(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpolate");
    let readings = scattered_readings(&bbox::CONUS, 2_000, 42);

    for key_length in [3usize, 4] {
        let cells = bin_readings(&readings, key_length).unwrap();
        group.bench_with_input(BenchmarkId::new("passes_10", key_length), &cells, |b, cells| {
            b.iter(|| {
                let mut cells = cells.clone();
                interpolate(&mut cells, 10).unwrap()
            })
        });
    }

    group.finish();
}

fn bench_full_cycle(c: &mut Criterion) {
    let config = MapConfig::default();
    let gradient = ColorGradient::from_config(&config).unwrap();
    let readings = scattered_readings(&bbox::CONUS, 20_000, 7);

    c.bench_function("full_cycle_conus_20k", |b| {
        b.iter(|| {
            let visible = visible_readings(black_box(&readings), &bbox::CONUS, &config);
            let mut cells = bin_readings(&visible, 4).unwrap();
            interpolate(&mut cells, config.interpolation_passes).unwrap();
            project(&cells, &visible, &gradient, config.fill_opacity).unwrap()
        })
    });
}

criterion_group!(benches, bench_binning, bench_interpolation, bench_full_cycle);
criterion_main!(benches);
