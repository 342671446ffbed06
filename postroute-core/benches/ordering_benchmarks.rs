//! Criterion benchmarks for route ordering.
//!
//! Measures nearest-neighbour and radial ordering across 10, 100 and 500
//! intermediates scattered over a city-sized area. The greedy heuristic is
//! quadratic, so the larger sizes show where it starts to bite.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package postroute-core
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use postroute_core::{OrderingStrategy, Waypoint};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed for deterministic waypoint generation.
const BENCHMARK_SEED: u64 = 42;

/// Intermediate counts to benchmark.
const PROBLEM_SIZES: &[usize] = &[10, 100, 500];

/// South-west corner of the generated area (Bournemouth).
const ORIGIN: (f64, f64) = (50.70, -1.95);

/// Side of the generated area in degrees, roughly 10 km.
const AREA_SIZE: f64 = 0.1;

/// Generate `count` waypoints uniformly inside the benchmark area.
fn generate_waypoints(count: usize, seed: u64) -> Vec<Waypoint> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .filter_map(|index| {
            let latitude = ORIGIN.0 + rng.gen_range(0.0..AREA_SIZE);
            let longitude = ORIGIN.1 + rng.gen_range(0.0..AREA_SIZE);
            Waypoint::new(format!("P{index}"), latitude, longitude).ok()
        })
        .collect()
}

fn bench_ordering(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_route");
    let Ok(start) = Waypoint::new("S", ORIGIN.0, ORIGIN.1) else {
        return;
    };
    let Ok(destination) = Waypoint::new("D", ORIGIN.0 + AREA_SIZE, ORIGIN.1 + AREA_SIZE) else {
        return;
    };

    for &size in PROBLEM_SIZES {
        let intermediates = generate_waypoints(size, BENCHMARK_SEED);
        group.throughput(Throughput::Elements(size as u64));

        for strategy in [OrderingStrategy::NearestNeighbour, OrderingStrategy::Radial] {
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), size),
                &intermediates,
                |b, stops| b.iter(|| strategy.order(&start, stops, &destination)),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_ordering);
criterion_main!(benches);
