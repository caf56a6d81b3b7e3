//! Benchmarks for color-cycle puzzle generation.
//!
//! Measures the complete generation process - scramble, solution
//! construction, replay verification, and (on small boards) the exhaustive
//! shortening search - for the smallest and largest built-in levels.
//!
//! Fixed seeds keep the runs reproducible while covering distinct cases.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench cycle
//! ```

use std::{hint, str::FromStr as _, time::Duration};

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use gridweave_generator::{CycleGenerator, PuzzleSeed};

const SEEDS: [&str; 3] = [
    "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1",
    "a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b3",
    "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef",
];

fn bench_level(c: &mut Criterion, name: &str, level_index: usize) {
    let generator = CycleGenerator::for_level(level_index);
    for (i, seed) in SEEDS.into_iter().enumerate() {
        let seed = PuzzleSeed::from_str(seed).unwrap();
        c.bench_with_input(BenchmarkId::new(name, format!("seed_{i}")), &seed, |b, seed| {
            b.iter_batched(
                || hint::black_box(*seed),
                |seed| generator.generate_with_seed(seed),
                BatchSize::SmallInput,
            );
        });
    }
}

fn bench_cycle_small(c: &mut Criterion) {
    bench_level(c, "cycle_level_0", 0);
}

fn bench_cycle_large(c: &mut Criterion) {
    bench_level(c, "cycle_level_5", 5);
}

criterion_group!(
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(10));
    targets = bench_cycle_small, bench_cycle_large
);
criterion_main!(benches);
