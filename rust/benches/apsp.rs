//! Floyd–Warshall engines on random graphs of growing size.
//!
//! Run with: cargo bench -p apsp_bench --bench apsp

use std::time::Duration;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, SeedableRng};

use apsp_bench::{Engine, RunConfig, Runner};
use apsp_tools::generate::{random_edges, GraphSpec};
use apsp_tools::DistanceMatrix;

fn random_graph(n: usize, density: u32, seed: u64) -> DistanceMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    DistanceMatrix::from_edges(n, random_edges(&GraphSpec::new(n, density), &mut rng))
}

fn bench_engines(c: &mut Criterion) {
    let mut group = c.benchmark_group("floyd_warshall");
    group.sample_size(10);
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for &n in &[64, 128, 256] {
        // n^3 relaxations per run
        group.throughput(Throughput::Elements((n * n * n) as u64));
        let graph = random_graph(n, 30, 42);

        for &engine in Engine::ALL.iter() {
            let runner = Runner::new(engine, RunConfig::default()).unwrap();
            group.bench_with_input(BenchmarkId::new(engine.name(), n), &graph, |bench, graph| {
                bench.iter_batched_ref(
                    || graph.clone(),
                    |m| runner.run(m).unwrap(),
                    BatchSize::LargeInput,
                )
            });
        }
    }
    group.finish();
}

fn bench_block_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("blocked_block_size");
    group.sample_size(10);

    let n = 256;
    let graph = random_graph(n, 30, 7);
    for &block_size in &[8, 16, 32, 64] {
        let config = RunConfig { workers: 0, block_size };
        let runner = Runner::new(Engine::Blocked, config).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(block_size), &graph, |bench, graph| {
            bench.iter_batched_ref(|| graph.clone(), |m| runner.run(m).unwrap(), BatchSize::LargeInput)
        });
    }
    group.finish();
}

criterion_group!(benches, bench_engines, bench_block_size);
criterion_main!(benches);
