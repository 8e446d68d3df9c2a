use std::fs;
use std::path::PathBuf;

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use apsp_bench::{time_files, write_timings, Engine, RunConfig, Runner};
use apsp_tools::generate::{random_edges, GraphSpec};
use apsp_tools::io::write_graph_file;
use apsp_tools::{DistanceMatrix, Edge, INFINITY};

fn random_graph(n: usize, density: u32, seed: u64) -> DistanceMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    DistanceMatrix::from_edges(n, random_edges(&GraphSpec::new(n, density), &mut rng))
}

/// Integral weights keep every sum exact, whatever order the engine adds in.
fn integral_graph(n: usize, density: u32, seed: u64) -> DistanceMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let edges = random_edges(&GraphSpec::new(n, density), &mut rng)
        .into_iter()
        .map(|mut e| {
            e.weight = e.weight.floor();
            e
        });
    DistanceMatrix::from_edges(n, edges)
}

fn solve(engine: Engine, config: RunConfig, m: &DistanceMatrix) -> DistanceMatrix {
    let mut out = m.clone();
    Runner::new(engine, config).unwrap().run(&mut out).unwrap();
    out
}

fn assert_close(got: &DistanceMatrix, want: &DistanceMatrix, what: &str) {
    assert_eq!(got.vertex_count(), want.vertex_count());
    for (g, w) in got.as_slice().iter().zip(want.as_slice()) {
        if *w == INFINITY {
            assert_eq!(*g, INFINITY, "{}", what);
        } else {
            assert_abs_diff_eq!(*g, *w, epsilon = 1e-9);
        }
    }
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("apsp-bench-{}-{}", std::process::id(), name))
}

#[test]
fn every_engine_solves_the_worked_example() {
    const INF: f64 = INFINITY;
    let m = DistanceMatrix::from_rows(vec![
        vec![0., 4., -2., INF],
        vec![4., 0., 3., INF],
        vec![INF, 3., 0., 1.],
        vec![INF, INF, 1., 0.],
    ])
    .unwrap();
    let expected = vec![
        vec![0., 1., -2., -1.],
        vec![4., 0., 2., 3.],
        vec![7., 3., 0., 1.],
        vec![8., 4., 1., 0.],
    ];
    for &engine in Engine::ALL.iter() {
        for &block_size in &[1, 3, 16] {
            let config = RunConfig { workers: 2, block_size };
            assert_eq!(solve(engine, config, &m).to_rows(), expected, "{}", engine.name());
        }
    }
}

#[test]
fn oversized_blocks_still_solve_the_graph() {
    let m = integral_graph(23, 30, 11);
    let baseline = solve(Engine::Sequential, RunConfig::default(), &m);
    for &engine in &[Engine::Blocked, Engine::BlockedSequential] {
        let config = RunConfig { workers: 0, block_size: usize::MAX };
        assert_eq!(solve(engine, config, &m), baseline, "{}", engine.name());
    }
}

#[test]
fn row_engines_match_the_sequential_baseline_exactly() {
    for &(n, density, seed) in &[(1, 0, 1), (2, 100, 2), (31, 10, 3), (70, 45, 4), (96, 80, 5)] {
        let m = random_graph(n, density, seed);
        let baseline = solve(Engine::Sequential, RunConfig::default(), &m);
        for &engine in &[Engine::Flat, Engine::RowParallel, Engine::FlatParallel] {
            for &workers in &[0, 1, 3, 8] {
                let config = RunConfig { workers, block_size: 16 };
                assert_eq!(solve(engine, config, &m), baseline, "{} n = {}", engine.name(), n);
            }
        }
    }
}

#[test]
fn blocked_engines_agree_with_the_baseline() {
    for &(n, density, seed) in &[(17, 50, 6), (64, 20, 7), (100, 35, 8)] {
        let m = random_graph(n, density, seed);
        let baseline = solve(Engine::Sequential, RunConfig::default(), &m);
        for &engine in &[Engine::Blocked, Engine::BlockedSequential] {
            for &block_size in &[1, 5, 16, 32, 128] {
                let config = RunConfig { workers: 0, block_size };
                let got = solve(engine, config, &m);
                assert_close(&got, &baseline, engine.name());
            }
        }
    }
}

#[test]
fn integral_graphs_give_identical_results_everywhere() {
    let m = integral_graph(57, 25, 9);
    let baseline = solve(Engine::Sequential, RunConfig::default(), &m);
    for &engine in Engine::ALL.iter() {
        for &block_size in &[1, 16] {
            let config = RunConfig { workers: 4, block_size };
            assert_eq!(solve(engine, config, &m), baseline, "{}", engine.name());
        }
    }
}

#[test]
fn results_are_shortest_path_metrics() {
    let m = integral_graph(40, 15, 10);
    let n = m.vertex_count();
    for &engine in Engine::ALL.iter() {
        let d = solve(engine, RunConfig::default(), &m);
        for i in 0..n {
            assert_eq!(d.get(i, i), 0.0);
            for j in 0..n {
                // never worse than the direct edge
                assert!(d.get(i, j) <= m.get(i, j));
                for k in 0..n {
                    let (x, y) = (d.get(i, k), d.get(k, j));
                    if x != INFINITY && y != INFINITY {
                        assert!(d.get(i, j) <= x + y, "{} ({}, {}, {})", engine.name(), i, j, k);
                    }
                }
            }
        }
        assert!(d.as_slice().iter().all(|x| !x.is_nan()));

        // a solved matrix is a fixed point
        assert_eq!(solve(engine, RunConfig::default(), &d), d, "{}", engine.name());
    }
}

#[test]
fn disconnected_components_stay_unreachable() {
    // two directed cycles, {0, 1, 2} and {3, 4}
    let edges = vec![
        Edge::new(0, 1, 1.0),
        Edge::new(1, 2, 1.0),
        Edge::new(2, 0, 1.0),
        Edge::new(3, 4, 2.0),
        Edge::new(4, 3, 2.0),
    ];
    let m = DistanceMatrix::from_edges(5, edges);
    for &engine in Engine::ALL.iter() {
        let d = solve(engine, RunConfig { workers: 2, block_size: 2 }, &m);
        assert_eq!(d.get(0, 2), 2.0);
        assert_eq!(d.get(2, 1), 2.0);
        assert_eq!(d.get(4, 3), 2.0);
        for a in 0..3 {
            for b in 3..5 {
                assert_eq!(d.get(a, b), INFINITY, "{}", engine.name());
                assert_eq!(d.get(b, a), INFINITY, "{}", engine.name());
            }
        }
    }
}

#[test]
fn timings_are_written_one_per_file() {
    let graph = temp_path("graph.txt");
    let out = temp_path("timings.txt");
    let mut rng = StdRng::seed_from_u64(12);
    let edges = random_edges(&GraphSpec::new(20, 30), &mut rng);
    write_graph_file(&graph, 20, &edges).unwrap();

    let files = vec![graph.clone(), temp_path("missing.txt")];
    let runner = Runner::new(Engine::Blocked, RunConfig::default()).unwrap();
    let timings = time_files(&runner, &files).unwrap();
    assert_eq!(timings.len(), 2);

    write_timings(&out, &timings).unwrap();
    let text = fs::read_to_string(&out).unwrap();
    let lines: Vec<f64> = text.lines().map(|l| l.parse().unwrap()).collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|&secs| secs >= 0.0));

    fs::remove_file(graph).unwrap();
    fs::remove_file(out).unwrap();
}
