//! Layout-optimized parallel Floyd–Warshall on a persistent worker team.

#[cfg(not(feature = "no-multi-thread"))]
extern crate rayon;
#[cfg(not(feature = "no-multi-thread"))]
use rayon::prelude::*;

extern crate apsp_tools;
use apsp_tools::{DistanceMatrix, Partitioning, Result, RowPartition, INFINITY};


/// Relax one partition's rows through `k` over the flat buffer.
///
/// `d[i][k]` is read once per row and rows that cannot reach `k` are skipped
/// outright. The inner loop has no cross-iteration dependency and no
/// branch, which lets the compiler vectorize it.
#[inline]
pub fn relax_rows(part: &RowPartition, rows: &mut [f64], pivot_row: &[f64], k: usize) {
    let n = pivot_row.len();
    debug_assert_eq!(rows.len(), part.len() * n);
    for row in rows.chunks_exact_mut(n) {
        let ik = row[k];
        if ik == INFINITY {
            continue;
        }
        // ∞ + x stays ∞ and never compares below the current value
        for (res, &kj) in row.iter_mut().zip(pivot_row) {
            let z = ik + kj;
            *res = if z < *res { z } else { *res };
        }
    }
}

fn relax_all_rounds(d: &mut [f64], n: usize, parts: &Partitioning) {
    // One scratch row for the whole run, refilled at the start of every round
    let mut pivot = vec![INFINITY; n];
    for k in 0..n {
        pivot.copy_from_slice(&d[n*k..n*(k + 1)]);
        let pivot_row = &pivot[..];
        let step_part = |(index, rows): (usize, &mut [f64])| {
            relax_rows(&parts.part(index), rows, pivot_row, k);
        };
        #[cfg(not(feature = "no-multi-thread"))]
        d.par_chunks_mut(parts.chunk_len()).enumerate().for_each(step_part);
        #[cfg(feature = "no-multi-thread")]
        d.chunks_mut(parts.chunk_len()).enumerate().for_each(step_part);
    }
}

/// Layout-optimized parallel Floyd–Warshall with a worker team that outlives
/// the k-loop.
///
/// The thread pool is built once in [`FlatParallel::new`] and every round of
/// every [`FlatParallel::run`] executes on it, so no threads are spawned per
/// round.
pub struct FlatParallel {
    #[cfg(not(feature = "no-multi-thread"))]
    pool: rayon::ThreadPool,
    workers: usize,
}

impl FlatParallel {
    /// Build a team of `workers` threads. Zero picks Rayon's default thread count.
    #[cfg(not(feature = "no-multi-thread"))]
    pub fn new(workers: usize) -> Result<FlatParallel> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("fw-worker-{}", i))
            .build()?;
        let workers = pool.current_num_threads();
        Ok(FlatParallel { pool, workers })
    }

    #[cfg(feature = "no-multi-thread")]
    pub fn new(_workers: usize) -> Result<FlatParallel> {
        Ok(FlatParallel { workers: 1 })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Computes all-pairs shortest paths in place.
    pub fn run(&self, matrix: &mut DistanceMatrix) {
        let n = matrix.vertex_count();
        self.run_flat(matrix.as_mut_slice(), n);
    }

    fn run_flat(&self, d: &mut [f64], n: usize) {
        if n == 0 {
            return;
        }
        let parts = Partitioning::new(n, self.workers);
        #[cfg(not(feature = "no-multi-thread"))]
        self.pool.install(|| relax_all_rounds(d, n, &parts));
        #[cfg(feature = "no-multi-thread")]
        relax_all_rounds(d, n, &parts);
    }
}

/// One-shot convenience: build a default-sized team and run it once.
pub fn floyd_warshall(matrix: &mut DistanceMatrix) -> Result<()> {
    FlatParallel::new(0)?.run(matrix);
    Ok(())
}

pub fn floyd_warshall_with_workers(matrix: &mut DistanceMatrix, workers: usize) -> Result<()> {
    FlatParallel::new(workers)?.run(matrix);
    Ok(())
}

#[inline]
fn _floyd_warshall(d: &mut [f64], n: usize) {
    match FlatParallel::new(0) {
        Ok(engine) => engine.run_flat(d, n),
        Err(e) => eprintln!("error: {}", e),
    }
}

apsp_tools::create_extern_c_wrapper!(fw_flat_parallel, _floyd_warshall);
