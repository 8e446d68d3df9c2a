//! Row-parallel Floyd–Warshall over static row partitions.

#[cfg(not(feature = "no-multi-thread"))]
extern crate rayon;
#[cfg(not(feature = "no-multi-thread"))]
use rayon::prelude::*; // Parallel chunks iterator

extern crate apsp_tools;
use apsp_tools::{DistanceMatrix, Partitioning, RowPartition, INFINITY};


/// Relax every row owned by `part` through the intermediate vertex `k`.
///
/// `rows` holds exactly the partition's rows (row-major, width `n`), and
/// `pivot_row` is row `k` as it stood when the round started. The function
/// writes nothing outside `rows`.
pub fn relax_partition(part: &RowPartition, rows: &mut [f64], pivot_row: &[f64], k: usize) {
    let n = pivot_row.len();
    debug_assert_eq!(rows.len(), part.len() * n);
    for row in rows.chunks_mut(n) {
        for j in 0..n {
            let x = row[k];
            let y = pivot_row[j];
            if x != INFINITY && y != INFINITY {
                let z = x + y;
                if z < row[j] {
                    row[j] = z;
                }
            }
        }
    }
}

#[inline]
fn _floyd_warshall_with(d: &mut [f64], n: usize, workers: usize) {
    if n == 0 {
        return;
    }
    let parts = Partitioning::new(n, workers);
    // Row k does not change during round k (d[k][k] == 0), so workers read a copy of it
    let mut pivot = vec![INFINITY; n];
    for k in 0..n {
        pivot.copy_from_slice(&d[n*k..n*(k + 1)]);
        let pivot_row = &pivot[..];
        let step_part = |(index, rows): (usize, &mut [f64])| {
            relax_partition(&parts.part(index), rows, pivot_row, k);
        };
        // for_each returns once every partition is done, which is the barrier before round k + 1
        #[cfg(not(feature = "no-multi-thread"))]
        d.par_chunks_mut(parts.chunk_len()).enumerate().for_each(step_part);
        #[cfg(feature = "no-multi-thread")]
        d.chunks_mut(parts.chunk_len()).enumerate().for_each(step_part);
    }
}

fn default_workers() -> usize {
    #[cfg(not(feature = "no-multi-thread"))]
    return rayon::current_num_threads();
    #[cfg(feature = "no-multi-thread")]
    return 1;
}

#[inline]
fn _floyd_warshall(d: &mut [f64], n: usize) {
    _floyd_warshall_with(d, n, default_workers());
}

/// Row-parallel Floyd–Warshall with one static partition per Rayon thread.
pub fn floyd_warshall(matrix: &mut DistanceMatrix) {
    let n = matrix.vertex_count();
    _floyd_warshall(matrix.as_mut_slice(), n);
}

/// Row-parallel Floyd–Warshall over exactly `workers` static row partitions.
pub fn floyd_warshall_with_workers(matrix: &mut DistanceMatrix, workers: usize) {
    let n = matrix.vertex_count();
    _floyd_warshall_with(matrix.as_mut_slice(), n, workers);
}

apsp_tools::create_extern_c_wrapper!(fw_row_parallel, _floyd_warshall);
