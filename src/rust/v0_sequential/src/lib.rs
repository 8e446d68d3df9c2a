//! Sequential Floyd–Warshall, the correctness baseline for every other version.

extern crate apsp_tools;
use apsp_tools::{DistanceMatrix, INFINITY};


/// Relax every pair `(i, j)` through the single intermediate vertex `k`.
///
/// A candidate is only formed when both `d[i][k]` and `d[k][j]` are finite,
/// so an unreachable leg never turns into a bogus distance.
#[inline]
pub fn relax_through(d: &mut [f64], n: usize, k: usize) {
    for i in 0..n {
        for j in 0..n {
            let x = d[n*i + k];
            let y = d[n*k + j];
            if x != INFINITY && y != INFINITY {
                let z = x + y;
                if z < d[n*i + j] {
                    d[n*i + j] = z;
                }
            }
        }
    }
}

#[inline]
fn _floyd_warshall(d: &mut [f64], n: usize) {
    // k must stay the outermost loop, every round builds on the previous one
    for k in 0..n {
        relax_through(d, n, k);
    }
}

/// Split `d` into a shared row `k` and a mutable row `i`, `i != k`.
#[inline]
fn pivot_and_row(d: &mut [f64], n: usize, k: usize, i: usize) -> (&[f64], &mut [f64]) {
    if i < k {
        let (head, tail) = d.split_at_mut(n * k);
        (&tail[..n], &mut head[n*i..n*(i + 1)])
    } else {
        let (head, tail) = d.split_at_mut(n * i);
        (&head[n*k..n*(k + 1)], &mut tail[..n])
    }
}

#[inline]
fn _floyd_warshall_flat(d: &mut [f64], n: usize) {
    for k in 0..n {
        for i in 0..n {
            // Row k cannot improve through itself while d[k][k] == 0
            if i == k {
                continue;
            }
            let (row_k, row_i) = pivot_and_row(d, n, k, i);
            let ik = row_i[k];
            if ik == INFINITY {
                continue;
            }
            for (res, &kj) in row_i.iter_mut().zip(row_k) {
                let z = ik + kj;
                *res = if z < *res { z } else { *res };
            }
        }
    }
}

/// Computes all-pairs shortest paths in place with the textbook k-i-j loops.
pub fn floyd_warshall(matrix: &mut DistanceMatrix) {
    let n = matrix.vertex_count();
    _floyd_warshall(matrix.as_mut_slice(), n);
}

/// Same result as [`floyd_warshall`], but caches row `k`, skips rows that
/// cannot reach `k` and keeps the inner loop free of branches.
pub fn floyd_warshall_flat(matrix: &mut DistanceMatrix) {
    let n = matrix.vertex_count();
    _floyd_warshall_flat(matrix.as_mut_slice(), n);
}

apsp_tools::create_extern_c_wrapper!(fw_sequential, _floyd_warshall);
apsp_tools::create_extern_c_wrapper!(fw_sequential_flat, _floyd_warshall_flat);
