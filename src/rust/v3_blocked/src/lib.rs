//! Blocked (tiled) Floyd–Warshall.
//!
//! The matrix is cut into `b × b` blocks. For every block-column `kb`, in
//! increasing order:
//!
//! 1. the diagonal block `(kb, kb)` is relaxed through its own vertices,
//! 2. the blocks sharing its rows `(kb, jb)` and columns `(ib, kb)` are
//!    relaxed through the now final diagonal block,
//! 3. every remaining block `(ib, jb)` is relaxed through the pivot range of
//!    `kb`, reading `(ib, kb)` and `(kb, jb)` from step 2.
//!
//! Rounds must run one after another. Inside a round, steps 2 and 3 only
//! depend on blocks finalized earlier, so different block-rows can run
//! concurrently.

#[cfg(not(feature = "no-multi-thread"))]
extern crate rayon;
#[cfg(not(feature = "no-multi-thread"))]
use rayon::prelude::*;

extern crate apsp_tools;
use apsp_tools::{DistanceMatrix, Error, Result, INFINITY};

use std::ops::Range;

pub mod tile;
pub use tile::{block_count, span, Tile};

/// Block edge length used when the caller has no preference.
pub const DEFAULT_BLOCK_SIZE: usize = 16;


/// Apply the Floyd–Warshall recurrence restricted to one tile, in place.
///
/// Pivots are taken in increasing order; for each pivot `k` and row `i`,
/// `d[i][k]` is read once and the row is skipped if it is infinite.
pub fn update_block(d: &mut [f64], n: usize, tile: &Tile) {
    for k in tile.pivots.clone() {
        for i in tile.rows.clone() {
            let ik = d[n*i + k];
            if ik == INFINITY {
                continue;
            }
            for j in tile.cols.clone() {
                let z = ik + d[n*k + j];
                if z < d[n*i + j] {
                    d[n*i + j] = z;
                }
            }
        }
    }
}

/// Relax columns `cols` of every row in `rows` through `pivots`.
///
/// `rows` is a row-major band of full-width rows that does not contain any
/// pivot row, `band` holds exactly the pivot rows.
fn relax_band(rows: &mut [f64], band: &[f64], n: usize, cols: Range<usize>, pivots: Range<usize>) {
    for (p, k) in pivots.enumerate() {
        let row_k = &band[n*p + cols.start..n*p + cols.end];
        for row in rows.chunks_exact_mut(n) {
            let ik = row[k];
            if ik == INFINITY {
                continue;
            }
            for (res, &kj) in row[cols.clone()].iter_mut().zip(row_k) {
                let z = ik + kj;
                *res = if z < *res { z } else { *res };
            }
        }
    }
}

fn phase_diagonal(d: &mut [f64], n: usize, b: usize, kb: usize) {
    update_block(d, n, &Tile::new(kb, kb, kb, b, n));
}

fn phase_cross(d: &mut [f64], n: usize, b: usize, kb: usize) {
    for ib in (0..block_count(n, b)).filter(|&ib| ib != kb) {
        update_block(d, n, &Tile::new(ib, kb, kb, b, n));
        update_block(d, n, &Tile::new(kb, ib, kb, b, n));
    }
}

fn phase_remainder(d: &mut [f64], n: usize, b: usize, kb: usize) {
    let blocks = block_count(n, b);
    for ib in (0..blocks).filter(|&ib| ib != kb) {
        for jb in (0..blocks).filter(|&jb| jb != kb) {
            update_block(d, n, &Tile::new(ib, jb, kb, b, n));
        }
    }
}

#[inline]
fn _floyd_warshall_sequential(d: &mut [f64], n: usize, b: usize) {
    for kb in 0..block_count(n, b) {
        phase_diagonal(d, n, b, kb);
        phase_cross(d, n, b, kb);
        phase_remainder(d, n, b, kb);
    }
}

#[inline]
fn _floyd_warshall_blocked(d: &mut [f64], n: usize, b: usize) {
    if n == 0 {
        return;
    }
    let blocks = block_count(n, b);
    // Copy of the pivot block-row, reused by every round
    let mut scratch = vec![INFINITY; b * n];
    for kb in 0..blocks {
        phase_diagonal(d, n, b, kb);
        // Row half of phase 2 stays in place, it reads its own block-row
        for jb in (0..blocks).filter(|&jb| jb != kb) {
            update_block(d, n, &Tile::new(kb, jb, kb, b, n));
        }

        let pivots = span(kb, b, n);
        let band = &mut scratch[..pivots.len() * n];
        band.copy_from_slice(&d[n*pivots.start..n*pivots.end]);
        let band = &band[..];

        // Column half of phase 2, then phase 3, one task per block-row
        let step_block_row = |(ib, rows): (usize, &mut [f64])| {
            if ib == kb {
                return;
            }
            relax_band(rows, band, n, pivots.clone(), pivots.clone());
            for jb in (0..blocks).filter(|&jb| jb != kb) {
                relax_band(rows, band, n, span(jb, b, n), pivots.clone());
            }
        };
        #[cfg(not(feature = "no-multi-thread"))]
        d.par_chunks_mut(b * n).enumerate().for_each(step_block_row);
        #[cfg(feature = "no-multi-thread")]
        d.chunks_mut(b * n).enumerate().for_each(step_block_row);
    }
}

/// Rejects `b == 0` and caps `b` at `n`, a block as large as the matrix being one block.
fn effective_block_size(b: usize, n: usize) -> Result<usize> {
    if b == 0 {
        return Err(Error::InvalidBlockSize);
    }
    Ok(b.min(n.max(1)))
}

/// Blocked Floyd–Warshall with block-rows of each round relaxed in parallel.
pub fn floyd_warshall(matrix: &mut DistanceMatrix, block_size: usize) -> Result<()> {
    let n = matrix.vertex_count();
    let b = effective_block_size(block_size, n)?;
    _floyd_warshall_blocked(matrix.as_mut_slice(), n, b);
    Ok(())
}

/// Blocked Floyd–Warshall running the three phases one tile at a time.
pub fn floyd_warshall_sequential(matrix: &mut DistanceMatrix, block_size: usize) -> Result<()> {
    let n = matrix.vertex_count();
    let b = effective_block_size(block_size, n)?;
    _floyd_warshall_sequential(matrix.as_mut_slice(), n, b);
    Ok(())
}

#[inline]
fn _floyd_warshall(d: &mut [f64], n: usize) {
    _floyd_warshall_blocked(d, n, DEFAULT_BLOCK_SIZE.min(n.max(1)));
}

apsp_tools::create_extern_c_wrapper!(fw_blocked, _floyd_warshall);
