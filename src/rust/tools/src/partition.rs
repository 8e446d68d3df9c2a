//! Static row partitioning for the parallel engines.
//!
//! `n` rows are cut into contiguous ranges of `ceil(n / workers)` rows, in
//! worker order. Each worker owns exactly one range for a whole round, so no
//! two workers ever write the same row.

use std::ops::Range;

/// One worker's share of the rows for a single relaxation round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowPartition {
    pub rows: Range<usize>,
}

impl RowPartition {
    pub fn len(&self) -> usize {
        self.rows.end - self.rows.start
    }

    pub fn is_empty(&self) -> bool {
        self.rows.start == self.rows.end
    }
}

/// Static split of `n` rows of width `n` across a fixed number of workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partitioning {
    n: usize,
    rows_per_part: usize,
}

impl Partitioning {
    /// `workers == 0` is treated as a single worker.
    pub fn new(n: usize, workers: usize) -> Partitioning {
        let workers = workers.max(1);
        let rows_per_part = ((n + workers - 1) / workers).max(1);
        Partitioning { n, rows_per_part }
    }

    /// Number of non-empty partitions. May be smaller than the worker count.
    pub fn part_count(&self) -> usize {
        (self.n + self.rows_per_part - 1) / self.rows_per_part
    }

    /// Length in elements of one partition's slice of a row-major V×V buffer,
    /// suitable for `chunks_mut`. Never zero.
    pub fn chunk_len(&self) -> usize {
        (self.rows_per_part * self.n).max(1)
    }

    pub fn part(&self, index: usize) -> RowPartition {
        let start = (index * self.rows_per_part).min(self.n);
        let end = (start + self.rows_per_part).min(self.n);
        RowPartition { rows: start..end }
    }

    pub fn iter(&self) -> impl Iterator<Item = RowPartition> + '_ {
        (0..self.part_count()).map(move |index| self.part(index))
    }
}
