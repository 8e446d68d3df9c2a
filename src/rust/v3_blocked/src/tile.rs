use std::ops::Range;

/// Half-open index range of block `index` for edge length `b`, clamped to `n`.
#[inline]
pub fn span(index: usize, b: usize, n: usize) -> Range<usize> {
    let start = index.saturating_mul(b).min(n);
    start..start.saturating_add(b).min(n)
}

/// Number of blocks along one side, the last one possibly short.
#[inline]
pub fn block_count(n: usize, b: usize) -> usize {
    n / b + usize::from(n % b != 0)
}

/// One block update: relax `rows × cols` through the vertices in `pivots`.
///
/// A tile is only a set of bounds into the matrix, never a copy of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub rows: Range<usize>,
    pub cols: Range<usize>,
    pub pivots: Range<usize>,
}

impl Tile {
    /// Block `(ib, jb)` relaxed through block-column `kb`.
    pub fn new(ib: usize, jb: usize, kb: usize, b: usize, n: usize) -> Tile {
        Tile {
            rows: span(ib, b, n),
            cols: span(jb, b, n),
            pivots: span(kb, b, n),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.start == self.rows.end
            || self.cols.start == self.cols.end
            || self.pivots.start == self.pivots.end
    }
}
