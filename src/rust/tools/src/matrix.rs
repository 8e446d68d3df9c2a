//! Dense distance matrix shared by every relaxation engine.
//!
//! The matrix is a single row-major `Vec<f64>`, so element `(i, j)` lives at
//! `i * n + j`. `f64::INFINITY` marks a pair with no known path.

use crate::error::{Error, Result};

/// Sentinel for "no path known".
pub const INFINITY: f64 = std::f64::INFINITY;

/// A weighted directed edge `from -> to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
}

impl Edge {
    pub fn new(from: usize, to: usize, weight: f64) -> Edge {
        Edge { from, to, weight }
    }
}

/// Square V×V matrix of current shortest path estimates.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Matrix for `n` vertices with a zero diagonal and every other cell unreachable.
    pub fn new(n: usize) -> DistanceMatrix {
        let mut data = vec![INFINITY; n * n];
        for i in 0..n {
            data[n * i + i] = 0.0;
        }
        DistanceMatrix { n, data }
    }

    /// Like [`DistanceMatrix::new`], but reports a size that overflows or
    /// cannot be allocated instead of aborting.
    pub fn try_new(n: usize) -> Result<DistanceMatrix> {
        let too_large = || Error::TooLarge { vertices: n };
        let len = n.checked_mul(n).ok_or_else(too_large)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| too_large())?;
        data.resize(len, INFINITY);
        for i in 0..n {
            data[n * i + i] = 0.0;
        }
        Ok(DistanceMatrix { n, data })
    }

    /// The zero-vertex matrix. Every engine treats it as a no-op.
    pub fn empty() -> DistanceMatrix {
        DistanceMatrix::new(0)
    }

    /// Builds the initial matrix for a directed graph.
    ///
    /// Edges with an endpoint outside `0..n` are dropped. When the same pair
    /// appears more than once the smallest weight wins.
    pub fn from_edges<I>(n: usize, edges: I) -> DistanceMatrix
    where
        I: IntoIterator<Item = Edge>,
    {
        let mut matrix = DistanceMatrix::new(n);
        for edge in edges {
            matrix.add_edge(edge.from, edge.to, edge.weight);
        }
        matrix
    }

    /// Wraps an existing row-major buffer of `n * n` elements.
    pub fn from_flat(n: usize, data: Vec<f64>) -> Result<DistanceMatrix> {
        if data.len() != n * n {
            return Err(Error::DimensionMismatch {
                expected: n * n,
                actual: data.len(),
            });
        }
        Ok(DistanceMatrix { n, data })
    }

    /// Flattens a matrix-of-vectors. Every row must have as many elements as there are rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<DistanceMatrix> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for row in rows {
            if row.len() != n {
                return Err(Error::DimensionMismatch {
                    expected: n,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(&row);
        }
        Ok(DistanceMatrix { n, data })
    }

    /// Records the edge `from -> to`, keeping the minimum of duplicate weights.
    ///
    /// Returns `false` if either endpoint is out of range, in which case the
    /// matrix is left untouched. Self-loops are accepted but the diagonal
    /// always stays zero.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: f64) -> bool {
        if from >= self.n || to >= self.n {
            return false;
        }
        if from == to {
            return true;
        }
        let cell = &mut self.data[self.n * from + to];
        if weight < *cell {
            *cell = weight;
        }
        true
    }

    pub fn vertex_count(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[self.n * i + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[self.n * i + j] = value;
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[self.n * i..self.n * (i + 1)]
    }

    /// Row-major view, element `(i, j)` at index `i * n + j`.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_flat(self) -> Vec<f64> {
        self.data
    }

    /// Copies the matrix out as one `Vec` per row.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        if self.n == 0 {
            return Vec::new();
        }
        self.data.chunks(self.n).map(|row| row.to_vec()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_matrix_has_zero_diagonal_and_infinite_elsewhere() {
        let m = DistanceMatrix::new(3);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 0.0 } else { INFINITY };
                assert_eq!(m.get(i, j), expected);
            }
        }
    }

    #[test]
    fn oversized_matrix_is_an_error() {
        assert_eq!(DistanceMatrix::try_new(3).unwrap(), DistanceMatrix::new(3));
        assert!(matches!(
            DistanceMatrix::try_new(usize::MAX),
            Err(Error::TooLarge { vertices: usize::MAX })
        ));
        // n * n fits in usize, n * n * 8 bytes does not
        let n = 1usize << (usize::BITS / 2 - 1);
        assert!(matches!(DistanceMatrix::try_new(n), Err(Error::TooLarge { .. })));
    }

    #[test]
    fn duplicate_edges_keep_minimum_weight() {
        let edges = vec![
            Edge::new(0, 1, 7.0),
            Edge::new(0, 1, 3.0),
            Edge::new(0, 1, 5.0),
        ];
        let m = DistanceMatrix::from_edges(2, edges);
        assert_eq!(m.get(0, 1), 3.0);
        assert_eq!(m.get(1, 0), INFINITY);
    }

    #[test]
    fn out_of_range_edges_are_dropped() {
        let mut m = DistanceMatrix::new(2);
        assert!(!m.add_edge(2, 0, 1.0));
        assert!(!m.add_edge(0, 5, 1.0));
        assert_eq!(m, DistanceMatrix::new(2));
    }

    #[test]
    fn self_loops_never_touch_diagonal() {
        let mut m = DistanceMatrix::new(2);
        assert!(m.add_edge(1, 1, 4.0));
        assert!(m.add_edge(1, 1, -4.0));
        assert_eq!(m.get(1, 1), 0.0);
    }

    #[test]
    fn flat_accessor_is_row_major() {
        let m = DistanceMatrix::from_edges(3, vec![Edge::new(2, 1, 9.5)]);
        assert_eq!(m.as_slice()[2 * 3 + 1], 9.5);
        assert_eq!(m.row(2), &[INFINITY, 9.5, 0.0]);
    }

    #[test]
    fn rows_round_trip_and_shape_is_checked() {
        let rows = vec![vec![0.0, 1.0], vec![2.0, 0.0]];
        let m = DistanceMatrix::from_rows(rows.clone()).unwrap();
        assert_eq!(m.to_rows(), rows);

        let ragged = vec![vec![0.0, 1.0], vec![2.0]];
        match DistanceMatrix::from_rows(ragged) {
            Err(Error::DimensionMismatch { expected: 2, actual: 1 }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(DistanceMatrix::from_flat(2, vec![0.0; 3]).is_err());
    }

    #[test]
    fn empty_matrix() {
        let m = DistanceMatrix::empty();
        assert!(m.is_empty());
        assert!(m.as_slice().is_empty());
        assert!(m.to_rows().is_empty());
    }
}
