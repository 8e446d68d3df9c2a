//! Random directed graphs for benchmarking.
//!
//! The random number generator is always passed in by the caller, so a
//! seeded `StdRng` gives reproducible graphs.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::matrix::Edge;

/// Above this density every pair is materialized and shuffled instead of
/// rejection sampling.
pub const DENSE_THRESHOLD_PERCENT: u32 = 70;

/// Shape of a random graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphSpec {
    pub vertices: usize,
    /// Percentage of the `V * (V - 1)` possible directed edges to emit, capped at 100.
    pub density_percent: u32,
    pub min_weight: f64,
    pub max_weight: f64,
}

impl GraphSpec {
    pub fn new(vertices: usize, density_percent: u32) -> GraphSpec {
        GraphSpec {
            vertices,
            density_percent,
            min_weight: 1.0,
            max_weight: 1000.0,
        }
    }

    pub fn max_edges(&self) -> usize {
        self.vertices * self.vertices.saturating_sub(1)
    }

    pub fn edge_count(&self) -> usize {
        let wanted = self.max_edges() as u128 * u128::from(self.density_percent) / 100;
        (wanted as usize).min(self.max_edges())
    }
}

fn sample_weight<R: Rng + ?Sized>(spec: &GraphSpec, rng: &mut R) -> f64 {
    if spec.min_weight < spec.max_weight {
        rng.gen_range(spec.min_weight..spec.max_weight)
    } else {
        spec.min_weight
    }
}

/// Generates distinct directed edges without self loops.
pub fn random_edges<R: Rng + ?Sized>(spec: &GraphSpec, rng: &mut R) -> Vec<Edge> {
    let n = spec.vertices;
    let count = spec.edge_count();
    if count == 0 {
        return Vec::new();
    }

    if spec.density_percent > DENSE_THRESHOLD_PERCENT {
        let mut pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| (0..n).filter(move |&j| j != i).map(move |j| (i, j)))
            .collect();
        pairs.shuffle(rng);
        pairs.truncate(count);
        pairs
            .into_iter()
            .map(|(from, to)| Edge::new(from, to, sample_weight(spec, rng)))
            .collect()
    } else {
        let mut seen = HashSet::with_capacity(count + count / 5);
        let mut edges = Vec::with_capacity(count);
        while edges.len() < count {
            let from = rng.gen_range(0..n);
            let to = rng.gen_range(0..n);
            if from == to || !seen.insert(from * n + to) {
                continue;
            }
            edges.push(Edge::new(from, to, sample_weight(spec, rng)));
        }
        edges
    }
}
