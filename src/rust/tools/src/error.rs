//! Error types shared by the matrix, the graph file reader and the engines.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a distance matrix or configuring an engine.
#[derive(Debug, Error)]
pub enum Error {
    /// A graph file could not be opened, read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from an already open stream failed.
    #[error("read error: {0}")]
    Read(#[from] std::io::Error),

    /// The input ended before the `<V> <E>` header line.
    #[error("graph header `<V> <E>` is missing")]
    MissingHeader,

    /// A header or edge line could not be parsed.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A buffer does not have the V×V shape it claims.
    #[error("dimension mismatch: expected {expected} elements, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A V×V matrix for this many vertices cannot be addressed or allocated.
    #[error("a distance matrix for {vertices} vertices does not fit in memory")]
    TooLarge { vertices: usize },

    /// Blocked relaxation needs a block edge length of at least one.
    #[error("block size must be at least 1")]
    InvalidBlockSize,

    /// The worker pool for a parallel engine could not be built.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for matrix construction, graph I/O and engine setup.
pub type Result<T> = std::result::Result<T, Error>;
