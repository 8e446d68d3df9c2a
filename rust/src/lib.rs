//! Timing harness around the Floyd–Warshall versions.
//!
//! Each engine lives in its own crate; this crate only picks one, feeds it
//! graph files and records how long every run took.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use apsp_tools::io::read_graph;
use apsp_tools::timer;
use apsp_tools::{DistanceMatrix, Error, Result};
use v2_flat_parallel::FlatParallel;

/// The Floyd–Warshall versions that can be benchmarked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Engine {
    Sequential,
    Flat,
    RowParallel,
    FlatParallel,
    Blocked,
    BlockedSequential,
}

impl Engine {
    pub const ALL: [Engine; 6] = [
        Engine::Sequential,
        Engine::Flat,
        Engine::RowParallel,
        Engine::FlatParallel,
        Engine::Blocked,
        Engine::BlockedSequential,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Engine::Sequential => "sequential",
            Engine::Flat => "flat",
            Engine::RowParallel => "row-parallel",
            Engine::FlatParallel => "flat-parallel",
            Engine::Blocked => "blocked",
            Engine::BlockedSequential => "blocked-sequential",
        }
    }
}

/// Knobs shared by the parallel and blocked engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Worker threads, zero for Rayon's default.
    pub workers: usize,
    pub block_size: usize,
}

impl Default for RunConfig {
    fn default() -> RunConfig {
        RunConfig {
            workers: 0,
            block_size: v3_blocked::DEFAULT_BLOCK_SIZE,
        }
    }
}

/// An engine ready to run, holding whatever it needs across runs.
pub struct Runner {
    engine: Engine,
    config: RunConfig,
    team: Option<FlatParallel>,
}

impl Runner {
    /// Validates the configuration and builds the flat-parallel worker team up front.
    pub fn new(engine: Engine, config: RunConfig) -> Result<Runner> {
        if config.block_size == 0 {
            return Err(Error::InvalidBlockSize);
        }
        let team = match engine {
            Engine::FlatParallel => Some(FlatParallel::new(config.workers)?),
            _ => None,
        };
        Ok(Runner { engine, config, team })
    }

    pub fn engine(&self) -> Engine {
        self.engine
    }

    /// Relaxes `matrix` in place.
    pub fn run(&self, matrix: &mut DistanceMatrix) -> Result<()> {
        match self.engine {
            Engine::Sequential => v0_sequential::floyd_warshall(matrix),
            Engine::Flat => v0_sequential::floyd_warshall_flat(matrix),
            Engine::RowParallel => {
                if self.config.workers == 0 {
                    v1_row_parallel::floyd_warshall(matrix)
                } else {
                    v1_row_parallel::floyd_warshall_with_workers(matrix, self.config.workers)
                }
            }
            Engine::FlatParallel => match &self.team {
                Some(team) => team.run(matrix),
                None => v2_flat_parallel::floyd_warshall_with_workers(matrix, self.config.workers)?,
            },
            Engine::Blocked => v3_blocked::floyd_warshall(matrix, self.config.block_size)?,
            Engine::BlockedSequential => {
                v3_blocked::floyd_warshall_sequential(matrix, self.config.block_size)?
            }
        }
        Ok(())
    }

    /// Times one run, the matrix is relaxed in place.
    pub fn time(&self, matrix: &mut DistanceMatrix) -> Result<Duration> {
        let mut outcome = Ok(());
        let elapsed = timer::time(|| outcome = self.run(matrix));
        outcome.map(|_| elapsed)
    }
}

/// Reads a graph file; an unreadable or malformed file becomes the empty
/// matrix after the error is printed, so one bad file does not stop a batch.
pub fn load_or_empty(path: &Path) -> DistanceMatrix {
    match read_graph(path) {
        Ok(matrix) => matrix,
        Err(e) => {
            eprintln!("error: {}", e);
            DistanceMatrix::empty()
        }
    }
}

/// Runs the engine over every file and returns the measured durations in file order.
pub fn time_files(runner: &Runner, files: &[PathBuf]) -> Result<Vec<Duration>> {
    let mut timings = Vec::with_capacity(files.len());
    for path in files {
        let mut matrix = load_or_empty(path);
        println!(
            "{}: {} vertices with {}",
            path.display(),
            matrix.vertex_count(),
            runner.engine().name()
        );
        timings.push(runner.time(&mut matrix)?);
    }
    Ok(timings)
}

/// Writes one duration in seconds per line.
pub fn write_timings(path: &Path, timings: &[Duration]) -> Result<()> {
    let io_error = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut out = BufWriter::new(File::create(path).map_err(io_error)?);
    for elapsed in timings {
        writeln!(out, "{}", elapsed.as_secs_f64()).map_err(io_error)?;
    }
    out.flush().map_err(io_error)
}
