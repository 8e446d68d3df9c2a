use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use apsp_bench::{time_files, write_timings, Engine, RunConfig, Runner};
use apsp_tools::generate::{random_edges, GraphSpec};
use apsp_tools::io::write_graph_file;
use apsp_tools::{DistanceMatrix, Result, INFINITY};

#[derive(Parser)]
#[command(name = "apsp-bench", about = "Benchmark harness for the Floyd-Warshall versions", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Time one engine over a list of graph files, one duration per line in OUT
    Run {
        #[arg(long, value_enum)]
        engine: Engine,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 0)]
        workers: usize,
        #[arg(long = "block-size", default_value_t = v3_blocked::DEFAULT_BLOCK_SIZE)]
        block_size: usize,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Write a random directed graph in the `<V> <E>` / `<u> <v> <w>` format
    Generate {
        #[arg(long)]
        vertices: usize,
        /// Percentage of the V*(V-1) possible edges
        #[arg(long)]
        density: u32,
        #[arg(long = "min-weight", default_value_t = 1.0)]
        min_weight: f64,
        #[arg(long = "max-weight", default_value_t = 1000.0)]
        max_weight: f64,
        #[arg(long)]
        seed: Option<u64>,
        out: PathBuf,
    },
    /// Run the 4-vertex example through every engine
    Demo,
}

fn print_matrix(matrix: &DistanceMatrix) {
    for row in matrix.to_rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|&x| if x == INFINITY { "inf".to_string() } else { x.to_string() })
            .collect();
        println!("{}", cells.join(" "));
    }
}

fn demo() -> Result<()> {
    const INF: f64 = INFINITY;
    let input = DistanceMatrix::from_rows(vec![
        vec![0., 4., -2., INF],
        vec![4., 0., 3., INF],
        vec![INF, 3., 0., 1.],
        vec![INF, INF, 1., 0.],
    ])?;
    for &engine in Engine::ALL.iter() {
        let mut matrix = input.clone();
        Runner::new(engine, RunConfig::default())?.run(&mut matrix)?;
        println!("{}:", engine.name());
        print_matrix(&matrix);
        println!();
    }
    Ok(())
}

fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run {
            engine,
            out,
            workers,
            block_size,
            files,
        } => {
            let runner = Runner::new(engine, RunConfig { workers, block_size })?;
            let timings = time_files(&runner, &files)?;
            for (path, elapsed) in files.iter().zip(&timings) {
                println!("{} : {} ms", path.display(), elapsed.as_millis());
            }
            write_timings(&out, &timings)
        }
        Command::Generate {
            vertices,
            density,
            min_weight,
            max_weight,
            seed,
            out,
        } => {
            let spec = GraphSpec {
                vertices,
                density_percent: density,
                min_weight,
                max_weight,
            };
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            println!(
                "generating {} vertices, {} of {} possible edges",
                vertices,
                spec.edge_count(),
                spec.max_edges()
            );
            let edges = random_edges(&spec, &mut rng);
            write_graph_file(&out, vertices, &edges)?;
            println!("wrote {}", out.display());
            Ok(())
        }
        Command::Demo => demo(),
    }
}

fn main() {
    if let Err(e) = execute(Cli::parse()) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
