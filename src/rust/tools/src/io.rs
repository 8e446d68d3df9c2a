//! Text graph format.
//!
//! ```text
//! <V> <E>
//! <u> <v> <w>
//! ...
//! ```
//!
//! `E` is advisory: edges are read until end of input whatever it says.
//! Endpoints outside `0..V` are skipped and duplicate pairs keep the
//! smallest weight.

use std::convert::TryFrom;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::matrix::{DistanceMatrix, Edge};

fn parse_token<T: FromStr>(token: Option<&str>, line: usize, what: &str) -> Result<T> {
    let token = token.ok_or_else(|| Error::Parse {
        line,
        message: format!("missing {}", what),
    })?;
    token.parse().map_err(|_| Error::Parse {
        line,
        message: format!("invalid {} `{}`", what, token),
    })
}

/// Reads a graph from any buffered reader into a fresh distance matrix.
pub fn parse_graph<R: BufRead>(reader: R) -> Result<DistanceMatrix> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line));

    let mut matrix = None;
    while let Some((line_no, line)) = lines.next() {
        let line = line?;
        let mut tokens = line.split_whitespace();
        let first = match tokens.next() {
            Some(token) => token,
            None => continue,
        };
        let n: usize = parse_token(Some(first), line_no, "vertex count")?;
        let _advertised_edges: u64 = parse_token(tokens.next(), line_no, "edge count")?;
        let allocated = DistanceMatrix::try_new(n).map_err(|e| Error::Parse {
            line: line_no,
            message: e.to_string(),
        })?;
        matrix = Some(allocated);
        break;
    }
    let mut matrix = matrix.ok_or(Error::MissingHeader)?;

    for (line_no, line) in lines {
        let line = line?;
        let mut tokens = line.split_whitespace();
        if line.trim().is_empty() {
            continue;
        }
        let from: i64 = parse_token(tokens.next(), line_no, "source vertex")?;
        let to: i64 = parse_token(tokens.next(), line_no, "destination vertex")?;
        let weight: f64 = parse_token(tokens.next(), line_no, "weight")?;
        if let Some(extra) = tokens.next() {
            return Err(Error::Parse {
                line: line_no,
                message: format!("unexpected token `{}`", extra),
            });
        }
        // Negative endpoints fall out of range just like ones >= V.
        if let (Ok(from), Ok(to)) = (usize::try_from(from), usize::try_from(to)) {
            matrix.add_edge(from, to, weight);
        }
    }
    Ok(matrix)
}

/// Opens and parses a graph file.
pub fn read_graph<P: AsRef<Path>>(path: P) -> Result<DistanceMatrix> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_graph(BufReader::new(file))
}

/// Writes `n` and `edges` in the text format, weights with four decimals.
pub fn write_graph<W: Write>(mut out: W, n: usize, edges: &[Edge]) -> std::io::Result<()> {
    writeln!(out, "{} {}", n, edges.len())?;
    for edge in edges {
        writeln!(out, "{} {} {:.4}", edge.from, edge.to, edge.weight)?;
    }
    out.flush()
}

/// Creates (or truncates) `path` and writes the graph into it.
pub fn write_graph_file<P: AsRef<Path>>(path: P, n: usize, edges: &[Edge]) -> Result<()> {
    let path = path.as_ref();
    let io_error = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    write_graph(BufWriter::new(file), n, edges).map_err(io_error)
}
