//! Shared pieces for the Floyd–Warshall engines: the distance matrix, static
//! row partitions, the error type, graph file I/O and a random graph
//! generator for benchmarks.

pub mod error;
pub mod generate;
pub mod io;
pub mod matrix;
pub mod partition;
pub mod timer;

pub use error::{Error, Result};
pub use matrix::{DistanceMatrix, Edge, INFINITY};
pub use partition::{Partitioning, RowPartition};

/// Macro for wrapping an engine's `fn(&mut [f64], usize)` inside an extern C function
/// that relaxes a caller-owned row-major `n * n` buffer in place.
#[macro_export]
macro_rules! create_extern_c_wrapper {
    ($extern_func:ident, $wrapped_func:path) => {
        #[no_mangle]
        pub extern "C" fn $extern_func(d_raw: *mut f64, n: i32) {
            if d_raw.is_null() || n <= 0 {
                return;
            }
            // Catch any unwinding panics so that they won't propagate over the ABI to the calling program, which would be undefined behaviour
            let result = std::panic::catch_unwind(|| {
                let n = n as usize;
                // Wrap the raw pointer into a 'not unsafe' Rust slice with a well defined size
                let d = unsafe { std::slice::from_raw_parts_mut(d_raw, n * n) };
                $wrapped_func(d, n);
            });
            if result.is_err() {
                eprintln!("error: rust panicked");
            }
        }
    };
}
