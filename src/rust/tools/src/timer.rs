use std::time::{Duration, Instant};

/// Records instants and the laps between consecutive clicks.
pub struct Stopwatch {
    instants: Vec<Instant>,
}

impl Stopwatch {
    pub fn new() -> Stopwatch {
        Stopwatch { instants: Vec::new() }
    }

    pub fn click(&mut self) {
        self.instants.push(Instant::now());
    }

    /// Durations between each pair of consecutive clicks.
    pub fn laps(&self) -> Vec<Duration> {
        self.instants
            .windows(2)
            .map(|w| w[1].duration_since(w[0]))
            .collect()
    }
}

impl Default for Stopwatch {
    fn default() -> Stopwatch {
        Stopwatch::new()
    }
}

/// Runs `f` once and returns how long it took.
pub fn time<F: FnOnce()>(f: F) -> Duration {
    let mut stopwatch = Stopwatch::new();
    stopwatch.click();
    f();
    stopwatch.click();
    stopwatch.laps()[0]
}
