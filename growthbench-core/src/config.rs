//! Measurement Configuration

use std::time::Duration;

/// Input sizes used when the caller supplies none
pub const DEFAULT_SIZES: [usize; 23] = [
    1, 2, 5, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 150, 200, 300, 400, 500, 600, 700, 800, 900,
    1000,
];

/// Default invocations per size
pub const DEFAULT_ITERATIONS: usize = 100;

/// Default wall-clock budget for one pass over all candidates
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(30);

/// Chunk size used when auto-tuning gives up
pub const DEFAULT_CHUNK_SIZE: usize = 10;

/// How many invocations run concurrently within a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Concurrency {
    /// Search for a chunk size whose timings are not rounded to zero
    #[default]
    Auto,
    /// Use a fixed chunk size
    Fixed(usize),
}

impl std::fmt::Display for Concurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Concurrency::Auto => write!(f, "auto"),
            Concurrency::Fixed(n) => write!(f, "{}", n),
        }
    }
}

impl std::str::FromStr for Concurrency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Concurrency::Auto);
        }
        s.parse::<usize>()
            .map(|n| Concurrency::Fixed(n.max(1)))
            .map_err(|_| format!("Invalid chunk size: {} (expected \"auto\" or a number)", s))
    }
}

/// Parameters of a measurement run
#[derive(Debug, Clone, PartialEq)]
pub struct MeasureConfig {
    /// Input sizes, measured in this order
    pub sizes: Vec<usize>,
    /// Drop the first quarter (minus one) of each size's samples
    pub warmup_discard: bool,
    /// Invocations per size
    pub iterations: usize,
    /// Global wall-clock budget, shared by every candidate and size
    pub time_budget: Duration,
    /// Chunk size selection
    pub concurrency: Concurrency,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            warmup_discard: true,
            iterations: DEFAULT_ITERATIONS,
            time_budget: DEFAULT_TIME_BUDGET,
            concurrency: Concurrency::Auto,
        }
    }
}

impl MeasureConfig {
    /// Set the input sizes
    pub fn with_sizes(mut self, sizes: impl Into<Vec<usize>>) -> Self {
        self.sizes = sizes.into();
        self
    }

    /// Enable or disable warm-up discarding
    pub fn with_warmup_discard(mut self, warmup_discard: bool) -> Self {
        self.warmup_discard = warmup_discard;
        self
    }

    /// Set invocations per size (at least 1)
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations.max(1);
        self
    }

    /// Set the global time budget
    pub fn with_time_budget(mut self, time_budget: Duration) -> Self {
        self.time_budget = time_budget;
        self
    }

    /// Set chunk size selection
    pub fn with_concurrency(mut self, concurrency: Concurrency) -> Self {
        self.concurrency = match concurrency {
            Concurrency::Fixed(n) => Concurrency::Fixed(n.max(1)),
            auto => auto,
        };
        self
    }

    /// Iterations with the lower bound applied (fields are public)
    pub(crate) fn effective_iterations(&self) -> usize {
        self.iterations.max(1)
    }
}
