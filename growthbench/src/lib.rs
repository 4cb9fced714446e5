#![warn(missing_docs)]
//! # GrowthBench
//!
//! Empirical time-complexity estimation for Rust routines.
//!
//! GrowthBench runs a routine at a series of input sizes, fits the growth of
//! its average run time and names the complexity class it most likely
//! belongs to:
//! - **Chunked Sampling**: invocations run concurrently in bounded chunks on one task
//! - **Warm-up Discarding**: the leading quarter of samples at each size is dropped
//! - **Overhead Calibration**: harness cost is measured on a no-op and subtracted
//! - **Chunk Auto-Tuning**: concurrency is raised until timings leave the timer's noise floor
//! - **Streaming Progress**: snapshots after every chunk, under a global time budget
//! - **Classification**: overlapping Big-O domains from O(1) to O(n!), most severe first
//!
//! ## Quick Start
//!
//! ```ignore
//! use growthbench::prelude::*;
//!
//! let candidates = vec![AlgorithmCandidate::from_fn("sum", |size, _call| {
//!     (0..size).sum::<usize>()
//! })];
//! let results = measure_blocking(candidates, MeasureConfig::default())?;
//! println!("{:?}", results["sum"].estimated_domains);
//! ```
//!
//! ## Streaming
//!
//! ```ignore
//! let mut stream = measure_streaming(candidates, config);
//! while let Some(snapshot) = stream.next().await {
//!     if snapshot.done {
//!         break;
//!     }
//! }
//! ```

// Re-export core types
pub use growthbench_core::{
    AlgorithmCandidate, Concurrency, DEFAULT_SIZES, MeasureConfig, MeasureError, Measurer,
    MemorySink, PerCandidateResult, ResultStream, RoutineError, RunResults, SilentSink,
    SizeAverage, Snapshot, StatusCode, StatusSink, TracingSink, measure, measure_blocking,
    measure_streaming,
};

// Re-export stats
pub use growthbench_stats::{
    ComplexityDomain, DOMAIN_TABLE, PerformanceRating, estimate_domains, growth_rate,
};

// Re-export report types
pub use growthbench_report::{CandidateReport, OutputFormat, Report};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        AlgorithmCandidate, Concurrency, MeasureConfig, Measurer, PerformanceRating,
        RoutineError, RunResults, Snapshot, measure, measure_blocking, measure_streaming,
    };
}

/// Run the GrowthBench CLI.
///
/// Call this from a binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     growthbench::run()
/// }
/// ```
pub use growthbench_cli::run;
