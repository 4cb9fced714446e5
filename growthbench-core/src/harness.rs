//! Sampling Harness
//!
//! Measures one candidate at one input size. Iterations are pulled from a
//! [`ChunkSchedule`]; each chunk is recorded concurrently on the current task
//! and fully drained before the next chunk starts. Invocations of a chunk
//! interleave at their completion points, so larger chunks yield longer
//! per-call durations. Once every iteration has
//! been recorded, the window is collapsed to a single average duration:
//!
//! 1. With warm-up discarding, the first `⌈iterations/4⌉ - 1` samples are
//!    dropped and excluded from the call count.
//! 2. The calibrated overhead is subtracted from the remaining sum, floored at
//!    [`MIN_ADJUSTED_DURATION_MS`].
//! 3. The adjusted sum is divided by the remaining call count.

use crate::candidate::AlgorithmCandidate;
use crate::recorder::{SampleRecord, record_sample};
use crate::scheduler::ChunkSchedule;
use crate::sink::StatusSink;
use futures::future::join_all;

/// Floor for the overhead-corrected duration sum.
///
/// Keeps averages positive (and their logarithm finite) when the calibrated
/// overhead exceeds what a very fast candidate actually took.
pub const MIN_ADJUSTED_DURATION_MS: f64 = 0.000_000_000_1;

/// Number of leading samples dropped by warm-up discarding
pub fn warmup_discard_count(iterations: usize) -> usize {
    iterations.div_ceil(4).saturating_sub(1)
}

/// Running totals for one (candidate, size) window
#[derive(Debug, Clone, Default)]
pub struct SizeAggregate {
    calls: usize,
    // Arrival order matters: warm-up discarding drops from the front
    durations: Vec<f64>,
}

impl SizeAggregate {
    /// Create an empty aggregate with room for `iterations` samples
    pub fn with_capacity(iterations: usize) -> Self {
        Self {
            calls: 0,
            durations: Vec::with_capacity(iterations),
        }
    }

    /// Add one sample
    pub fn push(&mut self, record: SampleRecord) {
        self.calls += 1;
        self.durations.push(record.duration_ms);
    }

    /// Number of samples recorded so far
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Accumulated duration of all samples, in milliseconds
    pub fn total_ms(&self) -> f64 {
        self.durations.iter().sum()
    }

    /// Collapse the window to an average duration in milliseconds
    pub fn average_duration(&self, warmup_discard: bool, overhead_ms: f64) -> f64 {
        let discarded = if warmup_discard {
            warmup_discard_count(self.calls).min(self.calls)
        } else {
            0
        };

        let counted = (self.calls - discarded).max(1);
        let duration: f64 = self.durations[discarded..].iter().sum();
        let adjusted = (duration - overhead_ms).max(MIN_ADJUSTED_DURATION_MS);

        adjusted / counted as f64
    }
}

/// Measurement window for one candidate at one size
pub struct SizeWindow<'a> {
    candidate: &'a AlgorithmCandidate,
    size: usize,
    schedule: ChunkSchedule,
    aggregate: SizeAggregate,
}

impl<'a> SizeWindow<'a> {
    /// Prepare a window of `iterations` invocations, `chunk_size` at a time
    pub fn new(
        candidate: &'a AlgorithmCandidate,
        size: usize,
        iterations: usize,
        chunk_size: usize,
    ) -> Self {
        Self {
            candidate,
            size,
            schedule: ChunkSchedule::new(iterations, chunk_size),
            aggregate: SizeAggregate::with_capacity(iterations),
        }
    }

    /// Run the next chunk to completion.
    ///
    /// Returns `false` once every iteration has been recorded.
    pub async fn run_next_chunk(&mut self, sink: &dyn StatusSink) -> bool {
        let Some(chunk) = self.schedule.next() else {
            return false;
        };

        let candidate = self.candidate;
        let size = self.size;
        let records = join_all(chunk.map(|call| record_sample(candidate, size, call, sink))).await;

        for record in records {
            self.aggregate.push(record);
        }
        true
    }

    /// Run every remaining chunk
    pub async fn run_to_end(&mut self, sink: &dyn StatusSink) {
        while self.run_next_chunk(sink).await {}
    }

    /// Input size of this window
    pub fn size(&self) -> usize {
        self.size
    }

    /// Samples recorded so far
    pub fn aggregate(&self) -> &SizeAggregate {
        &self.aggregate
    }

    /// Collapse the window to its average duration
    pub fn finish(self, warmup_discard: bool, overhead_ms: f64) -> f64 {
        self.aggregate.average_duration(warmup_discard, overhead_ms)
    }
}
