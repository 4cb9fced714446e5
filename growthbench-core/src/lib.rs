#![warn(missing_docs)]
//! GrowthBench Core - Measurement Engine
//!
//! This crate measures how the run time of caller-supplied routines grows
//! with input size:
//! - `AlgorithmCandidate` wrapping async or synchronous routines
//! - Chunked concurrent sampling with warm-up discarding
//! - Overhead calibration and chunk-size auto-tuning
//! - Streaming progress snapshots under a global time budget

mod calibrate;
mod candidate;
mod config;
mod emitter;
mod harness;
mod measure;
mod recorder;
mod results;
mod scheduler;
mod sink;
mod stream;
mod tuner;

pub use calibrate::{CALIBRATION_TRIALS, CALIBRATION_WARMUP_TRIALS, calibrate_overhead};
pub use candidate::{AlgorithmCandidate, RoutineError, RoutineFn, RoutineFuture};
pub use config::{
    Concurrency, DEFAULT_CHUNK_SIZE, DEFAULT_ITERATIONS, DEFAULT_SIZES, DEFAULT_TIME_BUDGET,
    MeasureConfig,
};
pub use harness::{MIN_ADJUSTED_DURATION_MS, SizeAggregate, SizeWindow, warmup_discard_count};
pub use measure::{Timer, duration_ms};
pub use recorder::{SampleRecord, record_sample};
pub use results::{PerCandidateResult, RunResults, SizeAverage, Snapshot};
pub use scheduler::ChunkSchedule;
pub use sink::{Level, MemorySink, SilentSink, StatusCode, StatusEntry, StatusSink, TracingSink};
pub use stream::{
    MeasureError, Measurer, ResultStream, measure, measure_blocking, measure_streaming,
};
pub use tuner::{NOISE_FLOOR_MS, tune_chunk_size};

pub use growthbench_stats::{ComplexityDomain, PerformanceRating};
