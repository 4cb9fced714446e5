//! Parallelism Auto-Tuner
//!
//! Searches for the smallest chunk size at which no candidate's finalized
//! duration falls below the timer noise floor. Trial chunk sizes are
//! `1, 11, 21, ...` up to [`MAX_TUNED_CHUNK_SIZE`]; without convergence the
//! tuner falls back to [`DEFAULT_CHUNK_SIZE`].

use crate::candidate::AlgorithmCandidate;
use crate::config::{DEFAULT_CHUNK_SIZE, MeasureConfig};
use crate::emitter::Pass;
use crate::results::PerCandidateResult;
use crate::sink::{SilentSink, StatusCode, StatusSink};

/// Durations below this are treated as unresolved by the timer
pub const NOISE_FLOOR_MS: f64 = 0.01;

/// Increment between trial chunk sizes
pub const CHUNK_SIZE_STEP: usize = 10;

/// Largest chunk size the search will try
pub const MAX_TUNED_CHUNK_SIZE: usize = 1000;

/// Pick a chunk size for `candidates`.
///
/// Trials run with raw timings (no overhead correction) and report nothing;
/// only the final fallback warning goes to `sink`.
pub async fn tune_chunk_size(
    candidates: &[AlgorithmCandidate],
    config: &MeasureConfig,
    sink: &dyn StatusSink,
) -> usize {
    search_chunk_size(
        |chunk_size| async move {
            let pass = Pass {
                candidates,
                config,
                chunk_size,
                overhead_ms: 0.0,
                sink: &SilentSink,
            };
            let outcome = pass.run(None).await;
            unresolved_count(outcome.results.values())
        },
        sink,
    )
    .await
}

/// Finalized results whose duration the timer could not resolve
fn unresolved_count<'a>(results: impl Iterator<Item = &'a PerCandidateResult>) -> usize {
    results
        .filter(|r| r.finalized)
        .filter(|r| r.duration < NOISE_FLOOR_MS)
        .count()
}

/// Walk the trial chunk sizes until `trial` reports no unresolved candidate
async fn search_chunk_size<F, Fut>(mut trial: F, sink: &dyn StatusSink) -> usize
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = usize>,
{
    let mut chunk_size = 1;

    while chunk_size <= MAX_TUNED_CHUNK_SIZE {
        let unresolved = trial(chunk_size).await;
        if unresolved == 0 {
            tracing::debug!(chunk_size, "chunk size tuned");
            return chunk_size;
        }

        tracing::debug!(chunk_size, unresolved, "chunk size rejected");
        chunk_size += CHUNK_SIZE_STEP;
    }

    sink.warn(
        StatusCode::ChunkSize,
        &format!(
            "Chunk size optimization failed. Using default chunk size of {}",
            DEFAULT_CHUNK_SIZE
        ),
    );
    DEFAULT_CHUNK_SIZE
}
