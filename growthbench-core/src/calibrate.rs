//! Overhead Calibrator
//!
//! Estimates the harness's own per-pass cost by measuring a no-op candidate
//! through the full pipeline at chunk size 1. The estimate is later
//! subtracted from every per-size duration sum of the final pass, whatever
//! chunk size that pass uses.

use crate::candidate::AlgorithmCandidate;
use crate::config::MeasureConfig;
use crate::emitter::Pass;
use crate::sink::SilentSink;

/// Independent calibration trials
pub const CALIBRATION_TRIALS: usize = 100;

/// Leading trials excluded from the estimate
pub const CALIBRATION_WARMUP_TRIALS: usize = 25;

/// Chunk size used for every calibration trial
pub const CALIBRATION_CHUNK_SIZE: usize = 1;

fn nop() -> AlgorithmCandidate {
    AlgorithmCandidate::new("nop", |_, _| async { Ok(()) })
}

/// Average finalized duration of the no-op candidate, in milliseconds
pub async fn calibrate_overhead(config: &MeasureConfig) -> f64 {
    let candidates = [nop()];
    let pass = Pass {
        candidates: &candidates,
        config,
        chunk_size: CALIBRATION_CHUNK_SIZE,
        overhead_ms: 0.0,
        sink: &SilentSink,
    };

    let mut trials = Vec::with_capacity(CALIBRATION_TRIALS);
    for _ in 0..CALIBRATION_TRIALS {
        let outcome = pass.run(None).await;
        // A truncated trial contributes nothing
        trials.push(
            outcome
                .results
                .values()
                .filter(|r| r.finalized)
                .map(|r| r.duration)
                .sum::<f64>(),
        );
    }

    let overhead_ms = average_after_warmup(&trials);
    tracing::debug!(overhead_ms, "calibrated invocation overhead");
    overhead_ms
}

/// Mean of the trials that follow the first [`CALIBRATION_WARMUP_TRIALS`]
fn average_after_warmup(trials: &[f64]) -> f64 {
    let kept = trials.get(CALIBRATION_WARMUP_TRIALS..).unwrap_or_default();
    if kept.is_empty() {
        return 0.0;
    }
    kept.iter().sum::<f64>() / kept.len() as f64
}
