//! Sample Recorder
//!
//! Times exactly one invocation of a candidate routine. The recorder suspends
//! once after the routine completes and before the timer stops, so every
//! invocation of a chunk starts before any of them is timed out. Each duration
//! therefore spans the work interleaved around it and grows with the chunk
//! size. Failures (an `Err`
//! return or a panic) are reported as `TEST_ERROR` and the elapsed time up to
//! the failure is still returned, so a faulty candidate keeps a defined but
//! skewed measurement instead of aborting the run.

use crate::candidate::{AlgorithmCandidate, RoutineError};
use crate::measure::Timer;
use crate::sink::{StatusCode, StatusSink};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;

/// One timed invocation
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRecord {
    /// Candidate name
    pub name: String,
    /// Input size
    pub size: usize,
    /// Wall-clock duration in milliseconds
    pub duration_ms: f64,
}

/// Invoke `candidate` once at `size` and time it.
pub async fn record_sample(
    candidate: &AlgorithmCandidate,
    size: usize,
    call: usize,
    sink: &dyn StatusSink,
) -> SampleRecord {
    let timer = Timer::start();

    let outcome = AssertUnwindSafe(async { candidate.invoke(size, call).await })
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| Err(RoutineError::from_panic(panic)));

    // Completion point: let the rest of the chunk start
    tokio::task::yield_now().await;

    let duration_ms = timer.elapsed_ms();

    if let Err(error) = outcome {
        sink.warn(
            StatusCode::TestError,
            &format!(
                "Test \"{}\" execution failed (size: \"{}\"): {}. Measurement might be inaccurate.",
                candidate.name(),
                size,
                error
            ),
        );
    }

    SampleRecord {
        name: candidate.name().to_string(),
        size,
        duration_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{Level, MemorySink};
    use std::time::Duration;

    #[tokio::test]
    async fn test_records_duration() {
        let candidate = AlgorithmCandidate::from_fn("sleep", |size, _| {
            std::thread::sleep(Duration::from_millis(size as u64));
        });
        let sink = MemorySink::new();

        let record = record_sample(&candidate, 5, 0, &sink).await;

        assert_eq!(record.name, "sleep");
        assert_eq!(record.size, 5);
        assert!(record.duration_ms >= 4.0);
        assert!(sink.entries().is_empty());
    }

    #[tokio::test]
    async fn test_error_is_swallowed_and_reported() {
        let candidate =
            AlgorithmCandidate::fallible("broken", |_, _| Err(RoutineError::new("ugh")));
        let sink = MemorySink::new();

        let record = record_sample(&candidate, 2, 0, &sink).await;

        assert!(record.duration_ms >= 0.0);
        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, Level::Warn);
        assert_eq!(entries[0].code, StatusCode::TestError);
        assert!(entries[0].message.contains("broken"));
        assert!(entries[0].message.contains("ugh"));
    }

    #[tokio::test]
    async fn test_panic_is_caught() {
        let candidate = AlgorithmCandidate::from_fn("panicky", |size, _| {
            if size > 1 {
                panic!("size too large");
            }
        });
        let sink = MemorySink::new();

        let record = record_sample(&candidate, 3, 0, &sink).await;

        assert_eq!(record.size, 3);
        assert_eq!(sink.count(StatusCode::TestError), 1);
        assert!(sink.entries()[0].message.contains("size too large"));
    }

    #[tokio::test]
    async fn test_chunk_invocations_interleave() {
        let events = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let log = std::sync::Arc::clone(&events);
        let candidate = AlgorithmCandidate::from_fn("sleep", move |_, call| {
            log.lock().unwrap().push(call);
            std::thread::sleep(Duration::from_millis(2));
        });

        let records = futures::future::join_all(
            (0..5).map(|call| record_sample(&candidate, 1, call, &crate::sink::SilentSink)),
        )
        .await;

        assert_eq!(*events.lock().unwrap(), vec![0, 1, 2, 3, 4]);
        // The first timer stays open while the whole chunk runs
        assert!(records[0].duration_ms >= 10.0, "{:?}", records[0]);
        assert!(records[4].duration_ms >= 2.0, "{:?}", records[4]);
    }
}
