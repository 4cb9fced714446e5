//! Measurement Entry Points
//!
//! A run is calibration, optional chunk-size tuning and one final pass. The
//! final pass streams `done = false` snapshots after each chunk and ends with
//! exactly one terminal snapshot. Snapshots travel over a channel of capacity
//! one, so the run is paced by whoever consumes the stream.

use crate::calibrate::calibrate_overhead;
use crate::candidate::AlgorithmCandidate;
use crate::config::{Concurrency, MeasureConfig};
use crate::emitter::Pass;
use crate::results::{RunResults, Snapshot};
use crate::sink::{StatusSink, TracingSink};
use crate::tuner::tune_chunk_size;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Errors from the blocking entry point
#[derive(Debug, Error)]
pub enum MeasureError {
    /// The async runtime could not be created
    #[error("Failed to build async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    /// A blocking measurement was requested from inside an async runtime
    #[error("Cannot block on a measurement from within an async runtime; use `measure` instead")]
    NestedRuntime,
}

/// Stream of progress snapshots from a running measurement.
///
/// Dropping the stream aborts the run.
#[derive(Debug)]
pub struct ResultStream {
    rx: mpsc::Receiver<Snapshot>,
    handle: JoinHandle<()>,
    finished: bool,
}

impl ResultStream {
    /// Drain the stream and return the terminal result map
    pub async fn into_terminal(mut self) -> RunResults {
        let mut last = RunResults::new();
        while let Some(snapshot) = self.next().await {
            if snapshot.done {
                return snapshot.value;
            }
            last = snapshot.value;
        }
        // Run task died before its terminal snapshot
        last
    }
}

impl Stream for ResultStream {
    type Item = Snapshot;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Snapshot>> {
        if self.finished {
            return Poll::Ready(None);
        }
        match self.rx.poll_recv(cx) {
            Poll::Ready(Some(snapshot)) => {
                if snapshot.done {
                    self.finished = true;
                }
                Poll::Ready(Some(snapshot))
            }
            Poll::Ready(None) => {
                self.finished = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Drop for ResultStream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Configured measurement engine
#[derive(Clone)]
pub struct Measurer {
    config: MeasureConfig,
    sink: Arc<dyn StatusSink>,
}

impl Measurer {
    /// Create a measurer reporting through `tracing`
    pub fn new(config: MeasureConfig) -> Self {
        Self {
            config,
            sink: Arc::new(TracingSink),
        }
    }

    /// Report status messages to `sink` instead
    pub fn with_sink(mut self, sink: Arc<dyn StatusSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Configuration used for every run
    pub fn config(&self) -> &MeasureConfig {
        &self.config
    }

    /// Start a run on the current tokio runtime and stream its snapshots.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn measure_streaming(&self, candidates: Vec<AlgorithmCandidate>) -> ResultStream {
        let (tx, rx) = mpsc::channel(1);
        let config = self.config.clone();
        let sink = Arc::clone(&self.sink);
        let handle = tokio::spawn(drive(candidates, config, sink, tx));

        ResultStream {
            rx,
            handle,
            finished: false,
        }
    }

    /// Run to completion (or budget exhaustion) and return the final results
    pub async fn measure(&self, candidates: Vec<AlgorithmCandidate>) -> RunResults {
        self.measure_streaming(candidates).into_terminal().await
    }

    /// Like [`Measurer::measure`], on a dedicated current-thread runtime.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::NestedRuntime`] when called from within a tokio
    /// runtime, where blocking the thread would stall the enclosing executor.
    /// Await [`Measurer::measure`] there instead.
    pub fn measure_blocking(
        &self,
        candidates: Vec<AlgorithmCandidate>,
    ) -> Result<RunResults, MeasureError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(MeasureError::NestedRuntime);
        }
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(runtime.block_on(self.measure(candidates)))
    }
}

impl std::fmt::Debug for Measurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Measurer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

async fn drive(
    candidates: Vec<AlgorithmCandidate>,
    config: MeasureConfig,
    sink: Arc<dyn StatusSink>,
    tx: mpsc::Sender<Snapshot>,
) {
    let overhead_ms = calibrate_overhead(&config).await;

    let chunk_size = match config.concurrency {
        Concurrency::Auto => tune_chunk_size(&candidates, &config, sink.as_ref()).await,
        Concurrency::Fixed(n) => n.max(1),
    };

    let pass = Pass {
        candidates: &candidates,
        config: &config,
        chunk_size,
        overhead_ms,
        sink: sink.as_ref(),
    };
    let outcome = pass.run(Some(&tx)).await;
    tracing::debug!(
        truncated = outcome.truncated,
        candidates = outcome.results.len(),
        "measurement finished"
    );

    // Receiver may already be gone
    let _ = tx.send(Snapshot::terminal(outcome.results)).await;
}

/// Stream a run with [`TracingSink`] status reporting
pub fn measure_streaming(
    candidates: Vec<AlgorithmCandidate>,
    config: MeasureConfig,
) -> ResultStream {
    Measurer::new(config).measure_streaming(candidates)
}

/// Measure `candidates` and return the terminal result map
pub async fn measure(candidates: Vec<AlgorithmCandidate>, config: MeasureConfig) -> RunResults {
    Measurer::new(config).measure(candidates).await
}

/// Blocking variant of [`measure`]; see [`Measurer::measure_blocking`]
pub fn measure_blocking(
    candidates: Vec<AlgorithmCandidate>,
    config: MeasureConfig,
) -> Result<RunResults, MeasureError> {
    Measurer::new(config).measure_blocking(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{MemorySink, SilentSink, StatusCode};
    use growthbench_stats::PerformanceRating;
    use std::time::Duration;

    fn sleep_candidate(name: &str, per_size: Duration) -> AlgorithmCandidate {
        AlgorithmCandidate::from_fn(name, move |size, _| std::thread::sleep(per_size * size as u32))
    }

    fn quick(sizes: &[usize]) -> MeasureConfig {
        MeasureConfig::default()
            .with_sizes(sizes.to_vec())
            .with_iterations(4)
            .with_warmup_discard(false)
            .with_concurrency(Concurrency::Fixed(1))
    }

    fn silent(config: MeasureConfig) -> Measurer {
        Measurer::new(config).with_sink(Arc::new(SilentSink))
    }

    #[tokio::test]
    async fn test_exactly_one_terminal_snapshot_last() {
        let candidates = vec![AlgorithmCandidate::from_fn("add", |size, _| size + 1)];
        let snapshots: Vec<Snapshot> = silent(quick(&[1, 2, 3]))
            .measure_streaming(candidates)
            .collect()
            .await;

        let terminal = snapshots.iter().filter(|s| s.done).count();
        assert_eq!(terminal, 1);
        assert!(snapshots.last().is_some_and(|s| s.done));
        // 3 sizes x 4 iterations at chunk size 1
        assert_eq!(snapshots.len(), 13);
        assert!(snapshots.last().is_some_and(|s| s.value["add"].finalized));
    }

    #[tokio::test]
    async fn test_doubling_sleep_is_exponential() {
        let candidates = vec![sleep_candidate("doubling", Duration::from_millis(1))];
        let results = silent(quick(&[1, 2, 4, 8, 16])).measure(candidates).await;

        let result = &results["doubling"];
        assert!(result.finalized);
        assert!(
            result.complexity > 0.5 && result.complexity < 0.97,
            "complexity {}",
            result.complexity
        );
        assert_eq!(
            result.estimated_domains[0].rating,
            PerformanceRating::Atrocious
        );
    }

    #[tokio::test]
    async fn test_flat_sleep_is_constant() {
        let candidates = vec![AlgorithmCandidate::from_fn("flat", |_, _| {
            std::thread::sleep(Duration::from_millis(2))
        })];
        let results = silent(quick(&[1, 2, 4, 8])).measure(candidates).await;

        let result = &results["flat"];
        assert!(result.complexity <= 0.1, "complexity {}", result.complexity);
        assert_eq!(
            result.estimated_domains.last().map(|d| d.rating),
            Some(PerformanceRating::Excellent)
        );
    }

    #[tokio::test]
    async fn test_exhausted_budget_still_terminates() {
        let sink = Arc::new(MemorySink::new());
        let candidates = vec![
            AlgorithmCandidate::from_fn("a", |size, _| size),
            AlgorithmCandidate::from_fn("b", |size, _| size),
        ];
        let config = quick(&[1, 2, 3]).with_time_budget(Duration::ZERO);
        let results = Measurer::new(config)
            .with_sink(sink.clone())
            .measure(candidates)
            .await;

        assert_eq!(results.len(), 1);
        assert!(!results["a"].finalized);
        assert_eq!(sink.count(StatusCode::MaxExecutionTime), 1);
    }

    #[tokio::test]
    async fn test_failures_do_not_propagate() {
        let candidates = vec![AlgorithmCandidate::from_fn("panics", |size, _| {
            if size > 1 {
                panic!("size {} unsupported", size);
            }
        })];
        let results = silent(quick(&[1, 2, 3])).measure(candidates).await;

        assert!(results["panics"].finalized);
        assert_eq!(results["panics"].averages.len(), 3);
    }

    #[tokio::test]
    async fn test_dropping_stream_is_clean() {
        let candidates = vec![sleep_candidate("slow", Duration::from_millis(1))];
        let mut stream = silent(quick(&[1, 2, 3])).measure_streaming(candidates);
        let first = stream.next().await;
        assert!(first.is_some_and(|s| !s.done));
        drop(stream);
    }

    #[test]
    fn test_measure_blocking_outside_runtime() {
        let candidates = vec![AlgorithmCandidate::from_fn("mul", |size, _| size * 3)];
        let results = silent(quick(&[1, 2])).measure_blocking(candidates).unwrap();
        assert!(results["mul"].finalized);
    }

    #[tokio::test]
    async fn test_measure_blocking_inside_runtime_is_rejected() {
        let candidates = vec![AlgorithmCandidate::from_fn("mul", |size, _| size * 3)];
        let result = silent(quick(&[1, 2])).measure_blocking(candidates);
        assert!(matches!(result, Err(MeasureError::NestedRuntime)));
    }
}
