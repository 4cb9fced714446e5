//! Streaming Result Emitter
//!
//! A [`Pass`] runs the full candidate × size matrix once with a fixed chunk
//! size and overhead correction. Candidates and sizes are processed strictly
//! in the order supplied. A single wall-clock budget covers the whole pass:
//! it is checked after every chunk, and once exceeded the in-flight size is
//! dropped and the pass ends with whatever was accumulated.

use crate::candidate::AlgorithmCandidate;
use crate::config::MeasureConfig;
use crate::harness::SizeWindow;
use crate::measure::{Timer, duration_ms};
use crate::results::{PerCandidateResult, RunResults, Snapshot};
use crate::sink::{StatusCode, StatusSink};
use tokio::sync::mpsc;

/// Outcome of a single pass
#[derive(Debug, Clone)]
pub(crate) struct PassOutcome {
    pub results: RunResults,
    /// The time budget ran out before every candidate was finalized
    pub truncated: bool,
}

/// One run of the candidate × size matrix
pub(crate) struct Pass<'a> {
    pub candidates: &'a [AlgorithmCandidate],
    pub config: &'a MeasureConfig,
    pub chunk_size: usize,
    pub overhead_ms: f64,
    pub sink: &'a dyn StatusSink,
}

/// Mutable state of a pass: the result map and the global elapsed counter
struct RunState {
    results: RunResults,
    timer: Timer,
    budget_ms: f64,
}

impl RunState {
    fn new(config: &MeasureConfig) -> Self {
        Self {
            results: RunResults::new(),
            timer: Timer::start(),
            budget_ms: duration_ms(config.time_budget),
        }
    }

    fn budget_exceeded(&self) -> bool {
        self.timer.elapsed_ms() >= self.budget_ms
    }
}

impl Pass<'_> {
    /// Run the pass.
    ///
    /// With `progress`, a `done = false` snapshot is sent after every chunk
    /// that finished within the budget. The terminal snapshot is left to the
    /// caller. A closed progress channel stops the pass early.
    pub async fn run(&self, progress: Option<&mpsc::Sender<Snapshot>>) -> PassOutcome {
        let iterations = self.config.effective_iterations();
        let chunk_size = self.chunk_size.max(1);
        let mut state = RunState::new(self.config);

        if self.config.sizes.len() < 2 {
            self.sink.warn(
                StatusCode::Sizes,
                "Time complexity measurement disabled: Growth rate cannot be calculated with < 2 sizes",
            );
        }

        for candidate in self.candidates {
            let name = candidate.name();
            self.sink.info(
                StatusCode::Test,
                &format!(
                    "{} (input sizes: {:?}, each {} iterations, {} in parallel, timeout after {}s)...",
                    name,
                    self.config.sizes,
                    iterations,
                    chunk_size,
                    self.config.time_budget.as_secs_f64()
                ),
            );
            state
                .results
                .insert(name.to_string(), PerCandidateResult::pending(name));

            for &size in &self.config.sizes {
                let mut window = SizeWindow::new(candidate, size, iterations, chunk_size);

                while window.run_next_chunk(self.sink).await {
                    if state.budget_exceeded() {
                        self.sink.warn(
                            StatusCode::MaxExecutionTime,
                            "Maximum execution time exceeded. Yielding incomplete measurement result",
                        );
                        return PassOutcome {
                            results: state.results,
                            truncated: true,
                        };
                    }

                    if let Some(tx) = progress {
                        if tx.send(Snapshot::progress(state.results.clone())).await.is_err() {
                            tracing::debug!("progress receiver dropped, stopping pass");
                            return PassOutcome {
                                results: state.results,
                                truncated: true,
                            };
                        }
                    }
                }

                let average_ms = window.finish(self.config.warmup_discard, self.overhead_ms);
                if let Some(entry) = state.results.get_mut(name) {
                    entry.push_average(size, average_ms);
                }
            }

            if let Some(entry) = state.results.get_mut(name) {
                entry.finalize();
            }
        }

        PassOutcome {
            results: state.results,
            truncated: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::RoutineError;
    use crate::sink::{MemorySink, SilentSink};
    use std::time::Duration;

    fn config(sizes: &[usize], iterations: usize) -> MeasureConfig {
        MeasureConfig::default()
            .with_sizes(sizes.to_vec())
            .with_iterations(iterations)
            .with_warmup_discard(false)
    }

    fn pass<'a>(
        candidates: &'a [AlgorithmCandidate],
        config: &'a MeasureConfig,
        sink: &'a dyn StatusSink,
    ) -> Pass<'a> {
        Pass {
            candidates,
            config,
            chunk_size: 4,
            overhead_ms: 0.0,
            sink,
        }
    }

    #[tokio::test]
    async fn test_pass_finalizes_every_candidate_in_order() {
        let candidates = vec![
            AlgorithmCandidate::from_fn("second", |size, _| size + 1),
            AlgorithmCandidate::from_fn("first", |size, _| size * 2),
        ];
        let config = config(&[1, 2, 3], 8);
        let outcome = pass(&candidates, &config, &SilentSink).run(None).await;

        assert!(!outcome.truncated);
        let names: Vec<&str> = outcome.results.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["second", "first"]);

        for result in outcome.results.values() {
            assert!(result.finalized);
            assert_eq!(result.averages.len(), 3);
            let sizes: Vec<usize> = result.averages.iter().map(|a| a.size).collect();
            assert_eq!(sizes, vec![1, 2, 3]);
            assert!((0.0..=1.0).contains(&result.complexity));
        }
    }

    #[tokio::test]
    async fn test_duplicate_name_replaces_in_place() {
        let candidates = vec![
            AlgorithmCandidate::from_fn("dup", |size, _| size),
            AlgorithmCandidate::from_fn("other", |size, _| size),
            AlgorithmCandidate::from_fn("dup", |size, _| size + 1),
        ];
        let config = config(&[1, 2], 2);
        let outcome = pass(&candidates, &config, &SilentSink).run(None).await;

        let names: Vec<&str> = outcome.results.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["dup", "other"]);
        assert!(outcome.results["dup"].finalized);
    }

    #[tokio::test]
    async fn test_single_size_warns_and_yields_nan() {
        let sink = MemorySink::new();
        let candidates = vec![AlgorithmCandidate::from_fn("one", |size, _| size)];
        let config = config(&[10], 4);
        let outcome = pass(&candidates, &config, &sink).run(None).await;

        assert_eq!(sink.count(StatusCode::Sizes), 1);
        let result = &outcome.results["one"];
        assert!(result.finalized);
        assert!(result.complexity.is_nan());
        assert!(result.estimated_domains.is_empty());
    }

    #[tokio::test]
    async fn test_failing_candidate_still_has_result() {
        let sink = MemorySink::new();
        let candidates = vec![AlgorithmCandidate::fallible("fails above one", |size, _| {
            if size > 1 {
                Err(RoutineError::new("too big"))
            } else {
                Ok(())
            }
        })];
        let config = config(&[1, 2, 3], 4);
        let outcome = pass(&candidates, &config, &sink).run(None).await;

        assert!(outcome.results["fails above one"].finalized);
        assert_eq!(sink.count(StatusCode::TestError), 8);
        assert_eq!(sink.count(StatusCode::Test), 1);
    }

    #[tokio::test]
    async fn test_budget_truncates_and_drops_in_flight_size() {
        let sink = MemorySink::new();
        let candidates = vec![
            AlgorithmCandidate::new("sleepy", |_, _| async {
                tokio::time::sleep(Duration::from_millis(5)).await;
                Ok(())
            }),
            AlgorithmCandidate::from_fn("never reached", |size, _| size),
        ];
        let config = config(&[1, 2, 3, 4], 8).with_time_budget(Duration::from_millis(1));
        let outcome = pass(&candidates, &config, &sink).run(None).await;

        assert!(outcome.truncated);
        assert_eq!(sink.count(StatusCode::MaxExecutionTime), 1);
        assert_eq!(outcome.results.len(), 1);

        let sleepy = &outcome.results["sleepy"];
        assert!(!sleepy.finalized);
        assert!(sleepy.averages.is_empty());
    }

    #[tokio::test]
    async fn test_progress_after_every_chunk() {
        let (tx, mut rx) = mpsc::channel(64);
        let candidates = vec![AlgorithmCandidate::from_fn("a", |size, _| size)];
        // 2 sizes x 8 iterations in chunks of 4
        let config = config(&[1, 2], 8);
        let outcome = pass(&candidates, &config, &SilentSink).run(Some(&tx)).await;
        drop(tx);

        let mut snapshots = Vec::new();
        while let Some(snapshot) = rx.recv().await {
            snapshots.push(snapshot);
        }

        assert!(!outcome.truncated);
        assert_eq!(snapshots.len(), 4);
        assert!(snapshots.iter().all(|s| !s.done));
        // The in-flight size is not visible until it completes
        assert!(snapshots[0].value["a"].averages.is_empty());
        assert_eq!(snapshots[2].value["a"].averages.len(), 1);
    }
}
