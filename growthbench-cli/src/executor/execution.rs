//! Measurement Execution
//!
//! Runs the selected catalog entries through the measurement engine and
//! drives a progress bar from the streamed snapshots.
//!
//! ## Data Flow
//!
//! ```text
//! CatalogEntry (filtered)
//!        │
//!        ▼
//!   RunGroup per size series
//!        │
//!        ▼
//! ┌──────────────────┐
//! │ measure_streaming│  Calibrate → Tune → Final pass (snapshots)
//! └────────┬─────────┘
//!          │
//!          ▼
//!  ExecutionOutcome (merged results, truncation flag)
//! ```

use crate::catalog::CatalogEntry;
use futures::StreamExt;
use growthbench_core::{AlgorithmCandidate, MeasureConfig, Measurer, RunResults};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

/// Candidates sharing one size series, measured in a single run
#[derive(Debug, Clone)]
pub struct RunGroup {
    /// Configuration for this run
    pub config: MeasureConfig,
    /// Candidates, in catalog order
    pub candidates: Vec<AlgorithmCandidate>,
}

impl RunGroup {
    /// Number of (candidate, size) windows in this run
    pub fn window_count(&self) -> usize {
        self.candidates.len() * self.config.sizes.len()
    }
}

/// Split entries into runs by preferred size series.
///
/// With `sizes_pinned`, every entry uses the configured sizes. Groups appear
/// in order of their first entry.
pub fn plan_runs(
    entries: &[&CatalogEntry],
    base: &MeasureConfig,
    sizes_pinned: bool,
) -> Vec<RunGroup> {
    let mut groups: Vec<RunGroup> = Vec::new();

    for entry in entries {
        let sizes = match entry.sizes {
            Some(sizes) if !sizes_pinned => sizes.to_vec(),
            _ => base.sizes.clone(),
        };

        match groups.iter_mut().find(|g| g.config.sizes == sizes) {
            Some(group) => group.candidates.push(entry.candidate()),
            None => groups.push(RunGroup {
                config: base.clone().with_sizes(sizes),
                candidates: vec![entry.candidate()],
            }),
        }
    }

    groups
}

/// Merged results of every run
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    /// Results keyed by candidate name, in execution order
    pub results: RunResults,
    /// At least one run ran out of time budget
    pub truncated: bool,
    /// Wall-clock time of the whole execution
    pub total_duration_ms: f64,
}

/// Runs measurement groups with an optional progress bar
#[derive(Debug, Clone, Default)]
pub struct Executor {
    show_progress: bool,
}

impl Executor {
    /// Create an executor
    pub fn new(show_progress: bool) -> Self {
        Self { show_progress }
    }

    /// Execute every group in order on a current-thread runtime
    pub fn execute(&self, groups: Vec<RunGroup>) -> anyhow::Result<ExecutionOutcome> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(runtime.block_on(self.execute_async(groups)))
    }

    async fn execute_async(&self, groups: Vec<RunGroup>) -> ExecutionOutcome {
        let start = Instant::now();
        let total: usize = groups.iter().map(RunGroup::window_count).sum();

        let pb = if self.show_progress {
            ProgressBar::new(total as u64)
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message("Calibrating...");

        let mut results = RunResults::new();
        let mut truncated = false;
        let mut offset = 0;

        for group in groups {
            let windows = group.window_count();
            let expected = group.candidates.len();
            let mut stream = Measurer::new(group.config).measure_streaming(group.candidates);

            while let Some(snapshot) = stream.next().await {
                pb.set_position((offset + completed_windows(&snapshot.value)) as u64);
                if let Some(name) = snapshot.value.keys().last() {
                    pb.set_message(name.clone());
                }

                if snapshot.done {
                    truncated |= snapshot.value.len() < expected
                        || snapshot.value.values().any(|r| !r.finalized);
                    results.extend(snapshot.value);
                }
            }

            offset += windows;
            if truncated {
                // The budget is spent; later groups are skipped
                tracing::debug!("skipping remaining runs after truncation");
                break;
            }
        }

        if truncated {
            pb.abandon_with_message("Time budget exceeded");
        } else {
            pb.finish_with_message("Complete");
        }

        ExecutionOutcome {
            results,
            truncated,
            total_duration_ms: start.elapsed().as_secs_f64() * 1000.0,
        }
    }
}

fn completed_windows(results: &RunResults) -> usize {
    results.values().map(|r| r.averages.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CATALOG;
    use growthbench_core::Concurrency;

    fn entries(names: &[&str]) -> Vec<&'static CatalogEntry> {
        names
            .iter()
            .filter_map(|name| CATALOG.iter().find(|e| e.name == *name))
            .collect()
    }

    #[test]
    fn test_plan_groups_by_sizes() {
        let base = MeasureConfig::default();
        let groups = plan_runs(
            &entries(&["constant_add", "fibonacci", "linear_sum"]),
            &base,
            false,
        );

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].candidates.len(), 2);
        assert_eq!(groups[0].config.sizes, base.sizes);
        assert_eq!(groups[1].candidates[0].name(), "fibonacci");
        assert_eq!(groups[1].config.sizes, vec![1, 2, 5, 10, 15]);
    }

    #[test]
    fn test_pinned_sizes_single_group() {
        let base = MeasureConfig::default().with_sizes(vec![1, 2, 3]);
        let groups = plan_runs(&entries(&["constant_add", "fibonacci"]), &base, true);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].window_count(), 6);
    }

    #[test]
    fn test_execute_merges_groups() {
        let base = MeasureConfig::default()
            .with_sizes(vec![1, 2])
            .with_iterations(4)
            .with_concurrency(Concurrency::Fixed(2));
        let groups = plan_runs(&entries(&["constant_add", "fibonacci"]), &base, false);

        let outcome = Executor::new(false).execute(groups).unwrap();
        assert!(!outcome.truncated);

        let names: Vec<&str> = outcome.results.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["constant_add", "fibonacci"]);
        assert_eq!(outcome.results["fibonacci"].averages.len(), 5);
        assert!(outcome.results.values().all(|r| r.finalized));
    }
}
