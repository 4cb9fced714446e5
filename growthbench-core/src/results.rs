//! Result Types
//!
//! Per-candidate results are keyed by candidate name in insertion order, so
//! output follows the order candidates were supplied in.

use growthbench_stats::{ComplexityDomain, estimate_domains, growth_rate};
use indexmap::IndexMap;
use serde::Serialize;

/// Average duration measured at one input size
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizeAverage {
    /// Input size
    pub size: usize,
    /// Average duration per invocation, in milliseconds
    pub average_ms: f64,
}

/// Result for one candidate
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerCandidateResult {
    /// Candidate name
    pub name: String,
    /// Sum of the per-size averages, in milliseconds
    pub duration: f64,
    /// Growth rate in `[0, 1]`, or `NaN` with fewer than two sizes
    pub complexity: f64,
    /// Every matching complexity domain, most severe first
    pub estimated_domains: Vec<ComplexityDomain>,
    /// Per-size averages completed so far
    pub averages: Vec<SizeAverage>,
    /// Whether all sizes were measured and the estimate computed
    pub finalized: bool,
}

impl PerCandidateResult {
    /// An entry for a candidate whose measurement has started
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration: 0.0,
            complexity: 0.0,
            estimated_domains: Vec::new(),
            averages: Vec::new(),
            finalized: false,
        }
    }

    /// Record the average of a completed size
    pub fn push_average(&mut self, size: usize, average_ms: f64) {
        self.averages.push(SizeAverage { size, average_ms });
    }

    /// Compute duration, complexity and domains from the recorded averages
    pub fn finalize(&mut self) {
        let durations: Vec<f64> = self.averages.iter().map(|a| a.average_ms).collect();
        self.duration = durations.iter().sum();
        self.complexity = growth_rate(&durations);
        self.estimated_domains = estimate_domains(self.complexity);
        self.finalized = true;
    }
}

/// Results of a run, keyed by candidate name in insertion order
pub type RunResults = IndexMap<String, PerCandidateResult>;

/// A progress report
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// `true` only for the single terminal snapshot of a run
    pub done: bool,
    /// Results accumulated so far
    pub value: RunResults,
}

impl Snapshot {
    /// In-progress snapshot
    pub fn progress(value: RunResults) -> Self {
        Self { done: false, value }
    }

    /// Terminal snapshot
    pub fn terminal(value: RunResults) -> Self {
        Self { done: true, value }
    }
}
