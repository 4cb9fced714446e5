//! Report Building
//!
//! Turns the merged result map into a [`Report`], preserving candidate order.

use super::execution::ExecutionOutcome;
use growthbench_core::MeasureConfig;
use growthbench_report::{
    CandidateReport, CandidateStatus, Report, ReportConfig, ReportMeta, ReportSummary,
};

/// Build a complete Report from an execution outcome
pub fn build_report(outcome: &ExecutionOutcome, config: &MeasureConfig) -> Report {
    let results: Vec<CandidateReport> = outcome
        .results
        .values()
        .map(CandidateReport::from)
        .collect();

    let complete = results
        .iter()
        .filter(|r| r.status == CandidateStatus::Complete)
        .count();

    let summary = ReportSummary {
        total_candidates: results.len(),
        complete,
        partial: results.len() - complete,
        truncated: outcome.truncated,
        total_duration_ms: outcome.total_duration_ms,
    };

    Report {
        meta: ReportMeta::now(env!("CARGO_PKG_VERSION"), ReportConfig::from(config)),
        results,
        summary,
    }
}
