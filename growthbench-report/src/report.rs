//! Report Data Structures

use chrono::{DateTime, Utc};
use growthbench_core::{Concurrency, MeasureConfig, PerCandidateResult, SizeAverage};
use growthbench_stats::{ComplexityDomain, PerformanceRating};
use serde::{Deserialize, Serialize};

/// Current report schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Complete measurement report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub results: Vec<CandidateReport>,
    pub summary: ReportSummary,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub schema_version: u32,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub config: ReportConfig,
}

impl ReportMeta {
    /// Metadata stamped with the current UTC time
    pub fn now(version: impl Into<String>, config: ReportConfig) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            version: version.into(),
            timestamp: Utc::now(),
            config,
        }
    }
}

/// Measurement configuration captured in report metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub sizes: Vec<usize>,
    pub iterations: usize,
    pub warmup_discard: bool,
    pub time_budget_ms: u64,
    /// `"auto"` or the fixed chunk size
    pub chunk_size: String,
}

impl From<&MeasureConfig> for ReportConfig {
    fn from(config: &MeasureConfig) -> Self {
        Self {
            sizes: config.sizes.clone(),
            iterations: config.iterations,
            warmup_discard: config.warmup_discard,
            time_budget_ms: config.time_budget.as_millis() as u64,
            chunk_size: match config.concurrency {
                Concurrency::Auto => "auto".to_string(),
                Concurrency::Fixed(n) => n.to_string(),
            },
        }
    }
}

/// Candidate completion status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    /// Every size measured and classified
    Complete,
    /// Interrupted by the time budget
    Partial,
}

impl CandidateStatus {
    /// The serialized spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStatus::Complete => "complete",
            CandidateStatus::Partial => "partial",
        }
    }
}

impl std::fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complexity domain as reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainReport {
    pub notation: String,
    pub description: String,
    pub rating: PerformanceRating,
}

impl From<&ComplexityDomain> for DomainReport {
    fn from(domain: &ComplexityDomain) -> Self {
        Self {
            notation: domain.scientific_notation.to_string(),
            description: domain.description.to_string(),
            rating: domain.rating,
        }
    }
}

/// Per-size average as reported
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AverageReport {
    pub size: usize,
    pub average_ms: f64,
}

impl From<&SizeAverage> for AverageReport {
    fn from(average: &SizeAverage) -> Self {
        Self {
            size: average.size,
            average_ms: average.average_ms,
        }
    }
}

/// Individual candidate result in the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateReport {
    pub name: String,
    pub status: CandidateStatus,
    pub duration_ms: f64,
    /// `None` when the growth rate is undefined (fewer than two sizes)
    pub complexity: Option<f64>,
    pub domains: Vec<DomainReport>,
    pub averages: Vec<AverageReport>,
}

impl CandidateReport {
    /// Most severe matching domain, if any
    pub fn primary_domain(&self) -> Option<&DomainReport> {
        self.domains.first()
    }
}

impl From<&PerCandidateResult> for CandidateReport {
    fn from(result: &PerCandidateResult) -> Self {
        let status = if result.finalized {
            CandidateStatus::Complete
        } else {
            CandidateStatus::Partial
        };
        let complexity = if result.finalized && result.complexity.is_finite() {
            Some(result.complexity)
        } else {
            None
        };

        Self {
            name: result.name.clone(),
            status,
            duration_ms: result.duration,
            complexity,
            domains: result.estimated_domains.iter().map(DomainReport::from).collect(),
            averages: result.averages.iter().map(AverageReport::from).collect(),
        }
    }
}

/// Report summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_candidates: usize,
    pub complete: usize,
    pub partial: usize,
    /// The time budget ran out before the run finished
    pub truncated: bool,
    pub total_duration_ms: f64,
}
