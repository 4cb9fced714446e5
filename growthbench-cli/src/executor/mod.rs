//! Measurement Executor
//!
//! Runs catalog candidates and turns the results into output.
//!
//! ## Pipeline Overview
//!
//! ```text
//! CatalogEntry (filtered by regex)
//!       │
//!       ▼
//! ┌─────────────┐
//! │  execution  │  Group by size series, stream snapshots, progress bar
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   report    │  Build Report with summary counts
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Human-readable output
//! └─────────────┘
//! ```

mod execution;
mod formatting;
mod report;

// Re-export public API
pub use execution::{ExecutionOutcome, Executor, RunGroup, plan_runs};
pub use formatting::{format_human_output, format_ms};
pub use report::build_report;
