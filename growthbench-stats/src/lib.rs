#![warn(missing_docs)]
//! GrowthBench Statistical Engine
//!
//! Turns a series of per-size average durations into a complexity estimate:
//! - Growth-rate regression of `ln(duration)` against size index
//! - Classification of the resulting score into overlapping Big-O domains

mod domain;
mod growth;

pub use domain::{
    ComplexityDomain, DOMAIN_TABLE, DomainRange, PerformanceRating, estimate_domains,
};
pub use growth::growth_rate;

/// Lowest score a growth rate can take
pub const MIN_GROWTH_RATE: f64 = 0.0;

/// Highest score a growth rate can take
pub const MAX_GROWTH_RATE: f64 = 1.0;
