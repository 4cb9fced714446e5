//! Growth-Rate Regression
//!
//! Fits an ordinary least-squares line through `ln(duration)` against the
//! position of each duration in the series. The position stands in for the
//! input size: sizes may be spaced irregularly, but they are always supplied
//! in ascending order, so the index grows monotonically with them.

use crate::{MAX_GROWTH_RATE, MIN_GROWTH_RATE};

/// Compute the growth rate (complexity score) of a duration series.
///
/// `durations` holds one average duration per input size, in the order the
/// sizes were measured. The returned slope is clamped to
/// [`MIN_GROWTH_RATE`]..=[`MAX_GROWTH_RATE`].
///
/// Returns `NaN` when fewer than two durations are supplied: a single point
/// has no slope.
///
/// # Examples
///
/// ```
/// # use growthbench_stats::growth_rate;
/// let flat = growth_rate(&[0.5, 0.5, 0.5, 0.5]);
/// assert_eq!(flat, 0.0);
///
/// let undefined = growth_rate(&[0.5]);
/// assert!(undefined.is_nan());
/// ```
pub fn growth_rate(durations: &[f64]) -> f64 {
    if durations.len() < 2 {
        return f64::NAN;
    }

    let n = durations.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;

    for (i, duration) in durations.iter().enumerate() {
        let x = i as f64;
        let y = duration.ln();
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x * sum_x);

    // NaN (non-positive durations) passes through clamp unchanged
    slope.clamp(MIN_GROWTH_RATE, MAX_GROWTH_RATE)
}
