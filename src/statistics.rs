//! Throughput statistics.
//!
//! This module provides:
//! - Online mean/variance computation using Welford's algorithm, used by the
//!   iteration sampler to aggregate per-sub-window throughput rates
//! - The conservative single-number throughput estimate both matchers
//!   decide against

use crate::sampler::RawSample;

/// Number of standard deviations added to the mean when deriving the
/// conservative throughput estimate.
///
/// Under roughly normal sampling noise, `mean + 3σ` is a ~99.7th-percentile
/// bound on how slow the true rate could be read from noisy data.
pub const SIGMA_BOUND: f64 = 3.0;

/// Derive the conservative throughput estimate for a sample.
///
/// Defined as `mean + SIGMA_BOUND * stddev`. This deliberately pessimistic
/// bound treats the workload as if it always performs at its statistically
/// worst observed edge, so noisy environments bias toward *failing* a
/// "fast enough" assertion rather than passing it spuriously.
///
/// Since `stddev >= 0`, the estimate is always `>= mean`.
///
/// # Example
///
/// ```
/// use vivace::{conservative_estimate, RawSample};
///
/// let sample = RawSample::new(480.0, 10.0);
/// assert_eq!(conservative_estimate(&sample), 510.0);
/// ```
pub fn conservative_estimate(sample: &RawSample) -> f64 {
    sample.mean + SIGMA_BOUND * sample.stddev
}

/// Online statistics accumulator using Welford's algorithm.
///
/// Tracks mean and variance incrementally with O(1) memory and O(1)
/// per-sample overhead. The iteration sampler feeds one throughput rate
/// per sub-window into this accumulator.
#[derive(Debug, Clone, Default)]
pub struct OnlineStats {
    /// Number of samples seen.
    count: usize,
    /// Running mean.
    mean: f64,
    /// Welford's M2: sum of squared deviations from the current mean.
    m2: f64,
}

impl OnlineStats {
    /// Create a new empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update statistics with a new sample.
    ///
    /// Uses Welford's online algorithm for numerically stable variance
    /// computation.
    pub fn update(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = x - self.mean;
        self.m2 += delta * delta2;
    }

    /// Number of samples seen so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Current running mean, or 0 if no samples were seen.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation (`m2 / (count - 1)`, square-rooted).
    ///
    /// Returns 0 for fewer than two samples.
    pub fn sample_stddev(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        (self.m2 / (self.count - 1) as f64).sqrt()
    }
}
