//! Configuration for the iteration sampler.

use std::time::Duration;

/// Configuration options for [`IterationSampler`].
///
/// Controls how long a workload is sampled and how the sampling window is
/// partitioned into sub-windows for variability estimation.
///
/// [`IterationSampler`]: crate::IterationSampler
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerConfig {
    /// Total wall-clock measurement window.
    ///
    /// The workload runs repeatedly for this duration (after warmup).
    /// Longer windows give more stable statistics at the cost of slower
    /// test suites. Default: 1 second.
    pub window: Duration,

    /// Number of equal sub-windows the measurement window is split into.
    ///
    /// Each sub-window contributes one throughput rate; the mean and
    /// standard deviation are computed across these rates. Must be > 0.
    /// Default: 10.
    pub subintervals: usize,

    /// Warmup duration before measurement begins.
    ///
    /// Warmup runs the workload without recording, to warm caches and
    /// stabilize CPU frequency scaling. Default: 100 ms.
    pub warmup: Duration,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(1),
            subintervals: 10,
            warmup: Duration::from_millis(100),
        }
    }
}
