//! Workload sampling.
//!
//! A sampler runs a zero-argument workload repeatedly for a fixed wall-clock
//! window and reports the iterations-per-second rate as a mean and standard
//! deviation across sub-windows. Matchers consume samplers through the
//! [`Sampler`] trait, so tests can substitute a deterministic fake without
//! timing-sensitive flakiness.

use std::time::Instant;

use crate::config::SamplerConfig;
use crate::statistics::OnlineStats;

/// One sampler run for one workload: throughput statistics in
/// iterations per second.
///
/// Transient measurement output; matchers keep a copy only for message
/// rendering after evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    /// Mean iterations per second across sub-windows.
    pub mean: f64,
    /// Standard deviation of the per-sub-window rates.
    pub stddev: f64,
}

impl RawSample {
    /// Create a new sample.
    ///
    /// # Panics
    ///
    /// Panics if `mean` or `stddev` is negative or non-finite.
    pub fn new(mean: f64, stddev: f64) -> Self {
        assert!(
            mean.is_finite() && mean >= 0.0,
            "sample mean must be finite and non-negative, got {}",
            mean
        );
        assert!(
            stddev.is_finite() && stddev >= 0.0,
            "sample stddev must be finite and non-negative, got {}",
            stddev
        );
        Self { mean, stddev }
    }

    /// Relative variability as a percentage: `stddev / mean * 100`.
    ///
    /// A workload that never completed within the window has `mean == 0`;
    /// the percentage is clamped to 0 in that case rather than propagating
    /// a division by zero.
    pub fn variability_pct(&self) -> f64 {
        if self.mean == 0.0 {
            return 0.0;
        }
        self.stddev / self.mean * 100.0
    }
}

/// A throughput sampler: runs a workload for a fixed window and reports
/// its rate statistics.
///
/// Matchers take a sampler at construction and invoke it once per workload
/// during evaluation. The window length and partitioning are the sampler's
/// own concern; the only contract is that both stay fixed across calls.
pub trait Sampler {
    /// Run `workload` repeatedly for the sampling window and return its
    /// iterations-per-second statistics.
    ///
    /// Blocks for the entirety of the window. A workload that never
    /// returns will hang the measurement; no cancellation path exists.
    fn run(&mut self, workload: &mut dyn FnMut()) -> RawSample;
}

/// Wall-clock iteration sampler.
///
/// Splits the measurement window into equal sub-windows. In each
/// sub-window the workload runs to completion back-to-back until the
/// sub-window elapses; the completion count divided by the actual elapsed
/// time gives one rate. The mean and sample standard deviation across
/// sub-window rates form the [`RawSample`].
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use vivace::{IterationSampler, Sampler};
///
/// let mut sampler = IterationSampler::new()
///     .window(Duration::from_millis(200))
///     .subintervals(4);
/// let sample = sampler.run(&mut || {
///     std::hint::black_box(fibonacci(15));
/// });
/// println!("{:.0} i/s (stddev {:.0})", sample.mean, sample.stddev);
/// # fn fibonacci(n: u64) -> u64 { n }
/// ```
#[derive(Debug, Clone, Default)]
pub struct IterationSampler {
    config: SamplerConfig,
}

impl IterationSampler {
    /// Create a sampler with the default configuration
    /// (1 s window, 10 sub-windows, 100 ms warmup).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sampler from an explicit configuration.
    ///
    /// # Panics
    ///
    /// Panics if the window is zero or `subintervals` is 0.
    pub fn with_config(config: SamplerConfig) -> Self {
        assert!(
            !config.window.is_zero(),
            "sampling window must be non-zero"
        );
        assert!(config.subintervals > 0, "subintervals must be > 0");
        Self { config }
    }

    /// Set the total measurement window.
    pub fn window(mut self, window: std::time::Duration) -> Self {
        assert!(!window.is_zero(), "sampling window must be non-zero");
        self.config.window = window;
        self
    }

    /// Set the number of sub-windows.
    pub fn subintervals(mut self, n: usize) -> Self {
        assert!(n > 0, "subintervals must be > 0");
        self.config.subintervals = n;
        self
    }

    /// Set the warmup duration. Zero disables warmup.
    pub fn warmup(mut self, warmup: std::time::Duration) -> Self {
        self.config.warmup = warmup;
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }
}

impl Sampler for IterationSampler {
    fn run(&mut self, workload: &mut dyn FnMut()) -> RawSample {
        // Warmup: run without recording to warm caches and stabilize
        // frequency scaling.
        if !self.config.warmup.is_zero() {
            let warmup_deadline = Instant::now() + self.config.warmup;
            while Instant::now() < warmup_deadline {
                workload();
            }
        }

        let subwindow = self.config.window / self.config.subintervals as u32;
        let mut stats = OnlineStats::new();

        for _ in 0..self.config.subintervals {
            let start = Instant::now();
            let deadline = start + subwindow;
            let mut completions: u64 = 0;
            // The workload always runs at least once per sub-window, so a
            // returning workload can never yield a zero rate. The deadline
            // check happens after each completion; the final iteration may
            // overshoot, which the elapsed-time division accounts for.
            loop {
                workload();
                completions += 1;
                if Instant::now() >= deadline {
                    break;
                }
            }
            let elapsed = start.elapsed().as_secs_f64();
            stats.update(completions as f64 / elapsed);
        }

        RawSample::new(stats.mean(), stats.sample_stddev())
    }
}
