//! The "perform at least N i/s" threshold matcher.

use crate::error::Error;
use crate::matcher::BlockMatcher;
use crate::report::{MatchReport, ReportDetail};
use crate::sampler::{IterationSampler, RawSample, Sampler};
use crate::statistics::conservative_estimate;

/// Matcher asserting that a workload sustains at least a target
/// throughput.
///
/// The decision is non-strict and made against the conservative estimate,
/// not the raw mean: the matcher passes iff
/// `target <= mean + 3 * stddev`. Exactly at equality it passes.
///
/// # Example
///
/// ```no_run
/// use vivace::{perform_at_least, BlockMatcher};
///
/// let mut matcher = perform_at_least(10_000.0).ips();
/// assert!(matcher.matches(&mut || {
///     std::hint::black_box("abc".parse::<i32>().is_err());
/// }));
/// ```
#[derive(Debug, Clone)]
pub struct PerformAtLeast<S = IterationSampler> {
    target_ips: f64,
    sampler: S,
    measured: Option<Measured>,
}

#[derive(Debug, Clone, Copy)]
struct Measured {
    sample: RawSample,
    passed: bool,
}

/// Build a threshold matcher with the default wall-clock sampler.
///
/// # Panics
///
/// Panics if `target_ips` is not strictly positive and finite.
pub fn perform_at_least(target_ips: f64) -> PerformAtLeast {
    PerformAtLeast::new(target_ips)
}

impl PerformAtLeast {
    /// Create a matcher using the default [`IterationSampler`].
    ///
    /// # Panics
    ///
    /// Panics if `target_ips` is not strictly positive and finite.
    pub fn new(target_ips: f64) -> Self {
        Self::with_sampler(target_ips, IterationSampler::new())
    }
}

impl<S: Sampler> PerformAtLeast<S> {
    /// Create a matcher with an injected sampler.
    ///
    /// Tests substitute a deterministic fake here to avoid
    /// timing-sensitive flakiness.
    ///
    /// # Panics
    ///
    /// Panics if `target_ips` is not strictly positive and finite.
    pub fn with_sampler(target_ips: f64, sampler: S) -> Self {
        assert!(
            target_ips.is_finite() && target_ips > 0.0,
            "target iterations per second must be > 0, got {}",
            target_ips
        );
        Self {
            target_ips,
            sampler,
            measured: None,
        }
    }

    /// Readability no-op: `perform_at_least(10_000.0).ips()`.
    pub fn ips(self) -> Self {
        self
    }

    /// The configured target, in iterations per second.
    pub fn target_ips(&self) -> f64 {
        self.target_ips
    }

    /// The raw sample recorded by the last evaluation.
    pub fn sample(&self) -> Result<RawSample, Error> {
        self.measured.map(|m| m.sample).ok_or(Error::NotMeasured)
    }

    /// Measured throughput rendered for failure messages:
    /// `"<mean> (± <pct>%) i/s"`, both numbers truncated to integers.
    ///
    /// The variability percentage is `stddev / mean * 100`, clamped to 0
    /// when the mean is 0 (a workload sampled as never completing).
    pub fn actual(&self) -> Result<String, Error> {
        let sample = self.sample()?;
        Ok(format!(
            "{} (± {}%) i/s",
            sample.mean as u64,
            sample.variability_pct() as u64
        ))
    }

    /// Serializable record of the last evaluation.
    pub fn report(&self) -> Result<MatchReport, Error> {
        let m = self.measured.ok_or(Error::NotMeasured)?;
        Ok(MatchReport {
            description: BlockMatcher::description(self),
            passed: m.passed,
            detail: ReportDetail::Threshold {
                target_ips: self.target_ips,
                mean_ips: m.sample.mean,
                stddev_ips: m.sample.stddev,
                estimate_ips: conservative_estimate(&m.sample),
            },
        })
    }
}

impl<S: Sampler> BlockMatcher for PerformAtLeast<S> {
    fn matches(&mut self, workload: &mut dyn FnMut()) -> bool {
        let sample = self.sampler.run(workload);
        let passed = self.target_ips <= conservative_estimate(&sample);
        self.measured = Some(Measured { sample, passed });
        passed
    }

    fn description(&self) -> String {
        format!("perform at least {} i/s", self.target_ips)
    }

    fn failure_message(&self) -> Result<String, Error> {
        Ok(format!(
            "expected block to {}, but performed only {}",
            self.description(),
            self.actual()?
        ))
    }

    fn failure_message_when_negated(&self) -> Result<String, Error> {
        Ok(format!(
            "expected block not to {}, but performed {}",
            self.description(),
            self.actual()?
        ))
    }
}
