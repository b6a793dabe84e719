//! The "perform faster/slower than" comparison matcher.

use crate::error::Error;
use crate::matcher::{BlockMatcher, Direction};
use crate::report::{MatchReport, ReportDetail};
use crate::sampler::{IterationSampler, Sampler};
use crate::statistics::conservative_estimate;

/// Matcher asserting that a candidate workload's estimated throughput is
/// strictly greater (faster) or strictly less (slower) than a reference
/// workload's, optionally scaled by a multiplier.
///
/// Evaluation samples the reference first, then the candidate, every time:
/// the ordering is deterministic even though each run is independently
/// noisy. With multiplier `amount`, the decision is
/// `candidate / amount > reference` for faster and
/// `candidate / amount < reference` for slower, both on conservative
/// estimates. The multiplier affects only the decision, never the
/// reported ratio.
///
/// # Example
///
/// ```no_run
/// use vivace::{perform_faster_than, BlockMatcher};
///
/// let mut matcher = perform_faster_than(|| {
///     std::hint::black_box((1..=100u64).sum::<u64>());
/// })
/// .within(2.0)
/// .times();
///
/// assert!(matcher.matches(&mut || {
///     std::hint::black_box(100u64 * 101 / 2);
/// }));
/// ```
#[derive(Debug, Clone)]
pub struct PerformComparison<R, S = IterationSampler>
where
    R: FnMut(),
{
    reference: R,
    direction: Direction,
    amount: Option<f64>,
    sampler: S,
    measured: Option<Measured>,
}

#[derive(Debug, Clone, Copy)]
struct Measured {
    reference_estimate: f64,
    candidate_estimate: f64,
    passed: bool,
}

/// Build a comparison matcher asserting the candidate is faster than
/// `reference`, with the default wall-clock sampler.
pub fn perform_faster_than<R: FnMut()>(reference: R) -> PerformComparison<R> {
    PerformComparison::new(reference, Direction::Faster)
}

/// Build a comparison matcher asserting the candidate is slower than
/// `reference`, with the default wall-clock sampler.
pub fn perform_slower_than<R: FnMut()>(reference: R) -> PerformComparison<R> {
    PerformComparison::new(reference, Direction::Slower)
}

impl<R: FnMut()> PerformComparison<R> {
    /// Create a matcher using the default [`IterationSampler`].
    pub fn new(reference: R, direction: Direction) -> Self {
        Self::with_sampler(reference, direction, IterationSampler::new())
    }
}

impl<R: FnMut(), S: Sampler> PerformComparison<R, S> {
    /// Create a matcher with an injected sampler.
    ///
    /// Tests substitute a deterministic fake here to avoid
    /// timing-sensitive flakiness.
    pub fn with_sampler(reference: R, direction: Direction, sampler: S) -> Self {
        Self {
            reference,
            direction,
            amount: None,
            sampler,
            measured: None,
        }
    }

    /// Set the comparison multiplier: "faster/slower in `amount` times".
    ///
    /// Defaults to 1 when never called. Must be set before evaluation to
    /// affect the decision.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is not strictly positive and finite.
    pub fn within(mut self, amount: f64) -> Self {
        assert!(
            amount.is_finite() && amount > 0.0,
            "comparison multiplier must be > 0, got {}",
            amount
        );
        self.amount = Some(amount);
        self
    }

    /// Readability no-op: `perform_faster_than(reference).within(3.0).times()`.
    pub fn times(self) -> Self {
        self
    }

    /// The configured direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The effective multiplier (1 when never set).
    pub fn amount(&self) -> f64 {
        self.amount.unwrap_or(1.0)
    }

    /// Ratio of candidate to reference estimate from the last evaluation.
    ///
    /// Never scaled by the multiplier. When both estimates are 0 the
    /// ratio is NaN; the failure reason then falls through to the
    /// "performed by the same time" branch, since no ordering between the
    /// two degenerate measurements can be claimed.
    pub fn ratio(&self) -> Result<f64, Error> {
        let m = self.measured.ok_or(Error::NotMeasured)?;
        Ok(m.candidate_estimate / m.reference_estimate)
    }

    /// Human-readable explanation of how the candidate actually performed
    /// relative to the reference.
    pub fn failure_reason(&self) -> Result<String, Error> {
        let actual = self.ratio()?;
        Ok(if actual < 1.0 {
            format!("performed slower in {:.2} times", actual.recip())
        } else if actual > 1.0 {
            format!("performed faster in {:.2} times", actual)
        } else {
            "performed by the same time".to_string()
        })
    }

    /// Serializable record of the last evaluation.
    pub fn report(&self) -> Result<MatchReport, Error> {
        let m = self.measured.ok_or(Error::NotMeasured)?;
        Ok(MatchReport {
            description: BlockMatcher::description(self),
            passed: m.passed,
            detail: ReportDetail::Comparison {
                direction: self.direction,
                amount: self.amount(),
                reference_ips: m.reference_estimate,
                candidate_ips: m.candidate_estimate,
                ratio: m.candidate_estimate / m.reference_estimate,
            },
        })
    }
}

impl<R: FnMut(), S: Sampler> BlockMatcher for PerformComparison<R, S> {
    fn matches(&mut self, workload: &mut dyn FnMut()) -> bool {
        let amount = self.amount.unwrap_or(1.0);

        // Reference before candidate, every evaluation.
        let reference_estimate = conservative_estimate(&self.sampler.run(&mut self.reference));
        let candidate_estimate = conservative_estimate(&self.sampler.run(workload));

        let passed = match self.direction {
            Direction::Faster => candidate_estimate / amount > reference_estimate,
            Direction::Slower => candidate_estimate / amount < reference_estimate,
        };
        self.measured = Some(Measured {
            reference_estimate,
            candidate_estimate,
            passed,
        });
        passed
    }

    fn description(&self) -> String {
        let amount = self.amount();
        if amount == 1.0 {
            format!("perform {} than passed block", self.direction)
        } else {
            format!("perform {} than passed block in {} times", self.direction, amount)
        }
    }

    fn failure_message(&self) -> Result<String, Error> {
        Ok(format!(
            "expected block to {}, but {}",
            self.description(),
            self.failure_reason()?
        ))
    }

    fn failure_message_when_negated(&self) -> Result<String, Error> {
        Ok(format!(
            "expected block not to {}, but {}",
            self.description(),
            self.failure_reason()?
        ))
    }
}
