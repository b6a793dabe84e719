//! Matcher surface: the block-matcher contract and comparison direction.

mod comparison;
mod threshold;

pub use comparison::{perform_faster_than, perform_slower_than, PerformComparison};
pub use threshold::{perform_at_least, PerformAtLeast};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Which way a comparison asserts the candidate deviates from the
/// reference block.
///
/// Immutable once a comparison matcher is constructed. The enum makes an
/// invalid direction unrepresentable; the [`FromStr`] impl covers textual
/// surfaces (config files, message round-trips) and rejects anything else
/// with [`Error::InvalidDirection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Candidate must sustain a strictly higher estimated throughput than
    /// the reference.
    Faster,
    /// Candidate must sustain a strictly lower estimated throughput than
    /// the reference.
    Slower,
}

impl Direction {
    /// Lowercase name as used in descriptions and failure messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Faster => "faster",
            Self::Slower => "slower",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "faster" => Ok(Self::Faster),
            "slower" => Ok(Self::Slower),
            other => Err(Error::InvalidDirection(other.to_string())),
        }
    }
}

/// Contract between a matcher and an assertion framework.
///
/// A matcher receives a *deferred* workload (a zero-argument closure), not
/// a pre-computed value: sampling has to happen inside the matcher, during
/// [`matches`]. Evaluation is an expensive, blocking, side-effecting step
/// meant to run exactly once per assertion; the message accessors are only
/// meaningful afterwards and return [`Error::NotMeasured`] before then.
///
/// [`matches`]: BlockMatcher::matches
pub trait BlockMatcher {
    /// Whether this matcher accepts a deferred workload as its match
    /// subject. Always true for the matchers in this crate.
    fn supports_block_expectations(&self) -> bool {
        true
    }

    /// Sample the workload(s), store the estimates, and return the
    /// pass/fail decision.
    ///
    /// Re-invoking re-samples and overwrites the stored estimates.
    fn matches(&mut self, workload: &mut dyn FnMut()) -> bool;

    /// Human-readable description of the asserted expectation.
    fn description(&self) -> String;

    /// Failure message for the positive assertion form.
    fn failure_message(&self) -> Result<String, Error>;

    /// Failure message for the negated assertion form.
    fn failure_message_when_negated(&self) -> Result<String, Error>;
}
