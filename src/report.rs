//! Serializable match reports.
//!
//! A [`MatchReport`] is a machine-readable record of one evaluated matcher:
//! the decision, the estimates it was made from, and the human-readable
//! description. Useful for shipping benchmark-assertion outcomes to CI
//! dashboards alongside the plain failure messages.

use serde::{Deserialize, Serialize};

use crate::matcher::Direction;

/// Record of one matcher evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    /// Human-readable description of the asserted expectation.
    pub description: String,
    /// Whether the assertion held.
    pub passed: bool,
    /// Matcher-specific measurement detail.
    #[serde(flatten)]
    pub detail: ReportDetail,
}

/// Measurement detail per matcher kind.
///
/// All throughput fields are in iterations per second; estimates are the
/// conservative `mean + 3σ` bound the decision was made against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportDetail {
    /// A "perform at least" threshold decision.
    Threshold {
        /// Configured target throughput.
        target_ips: f64,
        /// Measured mean rate.
        mean_ips: f64,
        /// Measured rate standard deviation.
        stddev_ips: f64,
        /// Conservative estimate the target was compared against.
        estimate_ips: f64,
    },
    /// A "perform faster/slower than" comparison decision.
    Comparison {
        /// Asserted direction.
        direction: Direction,
        /// Effective multiplier (1 when never set).
        amount: f64,
        /// Reference workload's conservative estimate.
        reference_ips: f64,
        /// Candidate workload's conservative estimate.
        candidate_ips: f64,
        /// Candidate/reference ratio, unscaled by the multiplier.
        ratio: f64,
    },
}

/// Serialize a report to a compact JSON string.
pub fn to_json(report: &MatchReport) -> Result<String, serde_json::Error> {
    serde_json::to_string(report)
}

/// Serialize a report to a pretty-printed JSON string.
pub fn to_json_pretty(report: &MatchReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
