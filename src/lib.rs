//! # vivace
//!
//! Throughput assertion matchers for Rust test suites.
//!
//! This crate lets a test assert performance expectations about a unit of
//! work: "this block executes at least N times per second", or "this block
//! is faster/slower than a reference block, optionally by a given factor".
//! A sampler runs the workload for a fixed wall-clock window, partitioned
//! into sub-windows, and reports the iterations-per-second rate as a mean
//! and standard deviation. All decisions are made against the conservative
//! estimate `mean + 3σ`, so noisy environments bias toward failing a "fast
//! enough" assertion rather than passing it spuriously.
//!
//! ## Quick Start
//!
//! ```ignore
//! use vivace::{assert_performs_at_least, assert_performs_faster_than};
//!
//! #[test]
//! fn parse_is_fast_enough() {
//!     assert_performs_at_least!(100_000.0, || {
//!         std::hint::black_box("12345".parse::<u64>().unwrap());
//!     });
//! }
//!
//! #[test]
//! fn lookup_beats_scan() {
//!     assert_performs_faster_than!(
//!         || std::hint::black_box(map.get(&key)),
//!         || std::hint::black_box(vec.iter().find(|k| **k == key)),
//!     );
//! }
//! ```
//!
//! ## Matcher API
//!
//! The macros wrap the matcher types, which integrate with any assertion
//! framework that understands deferred (block-style) subjects:
//!
//! ```ignore
//! use vivace::{perform_faster_than, BlockMatcher};
//!
//! let mut matcher = perform_faster_than(|| baseline()).within(2.0).times();
//! if !matcher.matches(&mut || candidate()) {
//!     panic!("{}", matcher.failure_message().unwrap());
//! }
//! ```
//!
//! Matchers take their sampler as an injected dependency, so tests of
//! assertion plumbing can substitute a deterministic fake instead of
//! depending on wall-clock timing. Evaluation is single-shot and blocking:
//! one `matches` call per assertion, reference sampled before candidate,
//! no concurrency, no cancellation.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;
mod matcher;
mod report;
mod sampler;
mod statistics;

pub use config::SamplerConfig;
pub use error::Error;
pub use matcher::{
    perform_at_least, perform_faster_than, perform_slower_than, BlockMatcher, Direction,
    PerformAtLeast, PerformComparison,
};
pub use report::{to_json, to_json_pretty, MatchReport, ReportDetail};
pub use sampler::{IterationSampler, RawSample, Sampler};
pub use statistics::{conservative_estimate, OnlineStats, SIGMA_BOUND};

// ============================================================================
// Assertion Macros
// ============================================================================

/// Assert that a block performs at least `target` iterations per second.
///
/// Panics with the matcher's failure message when the conservative
/// throughput estimate falls short of the target.
///
/// The two-argument form samples with the default configuration (1 s
/// window, 100 ms warmup); pass a [`SamplerConfig`] as a third argument
/// to trade statistical stability for suite speed.
///
/// # Example
/// ```ignore
/// use std::time::Duration;
/// use vivace::{assert_performs_at_least, SamplerConfig};
///
/// #[test]
/// fn hashing_throughput() {
///     assert_performs_at_least!(50_000.0, || {
///         std::hint::black_box(my_hash(b"input"));
///     });
/// }
///
/// #[test]
/// fn hashing_throughput_short_window() {
///     let config = SamplerConfig {
///         window: Duration::from_millis(100),
///         ..SamplerConfig::default()
///     };
///     assert_performs_at_least!(50_000.0, || my_hash(b"input"), config);
/// }
/// ```
#[macro_export]
macro_rules! assert_performs_at_least {
    ($target:expr, $block:expr $(,)?) => {
        $crate::assert_performs_at_least!($target, $block, $crate::SamplerConfig::default())
    };
    ($target:expr, $block:expr, $config:expr $(,)?) => {{
        let mut __matcher = $crate::PerformAtLeast::with_sampler(
            $target,
            $crate::IterationSampler::with_config($config),
        )
        .ips();
        let mut __block = $block;
        if !$crate::BlockMatcher::matches(&mut __matcher, &mut __block) {
            panic!(
                "{}",
                $crate::BlockMatcher::failure_message(&__matcher)
                    .unwrap_or_else(|e| e.to_string())
            );
        }
    }};
}

/// Assert that a candidate block performs faster than a reference block,
/// optionally by a factor.
///
/// `assert_performs_faster_than!(candidate, reference)` asserts a strict
/// throughput win; the three-argument form scales the bar:
/// `assert_performs_faster_than!(candidate, reference, 3.0)` requires the
/// candidate to be at least 3x faster. A [`SamplerConfig`] as a fourth
/// argument replaces the default 1 s sampling window for both workloads.
#[macro_export]
macro_rules! assert_performs_faster_than {
    ($candidate:expr, $reference:expr $(,)?) => {
        $crate::assert_performs_faster_than!($candidate, $reference, 1.0)
    };
    ($candidate:expr, $reference:expr, $amount:expr $(,)?) => {
        $crate::assert_performs_faster_than!(
            $candidate,
            $reference,
            $amount,
            $crate::SamplerConfig::default()
        )
    };
    ($candidate:expr, $reference:expr, $amount:expr, $config:expr $(,)?) => {{
        let mut __matcher = $crate::PerformComparison::with_sampler(
            $reference,
            $crate::Direction::Faster,
            $crate::IterationSampler::with_config($config),
        )
        .within($amount)
        .times();
        let mut __candidate = $candidate;
        if !$crate::BlockMatcher::matches(&mut __matcher, &mut __candidate) {
            panic!(
                "{}",
                $crate::BlockMatcher::failure_message(&__matcher)
                    .unwrap_or_else(|e| e.to_string())
            );
        }
    }};
}

/// Assert that a candidate block performs slower than a reference block,
/// optionally by a factor.
///
/// Mirror image of [`assert_performs_faster_than`]: the three-argument
/// form `assert_performs_slower_than!(candidate, reference, 3.0)` divides
/// the candidate's estimate by 3 before the comparison, loosening the bar
/// the same way the faster form tightens it. A [`SamplerConfig`] as a
/// fourth argument replaces the default sampling window.
#[macro_export]
macro_rules! assert_performs_slower_than {
    ($candidate:expr, $reference:expr $(,)?) => {
        $crate::assert_performs_slower_than!($candidate, $reference, 1.0)
    };
    ($candidate:expr, $reference:expr, $amount:expr $(,)?) => {
        $crate::assert_performs_slower_than!(
            $candidate,
            $reference,
            $amount,
            $crate::SamplerConfig::default()
        )
    };
    ($candidate:expr, $reference:expr, $amount:expr, $config:expr $(,)?) => {{
        let mut __matcher = $crate::PerformComparison::with_sampler(
            $reference,
            $crate::Direction::Slower,
            $crate::IterationSampler::with_config($config),
        )
        .within($amount)
        .times();
        let mut __candidate = $candidate;
        if !$crate::BlockMatcher::matches(&mut __matcher, &mut __candidate) {
            panic!(
                "{}",
                $crate::BlockMatcher::failure_message(&__matcher)
                    .unwrap_or_else(|e| e.to_string())
            );
        }
    }};
}
