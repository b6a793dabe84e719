//! Tests for the "perform faster/slower than" comparison matcher.

use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use vivace::{
    perform_faster_than, perform_slower_than, BlockMatcher, Direction, Error, PerformComparison,
};

use crate::fake::FakeSampler;

/// Matcher with queued (reference, candidate) samples and a no-op
/// reference workload.
fn matcher_with(
    direction: Direction,
    reference: (f64, f64),
    candidate: (f64, f64),
) -> PerformComparison<fn(), FakeSampler> {
    PerformComparison::with_sampler(
        || {},
        direction,
        FakeSampler::new(&[reference, candidate]),
    )
}

// ============================================================================
// Decision rule and sampling order
// ============================================================================

#[test]
fn scenario_a_faster_candidate_passes() {
    // reference estimate 100, candidate estimate 250, direction faster
    let mut matcher = matcher_with(Direction::Faster, (100.0, 0.0), (250.0, 0.0));
    assert!(matcher.matches(&mut || {}));
    assert!((matcher.ratio().unwrap() - 2.5).abs() < 1e-12);
    assert_eq!(
        matcher.failure_message_when_negated().unwrap(),
        "expected block not to perform faster than passed block, but performed faster in 2.50 times"
    );
}

#[test]
fn scenario_b_multiplier_raises_the_bar() {
    // 250 / 3 = 83.3 is no longer above 100
    let mut matcher =
        matcher_with(Direction::Faster, (100.0, 0.0), (250.0, 0.0)).within(3.0).times();
    assert!(!matcher.matches(&mut || {}));
    assert_eq!(
        matcher.description(),
        "perform faster than passed block in 3 times"
    );
}

#[test]
fn slower_direction_passes_when_candidate_lags() {
    let mut matcher = matcher_with(Direction::Slower, (250.0, 0.0), (100.0, 0.0));
    assert!(matcher.matches(&mut || {}));
}

#[test]
fn estimates_not_raw_means_drive_the_decision() {
    // reference estimate 100 + 3*20 = 160 beats candidate mean 150 with no spread
    let mut matcher = matcher_with(Direction::Faster, (100.0, 20.0), (150.0, 0.0));
    assert!(!matcher.matches(&mut || {}));
}

#[test]
fn equal_estimates_fail_both_directions() {
    let mut faster = matcher_with(Direction::Faster, (100.0, 0.0), (100.0, 0.0));
    assert!(!faster.matches(&mut || {}));
    let mut slower = matcher_with(Direction::Slower, (100.0, 0.0), (100.0, 0.0));
    assert!(!slower.matches(&mut || {}));
}

#[test]
fn swapping_workloads_and_direction_agrees() {
    // (ref 100, cand 250, faster) and (ref 250, cand 100, slower) decide alike
    let mut forward = matcher_with(Direction::Faster, (100.0, 0.0), (250.0, 0.0));
    let mut mirrored = matcher_with(Direction::Slower, (250.0, 0.0), (100.0, 0.0));
    assert_eq!(forward.matches(&mut || {}), mirrored.matches(&mut || {}));

    let mut forward_fail = matcher_with(Direction::Faster, (250.0, 0.0), (100.0, 0.0));
    let mut mirrored_fail = matcher_with(Direction::Slower, (100.0, 0.0), (250.0, 0.0));
    assert_eq!(
        forward_fail.matches(&mut || {}),
        mirrored_fail.matches(&mut || {})
    );
}

#[test]
fn reference_is_sampled_before_candidate() {
    let order = Rc::new(RefCell::new(Vec::new()));
    let reference_order = Rc::clone(&order);
    let mut matcher = PerformComparison::with_sampler(
        move || reference_order.borrow_mut().push("reference"),
        Direction::Faster,
        FakeSampler::new(&[(100.0, 0.0), (250.0, 0.0)]),
    );
    let candidate_order = Rc::clone(&order);
    matcher.matches(&mut || candidate_order.borrow_mut().push("candidate"));
    assert_eq!(*order.borrow(), ["reference", "candidate"]);
}

// ============================================================================
// Multiplier semantics
// ============================================================================

#[test]
fn larger_amount_makes_faster_strictly_harder() {
    // fixed estimates ref 100 / cand 250
    for (amount, expected) in [(1.0, true), (2.4, true), (2.5, false), (3.0, false)] {
        let mut matcher =
            matcher_with(Direction::Faster, (100.0, 0.0), (250.0, 0.0)).within(amount);
        assert_eq!(matcher.matches(&mut || {}), expected, "amount {}", amount);
    }
}

#[test]
fn larger_amount_makes_slower_strictly_easier() {
    // fixed estimates ref 100 / cand 250: slower fails outright, passes once
    // the candidate estimate is divided far enough down
    for (amount, expected) in [(1.0, false), (2.5, false), (3.0, true)] {
        let mut matcher =
            matcher_with(Direction::Slower, (100.0, 0.0), (250.0, 0.0)).within(amount);
        assert_eq!(matcher.matches(&mut || {}), expected, "amount {}", amount);
    }
}

#[test]
fn amount_defaults_to_one() {
    let matcher = matcher_with(Direction::Faster, (100.0, 0.0), (250.0, 0.0));
    assert_eq!(matcher.amount(), 1.0);
    assert_eq!(matcher.description(), "perform faster than passed block");
}

#[test]
fn times_is_a_pure_chaining_no_op() {
    let matcher = matcher_with(Direction::Slower, (100.0, 0.0), (250.0, 0.0))
        .within(2.0)
        .times();
    assert_eq!(matcher.amount(), 2.0);
    assert_eq!(
        matcher.description(),
        "perform slower than passed block in 2 times"
    );
}

#[test]
fn ratio_ignores_the_amount() {
    let mut matcher =
        matcher_with(Direction::Faster, (100.0, 0.0), (250.0, 0.0)).within(3.0);
    matcher.matches(&mut || {});
    assert!((matcher.ratio().unwrap() - 2.5).abs() < 1e-12);
    // failure reason reports the unscaled ratio too
    assert_eq!(
        matcher.failure_reason().unwrap(),
        "performed faster in 2.50 times"
    );
}

#[test]
#[should_panic(expected = "comparison multiplier must be > 0")]
fn zero_amount_panics() {
    let _ = perform_faster_than(|| {}).within(0.0);
}

#[test]
#[should_panic(expected = "comparison multiplier must be > 0")]
fn negative_amount_panics() {
    let _ = perform_slower_than(|| {}).within(-1.0);
}

// ============================================================================
// Failure reasons and messages
// ============================================================================

#[test]
fn failure_reason_tri_state() {
    // ratio 0.5 -> slower in 2.00, ratio 1.0 -> same time, ratio 2.0 -> faster in 2.00
    let cases = [
        ((100.0, 0.0), (50.0, 0.0), "performed slower in 2.00 times"),
        ((100.0, 0.0), (100.0, 0.0), "performed by the same time"),
        ((100.0, 0.0), (200.0, 0.0), "performed faster in 2.00 times"),
    ];
    for (reference, candidate, expected) in cases {
        let mut matcher = matcher_with(Direction::Faster, reference, candidate);
        matcher.matches(&mut || {});
        assert_eq!(matcher.failure_reason().unwrap(), expected);
    }
}

#[test]
fn failure_message_positive_form() {
    let mut matcher = matcher_with(Direction::Faster, (250.0, 0.0), (100.0, 0.0));
    assert!(!matcher.matches(&mut || {}));
    assert_eq!(
        matcher.failure_message().unwrap(),
        "expected block to perform faster than passed block, but performed slower in 2.50 times"
    );
}

#[test]
fn failure_message_carries_the_multiplier_description() {
    let mut matcher =
        matcher_with(Direction::Faster, (100.0, 0.0), (250.0, 0.0)).within(3.0).times();
    assert!(!matcher.matches(&mut || {}));
    assert_eq!(
        matcher.failure_message().unwrap(),
        "expected block to perform faster than passed block in 3 times, but performed faster in 2.50 times"
    );
}

#[test]
fn degenerate_zero_estimates_read_as_same_time() {
    // 0 / 0 yields NaN; no ordering can be claimed between two workloads
    // that never completed, so the reason falls through to "same time"
    let mut matcher = matcher_with(Direction::Faster, (0.0, 0.0), (0.0, 0.0));
    assert!(!matcher.matches(&mut || {}));
    assert_eq!(
        matcher.failure_reason().unwrap(),
        "performed by the same time"
    );
}

// ============================================================================
// Direction parsing and accessors before evaluation
// ============================================================================

#[test]
fn direction_parses_canonical_names() {
    assert_eq!(Direction::from_str("faster").unwrap(), Direction::Faster);
    assert_eq!(Direction::from_str("slower").unwrap(), Direction::Slower);
}

#[test]
fn direction_rejects_anything_else() {
    let err = Direction::from_str("sideways").unwrap_err();
    assert_eq!(err, Error::InvalidDirection("sideways".to_string()));
    assert_eq!(
        err.to_string(),
        "comparison direction must be \"faster\" or \"slower\", not \"sideways\""
    );
}

#[test]
fn accessors_before_evaluation_error() {
    let matcher = matcher_with(Direction::Faster, (100.0, 0.0), (250.0, 0.0));
    assert_eq!(matcher.ratio().unwrap_err(), Error::NotMeasured);
    assert_eq!(matcher.failure_reason().unwrap_err(), Error::NotMeasured);
    assert_eq!(matcher.failure_message().unwrap_err(), Error::NotMeasured);
    assert_eq!(
        matcher.failure_message_when_negated().unwrap_err(),
        Error::NotMeasured
    );
}

#[test]
fn supports_block_expectations() {
    let matcher = matcher_with(Direction::Slower, (1.0, 0.0), (1.0, 0.0));
    assert!(matcher.supports_block_expectations());
}
