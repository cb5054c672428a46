//! Test assertion helpers
//!
//! Utilities for floating-point comparisons of improvement percentages and
//! multipliers.

/// Assert that two floating-point values are approximately equal
///
/// Use this instead of `assert_eq!` for f64 comparisons to avoid
/// floating-point precision issues.
#[allow(dead_code)]
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff < epsilon,
        "Float values not approximately equal:\n  actual: {}\n  expected: {}\n  diff: {} (epsilon: {})",
        actual, expected, diff, epsilon
    );
}

/// Assert that a percentage value is within tolerance
#[allow(dead_code)]
pub fn assert_percent_within(actual_percent: f64, expected_percent: f64, tolerance_percent: f64) {
    assert_approx_eq(actual_percent, expected_percent, tolerance_percent);
}
