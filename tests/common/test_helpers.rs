//! Helper functions for integration tests

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

/// Assert that every value is larger than the previous one
pub fn assert_strictly_increasing(values: &[f64], message: &str) {
    for (i, pair) in values.windows(2).enumerate() {
        assert!(
            pair[0] < pair[1],
            "{}: element {} ({}) is not below element {} ({})",
            message, i, pair[0], i + 1, pair[1]
        );
    }
}

/// Assert that no value falls more than `slack` below the previous one
pub fn assert_non_decreasing(values: &[f64], slack: f64, message: &str) {
    for (i, pair) in values.windows(2).enumerate() {
        assert!(
            pair[1] >= pair[0] - slack,
            "{}: element {} ({}) drops below element {} ({})",
            message, i + 1, pair[1], i, pair[0]
        );
    }
}
