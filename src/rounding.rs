// 🎯 Rounding - snap to a step, then keep N decimal digits
//
// Every amount shown to the user goes through `round`, so the calculator and
// the aggregator agree on the same two-decimal grid.

/// Step used for every displayed amount
pub const STEP: f64 = 1.0;

/// Decimal digits kept for every displayed amount
pub const DECIMAL_DIGITS: u32 = 2;

/// Round `value` to the nearest multiple of `step` at `10^decimal_digits`
/// precision, then back to `decimal_digits` places.
///
/// `f64::EPSILON` is added before scaling so values such as `1.005` land on
/// the expected side of the tie.
///
/// ```
/// use revpct::round;
///
/// assert_eq!(round(909.0909, 1.0, 2), 909.09);
/// assert_eq!(round(1.005, 1.0, 2), 1.01);
/// ```
pub fn round(value: f64, step: f64, decimal_digits: u32) -> f64 {
    let precision = 10f64.powi(decimal_digits as i32);
    let snapped = round_half_up(((value + f64::EPSILON) * precision) / step) * step;
    round_half_up(snapped) / precision
}

/// Two-decimal rounding used throughout the calculator
pub fn round_money(value: f64) -> f64 {
    round(value, STEP, DECIMAL_DIGITS)
}

/// Nearest integer, ties towards positive infinity.
///
/// `f64::round` sends ties away from zero (`-2.5 -> -3`); amounts here follow
/// the half-up convention instead (`-2.5 -> -2`).
fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_zero() {
        assert_eq!(round(0.0, 1.0, 2), 0.0);
    }

    #[test]
    fn test_round_two_digits() {
        assert_eq!(round(909.090909, 1.0, 2), 909.09);
        assert_eq!(round(90.909, 1.0, 2), 90.91);
        assert_eq!(round(2000.0, 1.0, 2), 2000.0);
    }

    #[test]
    fn test_round_binary_representation_tie() {
        // 1.005 is stored as 1.00499999999999989...
        assert_eq!(round(1.005, 1.0, 2), 1.01);
    }

    #[test]
    fn test_round_with_step() {
        // Snap to multiples of 5 cents
        assert_eq!(round(1.23, 5.0, 2), 1.25);
        assert_eq!(round(1.22, 5.0, 2), 1.2);
        // Snap to whole tens with no decimals
        assert_eq!(round(1234.0, 10.0, 0), 1230.0);
    }

    #[test]
    fn test_round_zero_digits() {
        assert_eq!(round(2.4, 1.0, 0), 2.0);
        assert_eq!(round(2.5, 1.0, 0), 3.0);
    }

    #[test]
    fn test_round_half_up_negative_ties() {
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        assert_eq!(round_half_up(0.49999999999999994), 0.0);
    }

    #[test]
    fn test_round_non_finite_propagates() {
        assert!(round(f64::NAN, 1.0, 2).is_nan());
        assert_eq!(round(f64::INFINITY, 1.0, 2), f64::INFINITY);
    }

    #[test]
    fn test_round_money_matches_round() {
        assert_eq!(round_money(1818.1799999), round(1818.1799999, 1.0, 2));
        assert_eq!(round_money(1818.1799999), 1818.18);
    }
}
