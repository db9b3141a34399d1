//! Rounding helpers shared by the unit normalizer and the macro calculator
//!
//! Every "round" in the calculation pipeline rounds halves upward
//! (toward positive infinity). `f64::round` rounds halves away from zero,
//! which disagrees for negative halves, so the pipeline never calls it
//! directly.

/// Round to the nearest whole number, halves toward positive infinity
///
/// `round_half_up(2.5) == 3.0`, `round_half_up(-2.5) == -2.0`
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to a fixed number of decimal places using [`round_half_up`]
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    round_half_up(value * factor) / factor
}

/// Round to a whole `i32`
///
/// The cast saturates and maps NaN to 0, so degenerate inputs produce a
/// degenerate number rather than a panic.
#[inline]
pub fn to_whole(value: f64) -> i32 {
    round_half_up(value) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(2.5, 3.0)]
    #[case(2.4999, 2.0)]
    #[case(-2.5, -2.0)]
    #[case(-2.51, -3.0)]
    #[case(0.0, 0.0)]
    #[case(1291.44, 1291.0)]
    fn test_round_half_up(#[case] input: f64, #[case] expected: f64) {
        assert_eq!(round_half_up(input), expected);
    }

    #[test]
    fn test_round_to_decimals() {
        assert!((round_to_decimals(72.5747, 1) - 72.6).abs() < 1e-9);
        assert!((round_to_decimals(68.0388, 1) - 68.0).abs() < 1e-9);
        assert!((round_to_decimals(1.23456, 3) - 1.235).abs() < 1e-9);
    }

    #[test]
    fn test_to_whole_is_total() {
        assert_eq!(to_whole(f64::NAN), 0);
        assert_eq!(to_whole(f64::INFINITY), i32::MAX);
        assert_eq!(to_whole(f64::NEG_INFINITY), i32::MIN);
        assert_eq!(to_whole(373.3125), 373);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: positive values round exactly like `f64::round`
        #[test]
        fn prop_matches_std_round_for_positive(value in 0.0f64..100_000.0) {
            prop_assert_eq!(round_half_up(value), value.round());
        }

        /// Property: rounding moves a value by at most half a unit
        #[test]
        fn prop_rounding_error_bounded(value in -100_000.0f64..100_000.0) {
            prop_assert!((round_half_up(value) - value).abs() <= 0.5);
        }
    }
}
