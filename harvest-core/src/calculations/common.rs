//! Rounding helpers shared by the budget and area calculations.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

/// Rounds to `dp` decimal places, halves away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use harvest_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(1.25), 1), dec!(1.3));
/// assert_eq!(round_half_up(dec!(1.24), 1), dec!(1.2));
/// assert_eq!(round_half_up(dec!(74999.5), 0), dec!(75000));
/// ```
pub fn round_half_up(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to the nearest whole number and converts to an unsigned integer.
///
/// Returns `None` for negative values or values that do not fit in a `u64`.
pub fn round_to_u64(value: Decimal) -> Option<u64> {
    if value.is_sign_negative() && !value.is_zero() {
        return None;
    }
    round_half_up(value, 0).to_u64()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(0.15), 1), dec!(0.2));
    }

    #[test]
    fn round_half_up_preserves_already_rounded_values() {
        assert_eq!(round_half_up(dec!(1.5), 1), dec!(1.5));
    }

    #[test]
    fn round_to_u64_rounds_to_nearest() {
        assert_eq!(round_to_u64(dec!(1234.4)), Some(1234));
        assert_eq!(round_to_u64(dec!(1234.5)), Some(1235));
        assert_eq!(round_to_u64(dec!(0)), Some(0));
    }

    #[test]
    fn round_to_u64_rejects_negative_values() {
        assert_eq!(round_to_u64(dec!(-3)), None);
    }
}
