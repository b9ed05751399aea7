//! Rounding helpers shared by the loan calculations.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to the nearest whole currency unit, halves away from zero.
///
/// Negative values clamp to zero and values beyond `u64::MAX` saturate.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use loan_core::calculations::common::round_to_unit;
///
/// assert_eq!(round_to_unit(dec!(10746.96)), 10747);
/// assert_eq!(round_to_unit(dec!(4550.49)), 4550);
/// assert_eq!(round_to_unit(dec!(4550.50)), 4551);
/// ```
pub fn round_to_unit(value: Decimal) -> u64 {
    if value.is_sign_negative() {
        return 0;
    }
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(u64::MAX)
}
