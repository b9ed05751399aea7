//! Equated monthly installment for an amortizing loan.
//!
//! ```text
//! r   = annual_rate / 12 / 100
//! EMI = P × r × (1 + r)^n / ((1 + r)^n − 1)
//! ```
//!
//! where `P` is the principal and `n` the tenure in months.

use rust_decimal::{Decimal, MathematicalOps};
use tracing::debug;

const MONTHS_PER_YEAR: u32 = 12;

/// Converts a percent-per-annum rate into a monthly fraction.
///
/// `12` (percent) becomes `0.01`.
pub fn monthly_rate(annual_rate: Decimal) -> Decimal {
    annual_rate / Decimal::from(MONTHS_PER_YEAR) / Decimal::ONE_HUNDRED
}

/// Unrounded monthly installment.
///
/// A zero rate degenerates to straight division of the principal over the
/// tenure. `tenure_months` must be non-zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use loan_core::calculations::monthly_installment;
/// use loan_core::calculations::common::round_to_unit;
///
/// let emi = monthly_installment(500_000, dec!(10.5), 60);
///
/// assert_eq!(round_to_unit(emi), 10_747);
/// ```
pub fn monthly_installment(
    principal: u64,
    annual_rate: Decimal,
    tenure_months: u32,
) -> Decimal {
    let principal = Decimal::from(principal);
    let months = Decimal::from(tenure_months);
    let rate = monthly_rate(annual_rate);

    if rate.is_zero() {
        return principal / months;
    }

    let growth = (Decimal::ONE + rate).powi(i64::from(tenure_months));
    let emi = principal * rate * growth / (growth - Decimal::ONE);

    debug!(%principal, %annual_rate, tenure_months, %emi, "computed installment");
    emi
}
