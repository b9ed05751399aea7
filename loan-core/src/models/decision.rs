use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::LoanApplication;
use crate::format::{DigitGrouping, format_amount};

/// One failed condition of the eligibility rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IneligibilityReason {
    CreditScoreTooLow { minimum: u16 },
    SalaryTooLow { minimum: u64 },
    /// The loan is larger than the salary multiple allows.
    LoanAmountExceedsLimit { limit: u64 },
}

impl fmt::Display for IneligibilityReason {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::CreditScoreTooLow { minimum } => {
                write!(f, "Credit score below minimum requirement ({minimum}+)")
            }
            Self::SalaryTooLow { minimum } => write!(
                f,
                "Monthly salary below minimum requirement (₹{}+)",
                format_amount(*minimum, DigitGrouping::default())
            ),
            Self::LoanAmountExceedsLimit { .. } => {
                write!(f, "Loan amount exceeds eligibility limit based on salary")
            }
        }
    }
}

/// The outcome of assessing a [`LoanApplication`].
///
/// `interest_rate` and `tenure_months` are always set, even when the
/// applicant is not eligible; the rate is the tier their credit score would
/// earn. `emi` is zero for an ineligible decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanDecision {
    #[serde(flatten)]
    pub application: LoanApplication,
    pub eligible: bool,
    /// Percent per annum, e.g. `10.5`.
    pub interest_rate: Decimal,
    pub tenure_months: u32,
    /// Monthly installment in whole currency units.
    pub emi: u64,
    /// Failed conditions in rule order. Empty exactly when `eligible`.
    pub reasons: Vec<IneligibilityReason>,
}

impl LoanDecision {
    /// `emi × tenure_months` for an approved loan.
    ///
    /// `None` when the applicant is not eligible; a total built from the
    /// zero EMI would be meaningless.
    pub fn total_payable(&self) -> Option<u64> {
        self.eligible
            .then(|| self.emi.saturating_mul(u64::from(self.tenure_months)))
    }

    pub fn ineligibility_reasons(&self) -> &[IneligibilityReason] {
        &self.reasons
    }
}
