//! Eligibility rule and credit-score rate tiers.
//!
//! # Rule
//!
//! An applicant is eligible when **all** of the following hold (boundaries
//! inclusive):
//!
//! | Condition | Standard policy |
//! |-----------|-----------------|
//! | credit score ≥ minimum | 650 |
//! | monthly salary ≥ minimum | ₹25,000 |
//! | loan amount ≤ salary × multiple | 60 |
//!
//! # Rate tiers
//!
//! The rate is chosen from the credit score whether or not the applicant is
//! eligible. Tiers are checked from the highest threshold down and the first
//! match wins.
//!
//! | Credit score | Rate (p.a.) |
//! |--------------|-------------|
//! | ≥ 750        | 10.5%       |
//! | ≥ 700        | 11.5%       |
//! | ≥ 650        | 13.0%       |
//! | otherwise    | 15.0%       |
//!
//! Tenure is fixed at 60 months.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use loan_core::{LoanApplication, decide};
//!
//! let application = LoanApplication::new("Asha", 500_000, 50_000, 780, "Education").unwrap();
//! let decision = decide(&application);
//!
//! assert!(decision.eligible);
//! assert_eq!(decision.interest_rate, dec!(10.5));
//! assert_eq!(decision.emi, 10_747);
//! assert_eq!(decision.total_payable(), Some(644_820));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::calculations::common::round_to_unit;
use crate::calculations::emi::monthly_installment;
use crate::models::{IneligibilityReason, LoanApplication, LoanDecision};

/// Errors raised when a [`LoanPolicy`] is internally inconsistent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// Tenure must be at least one month.
    #[error("tenure must be at least one month")]
    ZeroTenure,

    /// The salary multiple must be positive.
    #[error("salary multiple must be positive")]
    ZeroSalaryMultiple,

    /// Every rate must be positive.
    #[error("interest rate must be positive, got {0}")]
    InvalidRate(Decimal),

    /// Tiers must be listed from the highest score threshold down.
    #[error("rate tiers must have strictly descending score thresholds")]
    TiersNotDescending,

    /// A better credit score must never cost more.
    #[error("rate tiers must not charge more for a higher credit score")]
    TiersNotMonotonic,
}

/// One credit-score band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTier {
    /// Lowest credit score that earns this rate.
    pub min_credit_score: u16,
    /// Percent per annum.
    pub rate: Decimal,
}

/// The thresholds, tiers and tenure a decision is made against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanPolicy {
    pub min_credit_score: u16,
    pub min_salary: u64,
    /// Largest loan as a multiple of monthly salary.
    pub max_salary_multiple: u64,
    /// Ordered from the highest `min_credit_score` down.
    pub rate_tiers: Vec<RateTier>,
    /// Rate for scores below every tier.
    pub fallback_rate: Decimal,
    pub tenure_months: u32,
}

impl LoanPolicy {
    /// The policy every decision in this workspace is made against.
    pub fn standard() -> Self {
        Self {
            min_credit_score: 650,
            min_salary: 25_000,
            max_salary_multiple: 60,
            rate_tiers: vec![
                RateTier {
                    min_credit_score: 750,
                    rate: Decimal::new(105, 1),
                },
                RateTier {
                    min_credit_score: 700,
                    rate: Decimal::new(115, 1),
                },
                RateTier {
                    min_credit_score: 650,
                    rate: Decimal::new(130, 1),
                },
            ],
            fallback_rate: Decimal::new(150, 1),
            tenure_months: 60,
        }
    }

    /// Checks that the policy can be used for decisions.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] if:
    /// - `tenure_months` is zero
    /// - `max_salary_multiple` is zero
    /// - any rate, including `fallback_rate`, is not positive
    /// - tier thresholds are not strictly descending
    /// - a higher tier charges more than a lower one, or than the fallback
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.tenure_months == 0 {
            return Err(PolicyError::ZeroTenure);
        }
        if self.max_salary_multiple == 0 {
            return Err(PolicyError::ZeroSalaryMultiple);
        }

        let rates = self
            .rate_tiers
            .iter()
            .map(|tier| tier.rate)
            .chain(std::iter::once(self.fallback_rate));
        for rate in rates.clone() {
            if rate <= Decimal::ZERO {
                return Err(PolicyError::InvalidRate(rate));
            }
        }

        for pair in self.rate_tiers.windows(2) {
            if pair[0].min_credit_score <= pair[1].min_credit_score {
                return Err(PolicyError::TiersNotDescending);
            }
        }

        let rates: Vec<Decimal> = rates.collect();
        if rates.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(PolicyError::TiersNotMonotonic);
        }

        Ok(())
    }
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

/// Applies a [`LoanPolicy`] to applications.
#[derive(Debug, Clone)]
pub struct EligibilityCalculator {
    policy: LoanPolicy,
}

impl EligibilityCalculator {
    /// Creates a calculator after validating `policy`.
    pub fn new(policy: LoanPolicy) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// Calculator for [`LoanPolicy::standard`].
    pub fn standard() -> Self {
        Self {
            policy: LoanPolicy::standard(),
        }
    }

    pub fn policy(&self) -> &LoanPolicy {
        &self.policy
    }

    /// Largest loan this salary supports. Saturates instead of overflowing.
    pub fn loan_limit(
        &self,
        salary: u64,
    ) -> u64 {
        salary.saturating_mul(self.policy.max_salary_multiple)
    }

    /// Every failed condition of the eligibility rule, in rule order.
    pub fn ineligibility_reasons(
        &self,
        application: &LoanApplication,
    ) -> Vec<IneligibilityReason> {
        let mut reasons = Vec::new();
        if application.credit_score < self.policy.min_credit_score {
            reasons.push(IneligibilityReason::CreditScoreTooLow {
                minimum: self.policy.min_credit_score,
            });
        }
        if application.salary < self.policy.min_salary {
            reasons.push(IneligibilityReason::SalaryTooLow {
                minimum: self.policy.min_salary,
            });
        }
        let limit = self.loan_limit(application.salary);
        if application.loan_amount > limit {
            reasons.push(IneligibilityReason::LoanAmountExceedsLimit { limit });
        }
        reasons
    }

    pub fn is_eligible(
        &self,
        application: &LoanApplication,
    ) -> bool {
        self.ineligibility_reasons(application).is_empty()
    }

    /// Rate for a credit score: the first tier whose threshold it meets.
    pub fn interest_rate_for(
        &self,
        credit_score: u16,
    ) -> Decimal {
        self.policy
            .rate_tiers
            .iter()
            .find(|tier| credit_score >= tier.min_credit_score)
            .map_or(self.policy.fallback_rate, |tier| tier.rate)
    }

    /// Assesses an application.
    ///
    /// The EMI formula is only evaluated for an eligible applicant; an
    /// ineligible decision carries `emi == 0`.
    pub fn decide(
        &self,
        application: &LoanApplication,
    ) -> LoanDecision {
        let reasons = self.ineligibility_reasons(application);
        let eligible = reasons.is_empty();
        let interest_rate = self.interest_rate_for(application.credit_score);
        let tenure_months = self.policy.tenure_months;
        debug!(credit_score = application.credit_score, %interest_rate, "selected rate tier");

        let emi = if eligible {
            round_to_unit(monthly_installment(
                application.loan_amount,
                interest_rate,
                tenure_months,
            ))
        } else {
            0
        };

        info!(
            eligible,
            %interest_rate,
            emi,
            failed_conditions = reasons.len(),
            "loan decision"
        );

        LoanDecision {
            application: application.clone(),
            eligible,
            interest_rate,
            tenure_months,
            emi,
            reasons,
        }
    }
}

impl Default for EligibilityCalculator {
    fn default() -> Self {
        Self::standard()
    }
}

/// Assesses `application` against [`LoanPolicy::standard`].
pub fn decide(application: &LoanApplication) -> LoanDecision {
    EligibilityCalculator::standard().decide(application)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn application(
        credit_score: u16,
        salary: u64,
        loan_amount: u64,
    ) -> LoanApplication {
        LoanApplication {
            name: "Test Applicant".to_string(),
            loan_amount,
            salary,
            credit_score,
            loan_purpose: "Home Renovation".to_string(),
        }
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    #[test]
    fn excellent_score_is_approved_at_lowest_rate() {
        let decision = decide(&application(780, 50_000, 500_000));

        assert!(decision.eligible);
        assert_eq!(decision.interest_rate, dec!(10.5));
        assert_eq!(decision.tenure_months, 60);
        assert_eq!(decision.emi, 10_747);
        assert!(decision.reasons.is_empty());
    }

    #[test]
    fn fair_score_is_approved_at_thirteen_percent() {
        let decision = decide(&application(680, 30_000, 200_000));

        assert!(decision.eligible);
        assert_eq!(decision.interest_rate, dec!(13.0));
        assert_eq!(decision.emi, 4_551);
    }

    #[test]
    fn low_score_is_rejected_with_fallback_rate() {
        let decision = decide(&application(600, 50_000, 500_000));

        assert!(!decision.eligible);
        assert_eq!(decision.interest_rate, dec!(15.0));
        assert_eq!(decision.emi, 0);
        assert_eq!(
            decision.reasons,
            vec![IneligibilityReason::CreditScoreTooLow { minimum: 650 }]
        );
    }

    #[test]
    fn low_salary_is_rejected() {
        let decision = decide(&application(750, 20_000, 100_000));

        assert!(!decision.eligible);
        assert_eq!(decision.emi, 0);
        assert_eq!(
            decision.reasons,
            vec![IneligibilityReason::SalaryTooLow { minimum: 25_000 }]
        );
    }

    #[test]
    fn loan_above_salary_multiple_is_rejected() {
        let decision = decide(&application(750, 30_000, 2_000_000));

        assert!(!decision.eligible);
        assert_eq!(decision.emi, 0);
        assert_eq!(decision.total_payable(), None);
        assert_eq!(
            decision.reasons,
            vec![IneligibilityReason::LoanAmountExceedsLimit { limit: 1_800_000 }]
        );
    }

    #[test]
    fn all_boundaries_are_inclusive() {
        let decision = decide(&application(650, 25_000, 25_000 * 60));

        assert!(decision.eligible);
        assert_eq!(decision.interest_rate, dec!(13.0));
        assert!(decision.emi > 0);
    }

    #[test]
    fn every_failed_condition_is_reported_in_rule_order() {
        let decision = decide(&application(500, 10_000, 900_000));

        assert_eq!(
            decision.reasons,
            vec![
                IneligibilityReason::CreditScoreTooLow { minimum: 650 },
                IneligibilityReason::SalaryTooLow { minimum: 25_000 },
                IneligibilityReason::LoanAmountExceedsLimit { limit: 600_000 },
            ]
        );
    }

    #[test]
    fn application_is_echoed() {
        let input = application(720, 40_000, 300_000);
        let decision = decide(&input);

        assert_eq!(decision.application, input);
    }

    // =========================================================================
    // Properties
    // =========================================================================

    #[test]
    fn decisions_are_deterministic() {
        let input = application(710, 45_000, 750_000);

        assert_eq!(decide(&input), decide(&input));
    }

    #[test]
    fn eligibility_matches_the_three_conditions() {
        for credit_score in [300, 649, 650, 700, 900] {
            for salary in [10_000, 24_999, 25_000, 80_000] {
                for loan_amount in [10_000, salary * 60, salary * 60 + 1] {
                    let decision = decide(&application(credit_score, salary, loan_amount));
                    let expected =
                        credit_score >= 650 && salary >= 25_000 && loan_amount <= salary * 60;

                    assert_eq!(decision.eligible, expected);
                    if !decision.eligible {
                        assert_eq!(decision.emi, 0);
                    }
                }
            }
        }
    }

    #[test]
    fn rate_never_rises_with_credit_score() {
        let calculator = EligibilityCalculator::standard();
        let rates: Vec<Decimal> = (300..=900)
            .map(|score| calculator.interest_rate_for(score))
            .collect();

        assert!(rates.windows(2).all(|pair| pair[1] <= pair[0]));
    }

    #[test]
    fn tier_thresholds() {
        let calculator = EligibilityCalculator::standard();

        assert_eq!(calculator.interest_rate_for(900), dec!(10.5));
        assert_eq!(calculator.interest_rate_for(750), dec!(10.5));
        assert_eq!(calculator.interest_rate_for(749), dec!(11.5));
        assert_eq!(calculator.interest_rate_for(700), dec!(11.5));
        assert_eq!(calculator.interest_rate_for(699), dec!(13.0));
        assert_eq!(calculator.interest_rate_for(650), dec!(13.0));
        assert_eq!(calculator.interest_rate_for(649), dec!(15.0));
        assert_eq!(calculator.interest_rate_for(300), dec!(15.0));
    }

    #[test]
    fn emi_never_falls_as_loan_amount_rises() {
        let emis: Vec<u64> = (1..=30)
            .map(|step| decide(&application(760, 100_000, step * 200_000)).emi)
            .collect();

        assert!(emis.windows(2).all(|pair| pair[1] >= pair[0]));
    }

    #[test]
    fn loan_limit_saturates() {
        let calculator = EligibilityCalculator::standard();

        assert_eq!(calculator.loan_limit(u64::MAX), u64::MAX);
    }

    // =========================================================================
    // Policy validation
    // =========================================================================

    #[test]
    fn standard_policy_is_valid() {
        assert_eq!(LoanPolicy::standard().validate(), Ok(()));
    }

    #[test]
    fn zero_tenure_is_rejected() {
        let policy = LoanPolicy {
            tenure_months: 0,
            ..LoanPolicy::standard()
        };

        assert_eq!(
            EligibilityCalculator::new(policy).unwrap_err(),
            PolicyError::ZeroTenure
        );
    }

    #[test]
    fn non_positive_rate_is_rejected() {
        let policy = LoanPolicy {
            fallback_rate: Decimal::ZERO,
            ..LoanPolicy::standard()
        };

        assert_eq!(policy.validate(), Err(PolicyError::InvalidRate(Decimal::ZERO)));
    }

    #[test]
    fn unordered_tiers_are_rejected() {
        let mut policy = LoanPolicy::standard();
        policy.rate_tiers.reverse();

        assert_eq!(policy.validate(), Err(PolicyError::TiersNotDescending));
    }

    #[test]
    fn better_score_costing_more_is_rejected() {
        let mut policy = LoanPolicy::standard();
        policy.rate_tiers[0].rate = dec!(12.0);

        assert_eq!(policy.validate(), Err(PolicyError::TiersNotMonotonic));
    }

    #[test]
    fn custom_policy_changes_tenure() {
        let policy = LoanPolicy {
            tenure_months: 12,
            ..LoanPolicy::standard()
        };
        let calculator = EligibilityCalculator::new(policy).unwrap();
        let decision = calculator.decide(&application(800, 50_000, 120_000));

        assert_eq!(decision.tenure_months, 12);
        assert_eq!(decision.total_payable(), Some(decision.emi * 12));
    }
}
