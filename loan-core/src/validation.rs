//! Per-field input validation for loan applications.
//!
//! Each answer is checked on its own, at the point it is collected. A
//! rejected answer never reaches the application; the caller re-prompts with
//! the [`ValidationError`] message, which is written for the applicant.
//!
//! | Field        | Parsing                                  | Accepted range     |
//! |--------------|------------------------------------------|--------------------|
//! | name         | trimmed text                             | non-empty          |
//! | loan amount  | every non-digit character removed        | ≥ 10,000           |
//! | salary       | every non-digit character removed        | ≥ 10,000           |
//! | credit score | leading integer; anything after it ignored | 300 ..= 900      |
//! | purpose      | trimmed text                             | non-empty          |

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::models::LoanApplication;

/// Smallest loan amount accepted, in whole currency units.
pub const MIN_LOAN_AMOUNT: u64 = 10_000;

/// Smallest monthly salary accepted, in whole currency units.
pub const MIN_SALARY: u64 = 10_000;

/// Credit scores outside this range are rejected.
pub const CREDIT_SCORE_RANGE: RangeInclusive<u16> = 300..=900;

/// A rejected answer. The `Display` text is the re-prompt shown to the applicant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please tell me your full name so we can continue.")]
    EmptyName,

    #[error("Please enter a valid amount (minimum ₹10,000)")]
    InvalidLoanAmount { input: String },

    #[error("Please enter a valid monthly salary (minimum ₹10,000)")]
    InvalidSalary { input: String },

    #[error("Please enter a valid credit score between 300 and 900")]
    InvalidCreditScore { input: String },

    #[error("Please tell me what the loan is for (e.g., Home Renovation, Education, Medical).")]
    EmptyPurpose,
}

/// Keeps only ASCII digits and parses what is left.
///
/// `"₹5,00,000"` becomes `500000`. Input with no digits, or too many to fit
/// in a `u64`, yields `None`.
fn parse_whole_units(input: &str) -> Option<u64> {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Reads an optionally signed integer from the start of `input`, after
/// leading whitespace, and ignores whatever follows it.
///
/// `"750 pts"` and `"750.0"` give `750`; `"7OO"` gives `7`; `"abc"` gives
/// `None`. Nothing inside the number is skipped, so `"7,50"` gives `7`.
fn leading_integer(input: &str) -> Option<i64> {
    let input = input.trim_start();
    let (negative, rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let magnitude: i64 = rest[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn non_empty(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Accepts any name that is not blank. The stored value is trimmed.
pub fn parse_name(input: &str) -> Result<String, ValidationError> {
    non_empty(input).ok_or(ValidationError::EmptyName)
}

/// Parses a requested loan amount such as `"5,00,000"` or `"₹ 500000"`.
pub fn parse_loan_amount(input: &str) -> Result<u64, ValidationError> {
    match parse_whole_units(input) {
        Some(amount) if amount >= MIN_LOAN_AMOUNT => Ok(amount),
        _ => {
            warn!(input, "rejected loan amount");
            Err(ValidationError::InvalidLoanAmount {
                input: input.to_string(),
            })
        }
    }
}

/// Parses a monthly salary using the same rules as [`parse_loan_amount`].
pub fn parse_salary(input: &str) -> Result<u64, ValidationError> {
    match parse_whole_units(input) {
        Some(salary) if salary >= MIN_SALARY => Ok(salary),
        _ => {
            warn!(input, "rejected salary");
            Err(ValidationError::InvalidSalary {
                input: input.to_string(),
            })
        }
    }
}

/// Parses a credit score from the integer the input starts with, so
/// `"750 pts"` is 750 while `"7OO"` is 7 and out of range.
pub fn parse_credit_score(input: &str) -> Result<u16, ValidationError> {
    let score = leading_integer(input)
        .and_then(|score| u16::try_from(score).ok())
        .filter(|score| CREDIT_SCORE_RANGE.contains(score));

    score.ok_or_else(|| {
        warn!(input, "rejected credit score");
        ValidationError::InvalidCreditScore {
            input: input.to_string(),
        }
    })
}

/// Accepts any purpose that is not blank. The stored value is trimmed.
pub fn parse_purpose(input: &str) -> Result<String, ValidationError> {
    non_empty(input).ok_or(ValidationError::EmptyPurpose)
}

/// All five answers exactly as typed, before validation.
///
/// Field names double as CSV headers for batch files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawApplication {
    pub name: String,
    pub loan_amount: String,
    pub salary: String,
    pub credit_score: String,
    pub loan_purpose: String,
}

impl RawApplication {
    /// Validates each answer in question order and stops at the first
    /// rejection.
    pub fn validate(&self) -> Result<LoanApplication, ValidationError> {
        Ok(LoanApplication {
            name: parse_name(&self.name)?,
            loan_amount: parse_loan_amount(&self.loan_amount)?,
            salary: parse_salary(&self.salary)?,
            credit_score: parse_credit_score(&self.credit_score)?,
            loan_purpose: parse_purpose(&self.loan_purpose)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn name_is_trimmed() {
        assert_eq!(parse_name("  Asha Rao \n").unwrap(), "Asha Rao");
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(parse_name("   "), Err(ValidationError::EmptyName));
        assert_eq!(parse_name(""), Err(ValidationError::EmptyName));
    }

    #[test]
    fn loan_amount_strips_separators_and_symbols() {
        assert_eq!(parse_loan_amount("₹5,00,000").unwrap(), 500_000);
        assert_eq!(parse_loan_amount(" 250 000 ").unwrap(), 250_000);
        assert_eq!(parse_loan_amount("Rs. 10000").unwrap(), 10_000);
    }

    #[test]
    fn loan_amount_strips_decimal_point_too() {
        // The point is a non-digit, so "12000.50" reads as 1200050.
        assert_eq!(parse_loan_amount("12000.50").unwrap(), 1_200_050);
    }

    #[test]
    fn loan_amount_below_minimum_is_rejected() {
        let err = parse_loan_amount("9,999").unwrap_err();

        assert_eq!(
            err,
            ValidationError::InvalidLoanAmount {
                input: "9,999".to_string()
            }
        );
        assert_eq!(err.to_string(), "Please enter a valid amount (minimum ₹10,000)");
    }

    #[test]
    fn loan_amount_without_digits_is_rejected() {
        assert!(parse_loan_amount("five lakh").is_err());
        assert!(parse_loan_amount("").is_err());
    }

    #[test]
    fn loan_amount_overflow_is_rejected() {
        assert!(parse_loan_amount("99999999999999999999999").is_err());
    }

    #[test]
    fn salary_uses_same_rules() {
        assert_eq!(parse_salary("50,000").unwrap(), 50_000);
        assert_eq!(parse_salary("10000").unwrap(), 10_000);
        assert_eq!(
            parse_salary("9000").unwrap_err().to_string(),
            "Please enter a valid monthly salary (minimum ₹10,000)"
        );
    }

    #[test]
    fn credit_score_accepts_inclusive_bounds() {
        assert_eq!(parse_credit_score("300").unwrap(), 300);
        assert_eq!(parse_credit_score(" 900 ").unwrap(), 900);
    }

    #[test]
    fn credit_score_out_of_range_is_rejected() {
        assert!(parse_credit_score("299").is_err());
        assert!(parse_credit_score("901").is_err());
        assert!(parse_credit_score("-750").is_err());
        assert!(parse_credit_score("70000").is_err());
    }

    #[test]
    fn credit_score_reads_leading_integer() {
        assert_eq!(parse_credit_score("750abc").unwrap(), 750);
        assert_eq!(parse_credit_score("750.0").unwrap(), 750);
        assert_eq!(parse_credit_score("750 pts").unwrap(), 750);
        assert_eq!(parse_credit_score("+800").unwrap(), 800);
    }

    #[test]
    fn credit_score_without_leading_digits_is_rejected() {
        // "7OO" and "7,50" both read as 7.
        assert!(parse_credit_score("7OO").is_err());
        assert!(parse_credit_score("7,50").is_err());
        assert!(parse_credit_score("excellent").is_err());
        assert!(parse_credit_score("- 750").is_err());
        assert_eq!(
            parse_credit_score("abc").unwrap_err().to_string(),
            "Please enter a valid credit score between 300 and 900"
        );
    }

    #[test]
    fn raw_application_validates_in_question_order() {
        let raw = RawApplication {
            name: " Asha Rao ".to_string(),
            loan_amount: "₹5,00,000".to_string(),
            salary: "50,000".to_string(),
            credit_score: "780".to_string(),
            loan_purpose: "Education".to_string(),
        };

        assert_eq!(
            raw.validate().unwrap(),
            LoanApplication {
                name: "Asha Rao".to_string(),
                loan_amount: 500_000,
                salary: 50_000,
                credit_score: 780,
                loan_purpose: "Education".to_string(),
            }
        );

        let bad = RawApplication {
            loan_amount: "9,999".to_string(),
            credit_score: "1000".to_string(),
            ..raw
        };
        assert_eq!(
            bad.validate(),
            Err(ValidationError::InvalidLoanAmount {
                input: "9,999".to_string()
            })
        );
    }

    #[test]
    fn purpose_is_trimmed_and_required() {
        assert_eq!(parse_purpose(" Education ").unwrap(), "Education");
        assert_eq!(parse_purpose("\t"), Err(ValidationError::EmptyPurpose));
    }
}
