use serde::{Deserialize, Serialize};

use crate::validation::{CREDIT_SCORE_RANGE, MIN_LOAN_AMOUNT, MIN_SALARY, ValidationError};

/// Everything the applicant told us, in whole currency units.
///
/// Built field by field by [`crate::flow::ApplicationFlow`], or in one go via
/// [`LoanApplication::new`]. Once built it is only read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub name: String,
    pub loan_amount: u64,
    /// Monthly salary.
    pub salary: u64,
    pub credit_score: u16,
    pub loan_purpose: String,
}

impl LoanApplication {
    /// Builds an application from typed values, applying the same limits the
    /// chat flow applies to raw answers. Text fields are trimmed.
    pub fn new(
        name: impl Into<String>,
        loan_amount: u64,
        salary: u64,
        credit_score: u16,
        loan_purpose: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let application = Self {
            name: name.into().trim().to_string(),
            loan_amount,
            salary,
            credit_score,
            loan_purpose: loan_purpose.into().trim().to_string(),
        };
        application.validate()?;
        Ok(application)
    }

    /// Checks every field against the collection limits.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] for the first field, in collection
    /// order, that is out of bounds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.loan_amount < MIN_LOAN_AMOUNT {
            return Err(ValidationError::InvalidLoanAmount {
                input: self.loan_amount.to_string(),
            });
        }
        if self.salary < MIN_SALARY {
            return Err(ValidationError::InvalidSalary {
                input: self.salary.to_string(),
            });
        }
        if !CREDIT_SCORE_RANGE.contains(&self.credit_score) {
            return Err(ValidationError::InvalidCreditScore {
                input: self.credit_score.to_string(),
            });
        }
        if self.loan_purpose.trim().is_empty() {
            return Err(ValidationError::EmptyPurpose);
        }
        Ok(())
    }
}
