use std::fmt::Write;

use chrono::NaiveDate;
use tracing::info;

use super::{DocumentRenderer, RenderError};
use crate::format::{DigitGrouping, format_currency, format_rate};
use crate::models::LoanDecision;

const WIDTH: usize = 74;

const TERMS: [&str; 3] = [
    "The loan is subject to processing fees and other charges as applicable.",
    "Pre-payment charges may apply as per policy.",
    "Final disbursement is subject to document verification.",
];

/// Plain-text sanction letter for an approved application.
///
/// The issue date is supplied by the caller so the same decision always
/// renders the same letter.
#[derive(Debug, Clone)]
pub struct SanctionLetterRenderer {
    pub lender: String,
    pub grouping: DigitGrouping,
    pub issued_on: NaiveDate,
}

impl SanctionLetterRenderer {
    pub fn new(
        lender: impl Into<String>,
        grouping: DigitGrouping,
        issued_on: NaiveDate,
    ) -> Self {
        Self {
            lender: lender.into(),
            grouping,
            issued_on,
        }
    }
}

impl DocumentRenderer for SanctionLetterRenderer {
    /// # Errors
    ///
    /// [`RenderError::NotEligible`] when the decision is a rejection.
    fn render(
        &self,
        decision: &LoanDecision,
    ) -> Result<String, RenderError> {
        let application = &decision.application;
        let Some(total_payable) = decision.total_payable() else {
            return Err(RenderError::NotEligible {
                name: application.name.clone(),
            });
        };

        let rule = "=".repeat(WIDTH);
        let mut out = String::new();

        writeln!(out, "{rule}")?;
        writeln!(out, "{:^width$}", self.lender.to_uppercase(), width = WIDTH)?;
        writeln!(out, "{:^width$}", "Personal Loan Sanction Letter", width = WIDTH)?;
        writeln!(out, "{rule}")?;
        writeln!(out)?;
        writeln!(out, "Date: {}", self.issued_on.format("%-d/%-m/%Y"))?;
        writeln!(out)?;
        writeln!(out, "Dear {},", application.name)?;
        writeln!(out)?;
        writeln!(
            out,
            "We are pleased to inform you that your personal loan application has been"
        )?;
        writeln!(
            out,
            "approved subject to the terms and conditions mentioned below:"
        )?;
        writeln!(out)?;

        writeln!(out, "LOAN DETAILS")?;
        let details = [
            ("Loan Amount", format_currency(application.loan_amount, self.grouping)),
            ("Interest Rate", format_rate(decision.interest_rate)),
            ("Loan Tenure", format!("{} months", decision.tenure_months)),
            ("Monthly EMI", format_currency(decision.emi, self.grouping)),
            ("Total Payable", format_currency(total_payable, self.grouping)),
            ("Loan Purpose", application.loan_purpose.clone()),
        ];
        for (label, value) in details {
            writeln!(out, "  {:<16}{value}", format!("{label}:"))?;
        }
        writeln!(out)?;

        writeln!(out, "Terms & Conditions:")?;
        for term in TERMS {
            writeln!(out, "  • {term}")?;
        }
        writeln!(out)?;
        writeln!(
            out,
            "{:^width$}",
            "This is a system-generated letter and does not require a signature.",
            width = WIDTH
        )?;
        writeln!(
            out,
            "{:^width$}",
            format!("Thank you for choosing {}!", self.lender),
            width = WIDTH
        )?;

        info!(applicant = %application.name, "rendered sanction letter");
        Ok(out)
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }
}
