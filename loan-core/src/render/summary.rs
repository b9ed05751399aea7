use std::fmt::Write;

use super::{DocumentRenderer, RenderError};
use crate::format::{DigitGrouping, format_currency, format_rate};
use crate::models::LoanDecision;

const NOT_APPLICABLE: &str = "N/A";

/// The on-screen application summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryRenderer {
    pub grouping: DigitGrouping,
}

impl SummaryRenderer {
    pub fn new(grouping: DigitGrouping) -> Self {
        Self { grouping }
    }

    fn currency(
        &self,
        value: u64,
    ) -> String {
        format_currency(value, self.grouping)
    }
}

fn row(
    out: &mut String,
    label: &str,
    value: &str,
) -> std::fmt::Result {
    writeln!(out, "  {:<16}{value}", format!("{label}:"))
}

impl DocumentRenderer for SummaryRenderer {
    fn render(
        &self,
        decision: &LoanDecision,
    ) -> Result<String, RenderError> {
        let application = &decision.application;
        let mut out = String::new();

        writeln!(out, "Loan Application Summary")?;
        if decision.eligible {
            writeln!(out, "Congratulations! 🎉")?;
            writeln!(out)?;
            writeln!(out, "✔ Loan Approved!")?;
            writeln!(out, "  Your loan application has been pre-approved")?;
        } else {
            writeln!(out, "Application Review")?;
            writeln!(out)?;
            writeln!(out, "✘ Loan Not Eligible")?;
            writeln!(
                out,
                "  Unfortunately, you don't meet the eligibility criteria"
            )?;
        }

        writeln!(out)?;
        writeln!(out, "Personal Details")?;
        row(&mut out, "Name", &application.name)?;
        row(&mut out, "Loan Amount", &self.currency(application.loan_amount))?;
        row(&mut out, "Monthly Salary", &self.currency(application.salary))?;
        row(&mut out, "Credit Score", &application.credit_score.to_string())?;
        row(&mut out, "Purpose", &application.loan_purpose)?;

        let emi = if decision.eligible {
            self.currency(decision.emi)
        } else {
            NOT_APPLICABLE.to_string()
        };
        let total = decision
            .total_payable()
            .map_or_else(|| NOT_APPLICABLE.to_string(), |t| self.currency(t));

        writeln!(out)?;
        writeln!(out, "Loan Terms")?;
        row(&mut out, "Interest Rate", &format_rate(decision.interest_rate))?;
        row(&mut out, "Tenure", &format!("{} months", decision.tenure_months))?;
        row(&mut out, "Monthly EMI", &emi)?;
        row(&mut out, "Total Payable", &total)?;

        if !decision.eligible {
            writeln!(out)?;
            writeln!(out, "Why was my application not approved?")?;
            for reason in decision.ineligibility_reasons() {
                writeln!(out, "  - {reason}")?;
            }
            writeln!(
                out,
                "You can reapply after improving your credit score or adjusting the loan amount."
            )?;
        }

        Ok(out)
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }
}
