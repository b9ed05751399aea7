//! Loan eligibility and EMI calculations.
//!
//! [`decide`] is the entry point used by the chat flow and the batch loader.
//! The pieces it is built from are public so renderers and tests can reuse
//! them.

pub mod common;
pub mod eligibility;
pub mod emi;

pub use eligibility::{EligibilityCalculator, LoanPolicy, PolicyError, RateTier, decide};
pub use emi::monthly_installment;
