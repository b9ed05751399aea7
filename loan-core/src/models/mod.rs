mod application;
mod decision;

pub use application::LoanApplication;
pub use decision::{IneligibilityReason, LoanDecision};
