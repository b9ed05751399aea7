pub mod calculations;
pub mod flow;
pub mod format;
pub mod models;
pub mod render;
pub mod validation;

pub use calculations::{EligibilityCalculator, LoanPolicy, decide};
pub use models::*;
