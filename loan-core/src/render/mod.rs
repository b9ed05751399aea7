//! Turning a [`LoanDecision`] into something a person reads.
//!
//! Renderers are interchangeable behind [`DocumentRenderer`]; the calculator
//! never knows which one is used.

mod letter;
mod summary;

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::models::LoanDecision;

pub use letter::SanctionLetterRenderer;
pub use summary::SummaryRenderer;

#[derive(Debug, Error)]
pub enum RenderError {
    /// Only approved applications get a sanction letter.
    #[error("no sanction letter for an ineligible application ({name})")]
    NotEligible { name: String },

    #[error("formatting failed: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Produces a text document from a decision.
pub trait DocumentRenderer {
    fn render(
        &self,
        decision: &LoanDecision,
    ) -> Result<String, RenderError>;

    /// Extension, without the dot, for files holding this renderer's output.
    fn file_extension(&self) -> &'static str;
}

/// Whitespace, path separators and characters file systems reject.
static UNSAFE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[\s/\\:*?"<>|\x00-\x1F]+"#).expect("file name pattern is valid")
});

/// `Sanction_Letter_<name>.<extension>`. Runs of whitespace, `/`, `\` and
/// other characters unsafe in a file name become a single underscore, so the
/// result never names a subdirectory.
pub fn letter_file_name(
    name: &str,
    extension: &str,
) -> String {
    let name = UNSAFE_RUN.replace_all(name.trim(), "_");
    format!("Sanction_Letter_{name}.{extension}")
}
