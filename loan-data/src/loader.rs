use std::io::Read;

use loan_core::validation::{RawApplication, ValidationError};
use loan_core::{LoanApplication, LoanDecision, decide};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading applications from CSV.
#[derive(Debug, Error)]
pub enum ApplicationLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    /// A row parsed but one of its answers failed validation.
    /// `row` is 1-based and does not count the header.
    #[error("row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: ValidationError,
    },
}

impl From<csv::Error> for ApplicationLoaderError {
    fn from(err: csv::Error) -> Self {
        ApplicationLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from an applications CSV file.
///
/// Every column is read as raw text, exactly as an applicant would type it
/// into the chat, so the same validation rules apply. Quote values that
/// contain commas, e.g. `"5,00,000"`.
pub type ApplicationRecord = RawApplication;

/// Loader for loan applications stored as CSV.
pub struct ApplicationLoader;

impl ApplicationLoader {
    /// Parse application records from a CSV reader.
    ///
    /// Headers are matched by name; surrounding whitespace in cells is
    /// trimmed. The reader can be any type that implements `Read`, such as
    /// a file or a byte slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<ApplicationRecord>, ApplicationLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: ApplicationRecord = result?;
            records.push(record);
        }

        debug!(count = records.len(), "parsed application records");
        Ok(records)
    }

    /// Validate parsed records, stopping at the first bad row.
    pub fn validate(
        records: Vec<ApplicationRecord>
    ) -> Result<Vec<LoanApplication>, ApplicationLoaderError> {
        records
            .into_iter()
            .enumerate()
            .map(|(idx, record)| {
                record
                    .validate()
                    .map_err(|source| ApplicationLoaderError::InvalidRow {
                        row: idx + 1,
                        source,
                    })
            })
            .collect()
    }

    /// [`parse`](Self::parse) followed by [`validate`](Self::validate).
    pub fn load<R: Read>(reader: R) -> Result<Vec<LoanApplication>, ApplicationLoaderError> {
        let records = Self::parse(reader)?;
        Self::validate(records)
    }

    /// Decide every application, preserving order.
    pub fn evaluate(applications: &[LoanApplication]) -> Vec<LoanDecision> {
        let decisions: Vec<LoanDecision> = applications.iter().map(decide).collect();
        info!(
            total = decisions.len(),
            approved = decisions.iter().filter(|d| d.eligible).count(),
            "evaluated applications"
        );
        decisions
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const HEADER: &str = "name,loan_amount,salary,credit_score,loan_purpose";

    #[test]
    fn test_parse_single_record() {
        let csv = format!("{HEADER}\nAsha Rao,500000,50000,780,Education");

        let records = ApplicationLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(
            records,
            vec![ApplicationRecord {
                name: "Asha Rao".to_string(),
                loan_amount: "500000".to_string(),
                salary: "50000".to_string(),
                credit_score: "780".to_string(),
                loan_purpose: "Education".to_string(),
            }]
        );
    }

    #[test]
    fn test_parse_trims_cells_and_keeps_quoted_commas() {
        let csv = format!("{HEADER}\n  Asha ,\"5,00,000\", 50000 , 780 , Education ");

        let records = ApplicationLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].name, "Asha");
        assert_eq!(records[0].loan_amount, "5,00,000");
    }

    #[test]
    fn test_parse_missing_column() {
        let csv = "name,loan_amount\nAsha,500000";

        let err = ApplicationLoader::parse(csv.as_bytes()).expect_err("Should fail");
        let ApplicationLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(
            msg.contains("missing field"),
            "Expected 'missing field' in error, got: {}",
            msg
        );
    }

    #[test]
    fn test_load_applies_chat_validation() {
        let csv = format!("{HEADER}\nAsha,\"₹5,00,000\",\"50,000\",780,Education");

        let applications = ApplicationLoader::load(csv.as_bytes()).expect("Failed to load");

        assert_eq!(applications[0].loan_amount, 500_000);
        assert_eq!(applications[0].salary, 50_000);
    }

    #[test]
    fn test_load_reports_row_of_invalid_record() {
        let csv = format!(
            "{HEADER}\nAsha,500000,50000,780,Education\nRavi,500000,50000,95O,Medical"
        );

        let err = ApplicationLoader::load(csv.as_bytes()).expect_err("Should fail");

        let ApplicationLoaderError::InvalidRow { row, source } = err else {
            panic!("Expected InvalidRow error, got: {:?}", err);
        };
        assert_eq!(row, 2);
        assert_eq!(
            source,
            ValidationError::InvalidCreditScore {
                input: "95O".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_row_message() {
        let err = ApplicationLoaderError::InvalidRow {
            row: 4,
            source: ValidationError::EmptyPurpose,
        };

        assert_eq!(
            err.to_string(),
            "row 4: Please tell me what the loan is for (e.g., Home Renovation, Education, Medical)."
        );
    }

    #[test]
    fn test_evaluate_preserves_order() {
        let csv = format!(
            "{HEADER}\nA,500000,50000,780,Education\nB,500000,50000,600,Medical"
        );
        let applications = ApplicationLoader::load(csv.as_bytes()).unwrap();

        let decisions = ApplicationLoader::evaluate(&applications);

        assert_eq!(decisions.len(), 2);
        assert_eq!(decisions[0].application.name, "A");
        assert!(decisions[0].eligible);
        assert_eq!(decisions[1].application.name, "B");
        assert!(!decisions[1].eligible);
    }
}
