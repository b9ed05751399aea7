use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use loan_core::LoanDecision;
use loan_core::render::{DocumentRenderer, SanctionLetterRenderer, letter_file_name};
use tracing::info;

use crate::config::AppConfig;

/// Renders the sanction letter for `decision` and writes it to
/// `config.output_dir`, creating the directory if needed.
///
/// Fails for an ineligible decision. An existing letter for the same name is
/// overwritten.
pub fn save_sanction_letter(
    decision: &LoanDecision,
    config: &AppConfig,
    issued_on: NaiveDate,
) -> Result<PathBuf> {
    let renderer = SanctionLetterRenderer::new(config.lender.clone(), config.grouping, issued_on);
    let letter = renderer
        .render(decision)
        .context("Failed to render sanction letter")?;

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            config.output_dir.display()
        )
    })?;

    let path = config.output_dir.join(letter_file_name(
        &decision.application.name,
        renderer.file_extension(),
    ));
    std::fs::write(&path, letter)
        .with_context(|| format!("Failed to write sanction letter: {}", path.display()))?;

    info!(path = %path.display(), "sanction letter saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use loan_core::{LoanApplication, decide};
    use pretty_assertions::assert_eq;

    use super::*;

    fn config_in(dir: &str) -> AppConfig {
        let output_dir = std::env::temp_dir().join(format!("{dir}-{}", std::process::id()));
        AppConfig {
            output_dir,
            ..AppConfig::default()
        }
    }

    fn decision(credit_score: u16) -> LoanDecision {
        let application =
            LoanApplication::new("Asha Rao", 500_000, 50_000, credit_score, "Education").unwrap();
        decide(&application)
    }

    fn issued_on() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    #[test]
    fn writes_letter_into_new_directory() {
        let config = config_in("loan-ui-letters");

        let path = save_sanction_letter(&decision(780), &config, issued_on()).unwrap();

        assert_eq!(
            path,
            config.output_dir.join("Sanction_Letter_Asha_Rao.txt")
        );
        let letter = std::fs::read_to_string(&path).unwrap();
        assert!(letter.contains("Dear Asha Rao,"));
        assert!(letter.contains("Date: 7/3/2025"));
        std::fs::remove_dir_all(&config.output_dir).unwrap();
    }

    #[test]
    fn refuses_ineligible_decision() {
        let config = config_in("loan-ui-letters-rejected");

        let err = save_sanction_letter(&decision(600), &config, issued_on()).unwrap_err();

        assert!(err.to_string().contains("Failed to render sanction letter"));
        assert!(!config.output_dir.exists());
    }
}
