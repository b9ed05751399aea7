//! The two ways of getting a decision: the paced chat and the one-shot quote.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use loan_core::flow::Pause;
use loan_core::render::{DocumentRenderer, SummaryRenderer};
use loan_core::validation::RawApplication;
use loan_core::{LoanDecision, decide};
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::landing::landing_page;
use crate::letters::save_sanction_letter;
use crate::session::{ChatSession, SessionOutcome};

const DOWNLOAD_QUESTION: &str = "Download Sanction Letter?";

/// What a chat produced. `decision` is `None` when the applicant left early.
#[derive(Debug, Clone, Default)]
pub struct ChatReport {
    pub decision: Option<LoanDecision>,
    pub letter: Option<PathBuf>,
}

/// Runs the whole chat: banner, questions, summary and, for an approved
/// application, the offer to save a sanction letter dated `today`.
pub async fn run_chat<R, W>(
    config: &AppConfig,
    input: R,
    output: W,
    today: NaiveDate,
) -> Result<ChatReport>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut session = ChatSession::new(input, output, config.pacing.clone());

    session
        .show(&format!("{}\n", landing_page(&config.lender)))
        .await
        .context("Failed to write to the terminal")?;

    let outcome = session
        .collect(config.flow_settings())
        .await
        .context("Failed to read answers")?;
    let application = match outcome {
        SessionOutcome::Completed(application) => application,
        SessionOutcome::Abandoned => {
            session
                .show("\nSession ended before the application was complete.\n")
                .await
                .context("Failed to write to the terminal")?;
            return Ok(ChatReport::default());
        }
    };

    session.pause(Pause::Analysis).await;
    let decision = decide(&application);
    let summary = SummaryRenderer::new(config.grouping)
        .render(&decision)
        .context("Failed to render summary")?;
    session
        .show(&format!("\n{summary}\n"))
        .await
        .context("Failed to write to the terminal")?;

    let mut letter = None;
    if decision.eligible
        && session
            .confirm(DOWNLOAD_QUESTION)
            .await
            .context("Failed to read answer")?
    {
        let path = save_sanction_letter(&decision, config, today)?;
        session
            .show(&format!(
                "Sanction letter downloaded successfully! Saved to {}\n",
                path.display()
            ))
            .await
            .context("Failed to write to the terminal")?;
        letter = Some(path);
    }

    Ok(ChatReport {
        decision: Some(decision),
        letter,
    })
}

#[derive(Debug, Clone)]
pub struct QuoteReport {
    pub decision: LoanDecision,
    /// The rendered summary, ready to print.
    pub summary: String,
    pub letter: Option<PathBuf>,
}

/// Decides `answers` without any chat. With `write_letter`, an approved
/// application also gets its sanction letter saved; a rejected one does not.
pub fn run_quote(
    config: &AppConfig,
    answers: &RawApplication,
    write_letter: bool,
    today: NaiveDate,
) -> Result<QuoteReport> {
    let application = answers.validate().context("Invalid application")?;
    let decision = decide(&application);
    let summary = SummaryRenderer::new(config.grouping)
        .render(&decision)
        .context("Failed to render summary")?;

    let letter = match (write_letter, decision.eligible) {
        (true, true) => Some(save_sanction_letter(&decision, config, today)?),
        (true, false) => {
            warn!(name = %application.name, "no sanction letter for an ineligible application");
            None
        }
        (false, _) => None,
    };

    info!(name = %application.name, eligible = decision.eligible, "quote issued");
    Ok(QuoteReport {
        decision,
        summary,
        letter,
    })
}
