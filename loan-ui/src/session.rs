//! Drives an [`ApplicationFlow`] over a line-oriented terminal.
//!
//! The session is generic over tokio's async I/O traits so the same code runs
//! against stdin/stdout and against in-memory buffers in tests.

use std::io;

use loan_core::LoanApplication;
use loan_core::flow::{ApplicationFlow, BotMessage, FlowOutcome, FlowSettings, Pause, Step};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::config::PacingConfig;

const TYPING_INDICATOR: &str = "Assistant is typing...";

/// Sleeps for the configured pauses. A disabled pacer never sleeps.
#[derive(Debug, Clone)]
pub struct Pacer {
    config: PacingConfig,
}

impl Pacer {
    pub fn new(config: PacingConfig) -> Self {
        Self { config }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub async fn pause(
        &self,
        pause: Pause,
    ) {
        let delay = self.config.delay(pause);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    pub async fn typing(&self) {
        let delay = self.config.typing();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// How a chat ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed(LoanApplication),
    /// Input closed before the last answer was accepted.
    Abandoned,
}

pub struct ChatSession<R, W> {
    input: R,
    output: W,
    pacer: Pacer,
}

impl<R, W> ChatSession<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(
        input: R,
        output: W,
        pacing: PacingConfig,
    ) -> Self {
        Self {
            input,
            output,
            pacer: Pacer::new(pacing),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub async fn pause(
        &self,
        pause: Pause,
    ) {
        self.pacer.pause(pause).await;
    }

    /// Writes `text` verbatim and flushes.
    pub async fn show(
        &mut self,
        text: &str,
    ) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await
    }

    /// Shows one assistant message after its pause, with a typing indicator
    /// when pacing is on.
    pub async fn say(
        &mut self,
        message: &BotMessage,
    ) -> io::Result<()> {
        self.pacer.pause(message.pause).await;

        if self.pacer.is_enabled() {
            self.show(TYPING_INDICATOR).await?;
            self.pacer.typing().await;
            let blank = " ".repeat(TYPING_INDICATOR.len());
            self.show(&format!("\r{blank}\r")).await?;
        }

        self.show(&format!("Assistant: {}\n", message.text)).await
    }

    async fn say_all(
        &mut self,
        messages: &[BotMessage],
    ) -> io::Result<()> {
        for message in messages {
            self.say(message).await?;
        }
        Ok(())
    }

    /// Next non-blank line with its line ending removed, or `None` at EOF.
    ///
    /// Bytes that are not UTF-8 become U+FFFD, so a garbled line is an
    /// answer to reject rather than a read failure.
    async fn read_answer(&mut self) -> io::Result<Option<String>> {
        let mut line = Vec::new();
        loop {
            line.clear();
            if self.input.read_until(b'\n', &mut line).await? == 0 {
                return Ok(None);
            }
            let text = String::from_utf8_lossy(&line);
            let answer = text.trim_end_matches(['\r', '\n']);
            if !answer.trim().is_empty() {
                return Ok(Some(answer.to_string()));
            }
        }
    }

    async fn prompt(
        &mut self,
        step: Step,
    ) -> io::Result<()> {
        self.show(&format!(
            "[{}/{}] {}\n> ",
            step.number(),
            Step::COUNT,
            step.placeholder()
        ))
        .await
    }

    /// Runs the question-and-answer flow until every answer is accepted or
    /// the input ends.
    pub async fn collect(
        &mut self,
        settings: FlowSettings,
    ) -> io::Result<SessionOutcome> {
        let (mut flow, greeting) = ApplicationFlow::start(settings);
        self.say_all(&greeting).await?;

        loop {
            self.prompt(flow.step()).await?;
            let Some(answer) = self.read_answer().await? else {
                info!(step = ?flow.step(), "input closed, session abandoned");
                return Ok(SessionOutcome::Abandoned);
            };

            flow = match flow.submit(&answer) {
                FlowOutcome::Rejected { flow, message, .. } => {
                    self.say(&message).await?;
                    flow
                }
                FlowOutcome::Advanced { flow, messages } => {
                    self.say_all(&messages).await?;
                    flow
                }
                FlowOutcome::Completed {
                    application,
                    messages,
                } => {
                    self.say_all(&messages).await?;
                    info!(name = %application.name, "application collected");
                    return Ok(SessionOutcome::Completed(application));
                }
            };
        }
    }

    /// Asks a yes/no question. `y`, `yes` and `download` count as yes; EOF
    /// counts as no.
    pub async fn confirm(
        &mut self,
        question: &str,
    ) -> io::Result<bool> {
        self.show(&format!("{question} [y/N]\n> ")).await?;
        let accepted = match self.read_answer().await? {
            Some(answer) => matches!(
                answer.trim().to_lowercase().as_str(),
                "y" | "yes" | "download"
            ),
            None => false,
        };
        debug!(accepted, "confirmation answered");
        Ok(accepted)
    }
}
