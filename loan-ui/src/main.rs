use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use tokio::io::BufReader;
use tracing::{debug, info};

use loan_core::validation::RawApplication;
use loan_ui::{AppConfig, logging, run_chat, run_quote};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Personal loan assistant.
///
/// Asks five questions, checks eligibility, shows the EMI and offers a
/// sanction letter for approved applications.
#[derive(Debug, Parser)]
#[command(name = "LoanAssistant", version)]
struct Cli {
    /// TOML configuration file. Defaults to `loan-assistant.toml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show assistant messages immediately.
    #[arg(long, global = true)]
    no_pacing: bool,

    /// Log filter, e.g. `debug` or `loan_core=trace`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Append logs to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Keep logging to the console while chatting.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory sanction letters are saved to.
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply through the interactive chat (the default).
    Chat,
    /// Decide a single application from command-line values.
    Quote(QuoteArgs),
}

#[derive(Debug, Args)]
struct QuoteArgs {
    #[arg(long)]
    name: String,

    /// Requested amount; separators such as `5,00,000` are fine.
    #[arg(long)]
    amount: String,

    /// Monthly salary.
    #[arg(long)]
    salary: String,

    /// Credit score between 300 and 900.
    #[arg(long)]
    credit_score: String,

    #[arg(long)]
    purpose: String,

    /// Also save the sanction letter if the application is approved.
    #[arg(long)]
    letter: bool,
}

impl QuoteArgs {
    fn answers(&self) -> RawApplication {
        RawApplication {
            name: self.name.clone(),
            loan_amount: self.amount.clone(),
            salary: self.salary.clone(),
            credit_score: self.credit_score.clone(),
            loan_purpose: self.purpose.clone(),
        }
    }
}

// ─── configuration ───────────────────────────────────────────────────────────

/// Loads the config file and lets command-line flags win over it.
fn resolve_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config =
        AppConfig::load_or_default(cli.config.as_deref()).context("Failed to load configuration")?;

    if cli.no_pacing {
        config.pacing.enabled = false;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = Some(level.clone());
    }
    if let Some(path) = &cli.log_file {
        config.log_file = Some(path.clone());
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    Ok(config)
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_default_logging();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if let Some(level) = &config.log_level {
        logging::set_log_level(level)?;
    }
    if let Some(path) = &config.log_file {
        logging::enable_file_logging(path)?;
    }
    debug!(?config, "configuration resolved");

    let today = Local::now().date_naive();

    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => {
            // Log lines would interleave with the conversation.
            if !cli.verbose {
                logging::set_console_enabled(false)?;
            }

            let input = BufReader::new(tokio::io::stdin());
            let report = run_chat(&config, input, tokio::io::stdout(), today).await;

            logging::set_console_enabled(true)?;
            let report = report?;
            info!(
                decided = report.decision.is_some(),
                letter = report.letter.is_some(),
                "chat finished"
            );
        }
        Command::Quote(args) => {
            let report = run_quote(&config, &args.answers(), args.letter, today)?;

            print!("{}", report.summary);
            match report.letter {
                Some(path) => println!("\nSanction letter saved to {}", path.display()),
                None if args.letter => {
                    println!("\nNo sanction letter: the application is not eligible.")
                }
                None => {}
            }
        }
    }

    Ok(())
}
