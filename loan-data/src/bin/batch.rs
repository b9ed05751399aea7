use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use loan_core::format::{DigitGrouping, format_currency, format_rate};
use loan_data::ApplicationLoader;
use tracing_subscriber::EnvFilter;

/// Evaluate a file of loan applications and print one decision per line.
///
/// The CSV file should have the following columns:
/// - name: The applicant's name
/// - loan_amount: Requested amount (separators allowed when quoted)
/// - salary: Monthly salary
/// - credit_score: Credit score between 300 and 900
/// - loan_purpose: What the loan is for
#[derive(Parser, Debug)]
#[command(name = "loan-batch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing applications
    #[arg(short, long)]
    file: PathBuf,

    /// Digit grouping for amounts: `indian` or `international`
    #[arg(short, long, default_value = "indian")]
    grouping: DigitGrouping,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let applications = ApplicationLoader::load(file)
        .with_context(|| format!("Failed to load applications: {}", args.file.display()))?;

    let decisions = ApplicationLoader::evaluate(&applications);

    println!(
        "{:<24} {:<10} {:<12} {:>12} {:>16}",
        "Name", "Decision", "Rate", "EMI", "Total Payable"
    );
    for decision in &decisions {
        let (status, emi, total) = match decision.total_payable() {
            Some(total) => (
                "Approved",
                format_currency(decision.emi, args.grouping),
                format_currency(total, args.grouping),
            ),
            None => ("Rejected", "N/A".to_string(), "N/A".to_string()),
        };
        println!(
            "{:<24} {:<10} {:<12} {:>12} {:>16}",
            decision.application.name,
            status,
            format_rate(decision.interest_rate),
            emi,
            total
        );
    }

    let approved = decisions.iter().filter(|d| d.eligible).count();
    println!(
        "\n{approved} of {} applications approved.",
        decisions.len()
    );

    Ok(())
}
