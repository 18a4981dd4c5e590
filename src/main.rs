//! Mortgage Calculator CLI
//!
//! Command-line interface for loan summaries, schedules and comparisons

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use mortgage_calculator::config::{ResolvedTerms, TermsOverrides};
use mortgage_calculator::loan::document::parse_start_date;
use mortgage_calculator::report::{
    cost_breakdown, payment_dates, round_currency, write_schedule_csv, yearly_breakdown,
};
use mortgage_calculator::{AmortizationSchedule, MortgageDocument, ScenarioRunner, Summary};

#[derive(Parser)]
#[command(name = "mortgage-calc")]
#[command(version, about = "Fixed-rate mortgage amortization calculator")]
struct CommandLine {
    #[command(flatten)]
    loan: LoanArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct LoanArgs {
    /// Loan amount
    #[arg(long, global = true, allow_hyphen_values = true)]
    principal: Option<f64>,

    /// Annual interest rate in percent (5 means 5%)
    #[arg(long, global = true, allow_hyphen_values = true)]
    rate: Option<f64>,

    /// Loan duration in years
    #[arg(long, global = true, allow_hyphen_values = true)]
    years: Option<i32>,

    /// Mortgage document (JSON) to read terms from
    #[arg(long, short, global = true)]
    input: Option<PathBuf>,

    /// Date of the first payment (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = parse_start_date)]
    start_date: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly payment, total interest and total cost
    Summary,
    /// Month-by-month amortization schedule
    Schedule {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Only show the first N months (table format)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Principal and interest paid per loan year
    Yearly,
    /// Compare the loan across several rates and/or durations
    Compare {
        /// Annual rates in percent, comma separated
        #[arg(long, value_delimiter = ',')]
        rates: Vec<f64>,
        /// Durations in years, comma separated
        #[arg(long = "durations", value_delimiter = ',')]
        durations: Vec<i32>,
    },
    /// Write the loan terms as a mortgage document
    Export {
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

fn main() {
    env_logger::init();

    if let Err(e) = run(CommandLine::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: CommandLine) -> Result<()> {
    let resolved = resolve_terms(&cli.loan)?;

    match cli.command.unwrap_or(Commands::Summary) {
        Commands::Summary => print_summary(&resolved),
        Commands::Schedule { format, output, limit } => {
            let schedule = resolved.terms.schedule()?;
            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("Unable to create {}", path.display()))?;
                    write_schedule(&schedule, resolved.start_date, format, limit, BufWriter::new(file))?;
                    println!("Schedule written to: {}", path.display());
                    Ok(())
                }
                None => write_schedule(&schedule, resolved.start_date, format, limit, io::stdout().lock()),
            }
        }
        Commands::Yearly => print_yearly(&resolved),
        Commands::Compare { rates, durations } => print_comparison(&resolved, &rates, &durations),
        Commands::Export { output } => export_document(&resolved, output.as_deref()),
    }
}

/// CLI flags, then the input document, then environment, then defaults
fn resolve_terms(args: &LoanArgs) -> Result<ResolvedTerms> {
    let cli = TermsOverrides {
        principal: args.principal,
        annual_rate_percent: args.rate,
        years: args.years,
        start_date: args.start_date,
    };

    let document = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Unable to open {}", path.display()))?;
            let document = MortgageDocument::from_reader(BufReader::new(file))
                .with_context(|| format!("Unable to import {}", path.display()))?;
            TermsOverrides::from_document(&document)
                .with_context(|| format!("Invalid loan terms in {}", path.display()))?
        }
        None => TermsOverrides::default(),
    };

    let resolved = cli
        .or(document)
        .or(TermsOverrides::from_env())
        .resolve()
        .context("Invalid loan terms")?;
    Ok(resolved)
}

fn print_summary(resolved: &ResolvedTerms) -> Result<()> {
    let terms = &resolved.terms;
    let summary = Summary::from_terms(terms)?;
    let split = cost_breakdown(&summary);

    println!("Loan: {:.2} at {}% over {} years ({} payments)",
        terms.principal, terms.annual_rate_percent, terms.years, terms.total_payments());
    if let Some(start) = resolved.start_date {
        println!("  First payment:  {}", start);
    }
    println!();
    println!("  Monthly payment: {:>14.2}", round_currency(summary.monthly_payment));
    println!("  Total interest:  {:>14.2}", round_currency(summary.total_interest));
    println!("  Total cost:      {:>14.2}", round_currency(summary.total_cost));
    println!();
    println!("  Principal share: {:>13.1}%", split.principal_share * 100.0);
    println!("  Interest share:  {:>13.1}%", split.interest_share * 100.0);
    Ok(())
}

fn write_schedule<W: Write>(
    schedule: &AmortizationSchedule,
    start_date: Option<NaiveDate>,
    format: OutputFormat,
    limit: Option<usize>,
    mut out: W,
) -> Result<()> {
    match format {
        OutputFormat::Csv => write_schedule_csv(schedule, &mut out)?,
        OutputFormat::Json => {
            match start_date {
                Some(start) => serde_json::to_writer_pretty(&mut out, &payment_dates(schedule, start)?)?,
                None => serde_json::to_writer_pretty(&mut out, schedule.entries())?,
            }
            writeln!(out)?;
        }
        OutputFormat::Table => {
            let dates = match start_date {
                Some(start) => Some(payment_dates(schedule, start)?),
                None => None,
            };
            let shown = limit.unwrap_or(schedule.len()).min(schedule.len());

            writeln!(out, "{:>5} {:>10} {:>12} {:>12} {:>12} {:>14} {:>14}",
                "Month", "Due", "Payment", "Principal", "Interest", "Total Paid", "Balance")?;
            writeln!(out, "{}", "-".repeat(85))?;

            for (i, row) in schedule.iter().take(shown).enumerate() {
                let due = dates
                    .as_ref()
                    .map(|d| d[i].due_date.to_string())
                    .unwrap_or_default();
                writeln!(out, "{:>5} {:>10} {:>12.2} {:>12.2} {:>12.2} {:>14.2} {:>14.2}",
                    row.month,
                    due,
                    round_currency(row.monthly_payment),
                    round_currency(row.principal_portion),
                    round_currency(row.interest_portion),
                    round_currency(row.total_paid),
                    // -0.00 from residual drift prints as 0.00
                    round_currency(row.remaining_balance) + 0.0,
                )?;
            }

            if schedule.len() > shown {
                writeln!(out, "... ({} more months)", schedule.len() - shown)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn print_yearly(resolved: &ResolvedTerms) -> Result<()> {
    let schedule = resolved.terms.schedule()?;

    println!("{:>4} {:>14} {:>14} {:>14}", "Year", "Principal", "Interest", "Total");
    println!("{}", "-".repeat(49));
    for year in yearly_breakdown(&schedule) {
        println!("{:>4} {:>14.2} {:>14.2} {:>14.2}",
            year.year,
            round_currency(year.principal),
            round_currency(year.interest),
            round_currency(year.total()),
        );
    }
    Ok(())
}

fn print_comparison(resolved: &ResolvedTerms, rates: &[f64], durations: &[i32]) -> Result<()> {
    if rates.is_empty() && durations.is_empty() {
        anyhow::bail!("compare needs --rates and/or --durations");
    }

    let runner = ScenarioRunner::new(resolved.terms);
    let mut results = Vec::new();
    if !rates.is_empty() {
        results.extend(runner.rate_sweep(rates)?);
    }
    if !durations.is_empty() {
        results.extend(runner.duration_sweep(durations)?);
    }

    println!("{:>14} {:>8} {:>6} {:>12} {:>14} {:>14}",
        "Principal", "Rate %", "Years", "Payment", "Interest", "Total Cost");
    println!("{}", "-".repeat(73));
    for result in &results {
        println!("{:>14.2} {:>8.3} {:>6} {:>12.2} {:>14.2} {:>14.2}",
            result.terms.principal,
            result.terms.annual_rate_percent,
            result.terms.years,
            round_currency(result.summary.monthly_payment),
            round_currency(result.summary.total_interest),
            round_currency(result.summary.total_cost),
        );
    }
    Ok(())
}

fn export_document(resolved: &ResolvedTerms, output: Option<&Path>) -> Result<()> {
    let document = MortgageDocument::from_terms(&resolved.terms, resolved.start_date);

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Unable to create {}", path.display()))?;
            document.to_writer(BufWriter::new(file))?;
            println!("Mortgage document written to: {}", path.display());
        }
        None => println!("{}", document.to_json_pretty()?),
    }
    Ok(())
}
