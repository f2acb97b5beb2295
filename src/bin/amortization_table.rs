//! Print a loan amortization schedule
//!
//! Generates the period-by-period schedule for the given loan terms and
//! prints interest/principal totals. Supports JSON output for API
//! integration via --json and CSV export via --csv.

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use underwriting_system::debt::{
    calculate_total_interest, calculate_total_principal, generate_amortization_schedule,
    AmortizationRow,
};

#[derive(Parser)]
#[command(name = "amortization_table", version, about = "Loan amortization schedule")]
struct Args {
    /// Loan principal
    #[arg(long, default_value_t = 16937.18)]
    principal: f64,

    /// Annual interest rate as a decimal (0.0525 = 5.25%)
    #[arg(long, default_value_t = 0.0525)]
    rate: f64,

    /// Amortization period in years
    #[arg(long, default_value_t = 30)]
    amortization_years: u32,

    /// Interest-only period in months
    #[arg(long, default_value_t = 0)]
    io_months: u32,

    /// Total loan term in months
    #[arg(long, default_value_t = 120)]
    total_months: u32,

    /// First payment date (YYYY-MM-DD)
    #[arg(long, default_value = "2026-04-01")]
    start_date: NaiveDate,

    /// Write the schedule to this CSV path
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Emit the schedule and totals as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct AmortizationResponse {
    schedule: Vec<AmortizationRow>,
    total_interest: f64,
    total_principal: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let schedule = generate_amortization_schedule(
        args.principal,
        args.rate,
        args.amortization_years * 12,
        args.io_months,
        args.total_months,
        args.start_date,
    );
    let total_interest = calculate_total_interest(&schedule);
    let total_principal = calculate_total_principal(&schedule);

    if args.json {
        let response = AmortizationResponse {
            schedule,
            total_interest,
            total_principal,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!(
        "Amortization: {:.2} at {:.2}%, {}yr schedule, {} months IO, {} month term\n",
        args.principal,
        args.rate * 100.0,
        args.amortization_years,
        args.io_months,
        args.total_months
    );
    println!(
        "{:>5} {:>12} {:>14} {:>12} {:>12} {:>12} {:>14}",
        "Pd", "Date", "BegBalance", "Payment", "Interest", "Principal", "EndBalance"
    );
    println!("{}", "-".repeat(86));
    for row in &schedule {
        println!(
            "{:>5} {:>12} {:>14.2} {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
            row.period,
            row.date,
            row.beginning_balance,
            row.payment,
            row.interest,
            row.principal,
            row.ending_balance,
        );
    }

    println!("\nTotals:");
    println!("  Interest:  {:.2}", total_interest);
    println!("  Principal: {:.2}", total_principal);

    if let Some(path) = &args.csv {
        let mut file =
            File::create(path).with_context(|| format!("unable to create {}", path.display()))?;
        writeln!(file, "Period,Date,BegBalance,Payment,Interest,Principal,EndBalance")?;
        for row in &schedule {
            writeln!(
                file,
                "{},{},{:.2},{:.2},{:.2},{:.2},{:.2}",
                row.period,
                row.date,
                row.beginning_balance,
                row.payment,
                row.interest,
                row.principal,
                row.ending_balance,
            )?;
        }
        println!("\nSchedule written to: {}", path.display());
    }

    Ok(())
}
