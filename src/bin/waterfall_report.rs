//! Waterfall distribution report
//!
//! Projects a scenario, runs the LP/GP waterfall, and prints per-tier
//! totals and per-party metrics. Supports JSON output for API integration
//! via --json.

use anyhow::anyhow;
use chrono::NaiveDate;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use underwriting_system::assumptions::{ExpenseAssumptions, RevenueAssumptions};
use underwriting_system::debt::LoanTerms;
use underwriting_system::projection::{AcquisitionTerms, ExitTerms};
use underwriting_system::waterfall::{WaterfallConfig, WaterfallSummary};
use underwriting_system::{DealTerms, ScenarioRunner};

#[derive(Parser)]
#[command(name = "waterfall_report", version, about = "LP/GP waterfall report")]
struct Args {
    /// Scenario JSON file; omit to run the built-in sample deal
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Emit the full report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct WaterfallReport {
    lp_equity: f64,
    gp_equity: f64,
    lp_irr: Option<f64>,
    lp_multiple: Option<f64>,
    gp_irr: Option<f64>,
    gp_multiple: Option<f64>,
    summary: WaterfallSummary,
}

/// Sample deal: 60-month hold, 60% LTC, 90/10 equity with a 5% pref
fn sample_terms() -> DealTerms {
    DealTerms {
        acquisition: AcquisitionTerms {
            acquisition_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            hold_period_months: 60,
            purchase_price: 10_000.0,
            closing_costs: 150.0,
        },
        revenue: RevenueAssumptions {
            total_sf: 50_000.0,
            in_place_rent_psf: 20.0,
            rent_growth: 0.03,
            vacancy_rate: 0.05,
            nnn_lease: false,
            tenants: Vec::new(),
        },
        expenses: ExpenseAssumptions {
            fixed_opex_psf: 5.0,
            management_fee_percent: 0.03,
            property_tax_annual: 100.0,
            capex_reserve_psf: 0.5,
            expense_growth: 0.025,
            expense_escalation: Default::default(),
            property_tax_escalation: Default::default(),
            include_month0_capex: false,
        },
        exit: ExitTerms {
            exit_cap_rate: 0.06,
            sales_cost_percent: 0.02,
        },
        financing: Some(LoanTerms {
            amount: 6_000.0,
            interest_rate: 0.05,
            io_months: 60,
            amortization_years: 30,
            origination_fee: 0.0,
            use_actual_365: false,
        }),
        waterfall: Some(WaterfallConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let runner = match &args.scenario {
        Some(path) => ScenarioRunner::from_json_file(path)
            .map_err(|e| anyhow!("failed to load scenario {}: {e}", path.display()))?,
        None => ScenarioRunner::new(sample_terms()),
    };

    let result = runner.run()?;
    let waterfall = result
        .waterfall
        .as_ref()
        .ok_or_else(|| anyhow!("scenario has no waterfall configured"))?;

    let report = WaterfallReport {
        lp_equity: waterfall.lp_equity,
        gp_equity: waterfall.gp_equity,
        lp_irr: result.metrics.lp_irr,
        lp_multiple: result.metrics.lp_multiple,
        gp_irr: result.metrics.gp_irr,
        gp_multiple: result.metrics.gp_multiple,
        summary: waterfall.summary.clone(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Waterfall Report");
    println!("================\n");
    println!("Equity:");
    println!("  LP: ${:.2}K", report.lp_equity);
    println!("  GP: ${:.2}K", report.gp_equity);

    println!("\nDistribution totals:");
    println!("  Return of capital: ${:.2}K", report.summary.total_equity_paydown);
    println!("  Preferred return:  ${:.2}K", report.summary.total_preferred_return);
    println!("  Profit split:      ${:.2}K", report.summary.total_profit);
    println!("  GP promote:        ${:.2}K", report.summary.total_promote);
    println!("  Total to LP:       ${:.2}K", report.summary.total_to_lp);
    println!("  Total to GP:       ${:.2}K", report.summary.total_to_gp);

    println!("\nParty metrics:");
    match report.lp_irr {
        Some(irr) => println!("  LP IRR: {:.2}%", irr * 100.0),
        None => println!("  LP IRR: did not converge"),
    }
    if let Some(multiple) = report.lp_multiple {
        println!("  LP Multiple: {:.2}x", multiple);
    }
    match report.gp_irr {
        Some(irr) => println!("  GP IRR: {:.2}%", irr * 100.0),
        None => println!("  GP IRR: did not converge"),
    }
    if let Some(multiple) = report.gp_multiple {
        println!("  GP Multiple: {:.2}x", multiple);
    }

    // Distribution rows around the exit month carry most of the cash
    println!("\nLargest distribution periods:");
    let mut rows: Vec<_> = waterfall.distributions.iter().collect();
    rows.sort_by(|a, b| {
        (b.total_to_lp + b.total_to_gp)
            .partial_cmp(&(a.total_to_lp + a.total_to_gp))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for row in rows.iter().take(5) {
        println!(
            "  Month {:>3}: cash {:>12.2}  LP {:>12.2}  GP {:>12.2}",
            row.period, row.cash_flow, row.total_to_lp, row.total_to_gp
        );
    }

    Ok(())
}
