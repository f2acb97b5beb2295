//! Underwriting System CLI
//!
//! Runs a deal projection and prints the cash-flow table, return metrics,
//! and key milestone months. A scenario JSON can be supplied; otherwise a
//! built-in sample deal is projected.

use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use clap::Parser;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use underwriting_system::assumptions::{
    EscalationMethod, ExpenseAssumptions, RevenueAssumptions,
};
use underwriting_system::debt::LoanTerms;
use underwriting_system::projection::{AcquisitionTerms, ExitTerms};
use underwriting_system::waterfall::WaterfallConfig;
use underwriting_system::{DealTerms, ScenarioRunner, Tenant};

#[derive(Parser)]
#[command(name = "underwriting_system", version, about = "Real estate deal projection")]
struct Args {
    /// Scenario JSON file; omit to project the built-in sample deal
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Path for the full monthly cash-flow CSV
    #[arg(long, default_value = "cashflow_output.csv")]
    csv: PathBuf,

    /// Skip writing the CSV
    #[arg(long)]
    no_csv: bool,
}

/// Sample deal: three-tenant NNN retail building, 10-year hold,
/// 40% LTC interest-only loan, 90/10 waterfall with a 5% pref
fn sample_terms() -> DealTerms {
    DealTerms {
        acquisition: AcquisitionTerms {
            acquisition_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            hold_period_months: 120,
            purchase_price: 41_500.0,
            closing_costs: 500.0,
        },
        revenue: RevenueAssumptions {
            total_sf: 10_118.0,
            in_place_rent_psf: 193.15,
            rent_growth: 0.025,
            vacancy_rate: 0.0,
            nnn_lease: true,
            tenants: vec![
                Tenant {
                    name: "Suite A".to_string(),
                    rsf: 2_300.0,
                    in_place_rent_psf: 201.45,
                    market_rent_psf: 300.0,
                    lease_end_month: 83,
                    apply_rollover_costs: false,
                    free_rent_months: 0,
                    ti_buildout_months: 0,
                },
                Tenant {
                    name: "Suite B".to_string(),
                    rsf: 1_868.0,
                    in_place_rent_psf: 200.47,
                    market_rent_psf: 300.0,
                    lease_end_month: 50,
                    apply_rollover_costs: true,
                    free_rent_months: 10,
                    ti_buildout_months: 6,
                },
                Tenant {
                    name: "Suite C".to_string(),
                    rsf: 5_950.0,
                    in_place_rent_psf: 187.65,
                    market_rent_psf: 300.0,
                    lease_end_month: 210,
                    apply_rollover_costs: true,
                    free_rent_months: 10,
                    ti_buildout_months: 6,
                },
            ],
        },
        expenses: ExpenseAssumptions {
            fixed_opex_psf: 36.0,
            management_fee_percent: 0.04,
            property_tax_annual: 622.5,
            capex_reserve_psf: 5.0,
            expense_growth: 0.025,
            expense_escalation: EscalationMethod::ContinuousMonthly,
            property_tax_escalation: EscalationMethod::PropertyTaxAnnualStep,
            include_month0_capex: false,
        },
        exit: ExitTerms {
            exit_cap_rate: 0.05,
            sales_cost_percent: 0.01,
        },
        financing: Some(LoanTerms {
            amount: 16_937.18,
            interest_rate: 0.0525,
            io_months: 120,
            amortization_years: 30,
            origination_fee: 0.0,
            use_actual_365: true,
        }),
        waterfall: Some(WaterfallConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    println!("Underwriting System v0.1.0");
    println!("==========================\n");

    let runner = match &args.scenario {
        Some(path) => ScenarioRunner::from_json_file(path)
            .map_err(|e| anyhow!("failed to load scenario {}: {e}", path.display()))?,
        None => ScenarioRunner::new(sample_terms()),
    };

    let terms = runner.terms();
    println!("Deal:");
    println!("  Acquisition: {}", terms.acquisition.acquisition_date);
    println!("  Hold: {} months", terms.acquisition.hold_period_months);
    println!("  Purchase Price: ${:.0}K", terms.acquisition.purchase_price);
    println!("  Rentable Area: {:.0} SF", terms.revenue.total_sf);
    if let Some(loan) = &terms.financing {
        println!(
            "  Loan: ${:.2}K at {:.2}%, {} months IO",
            loan.amount,
            loan.interest_rate * 100.0,
            loan.io_months
        );
    }
    println!();

    let result = runner.run()?;

    // Print first 24 months to console
    println!("Projection Results ({} months):", result.monthly.rows.len());
    println!(
        "{:>5} {:>12} {:>10} {:>10} {:>10} {:>10} {:>10} {:>12} {:>12}",
        "Month", "Date", "BaseRent", "Reimb", "EffRev", "Expenses", "NOI", "DebtSvc", "LevCF"
    );
    println!("{}", "-".repeat(98));
    for row in result.monthly.rows.iter().take(24) {
        println!(
            "{:>5} {:>12} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>12.2} {:>12.2}",
            row.period,
            row.date,
            row.base_rent,
            row.reimbursement_revenue,
            row.effective_revenue,
            row.total_expenses,
            row.noi,
            row.debt_service,
            row.leveraged_cash_flow,
        );
    }
    if result.monthly.rows.len() > 24 {
        println!("... ({} more months)", result.monthly.rows.len() - 24);
    }

    // Write full results to CSV
    if !args.no_csv {
        let mut file = File::create(&args.csv)
            .with_context(|| format!("unable to create {}", args.csv.display()))?;
        writeln!(
            file,
            "Month,Date,BaseRent,Reimbursement,PotentialRevenue,VacancyLoss,EffectiveRevenue,FixedOpex,MgmtFee,PropertyTax,CapexReserve,TotalExpenses,NOI,AcquisitionCosts,ExitProceeds,Interest,Principal,DebtService,UnleveragedCF,LeveragedCF"
        )?;
        for row in &result.monthly.rows {
            writeln!(
                file,
                "{},{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
                row.period,
                row.date,
                row.base_rent,
                row.reimbursement_revenue,
                row.potential_revenue,
                row.vacancy_loss,
                row.effective_revenue,
                row.fixed_opex,
                row.management_fee,
                row.property_tax,
                row.capex_reserve,
                row.total_expenses,
                row.noi,
                row.acquisition_costs,
                row.exit_proceeds,
                row.interest_expense,
                row.principal_payment,
                row.debt_service,
                row.unleveraged_cash_flow,
                row.leveraged_cash_flow,
            )?;
        }
        println!("\nFull results written to: {}", args.csv.display());
    }

    // Metrics summary
    let metrics = &result.metrics;
    println!("\nReturn Metrics:");
    println!(
        "  Unleveraged: IRR {:.2}%  Multiple {:.2}x  Profit ${:.2}K",
        metrics.unleveraged_irr * 100.0,
        metrics.unleveraged_multiple,
        metrics.unleveraged_profit
    );
    if let (Some(irr), Some(multiple), Some(profit)) = (
        metrics.leveraged_irr,
        metrics.leveraged_multiple,
        metrics.leveraged_profit,
    ) {
        println!(
            "  Leveraged:   IRR {:.2}%  Multiple {:.2}x  Profit ${:.2}K",
            irr * 100.0,
            multiple,
            profit
        );
    }
    if let Some(waterfall) = &result.waterfall {
        println!(
            "  LP: equity ${:.2}K  IRR {}  Multiple {}",
            waterfall.lp_equity,
            metrics
                .lp_irr
                .map(|v| format!("{:.2}%", v * 100.0))
                .unwrap_or_else(|| "n/a".to_string()),
            metrics
                .lp_multiple
                .map(|v| format!("{:.2}x", v))
                .unwrap_or_else(|| "n/a".to_string()),
        );
        println!(
            "  GP: equity ${:.2}K  IRR {}  Multiple {}",
            waterfall.gp_equity,
            metrics
                .gp_irr
                .map(|v| format!("{:.2}%", v * 100.0))
                .unwrap_or_else(|| "n/a".to_string()),
            metrics
                .gp_multiple
                .map(|v| format!("{:.2}x", v))
                .unwrap_or_else(|| "n/a".to_string()),
        );
    }

    // Key milestone months for spreadsheet comparison
    println!("\nKey Milestones:");
    let hold = terms.acquisition.hold_period_months as usize;
    for &m in &[0usize, 1, 12, 13, 60, hold] {
        if let Some(row) = result.monthly.rows.get(m) {
            println!(
                "  Month {:>3}: NOI={:>10.2} UnlevCF={:>12.2} LevCF={:>12.2}",
                m, row.noi, row.unleveraged_cash_flow, row.leveraged_cash_flow
            );
        }
    }

    Ok(())
}
