//! Cashflow output structures for deal projections

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::util::round_cents;

/// A single row of projection output for one month. All monetary fields are
/// $000s rounded to cent precision when the row is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodCashflow {
    // Timing
    pub period: u32,
    pub date: NaiveDate,

    // Revenue
    pub base_rent: f64,
    pub reimbursement_revenue: f64,
    pub potential_revenue: f64,
    pub vacancy_loss: f64,
    pub effective_revenue: f64,

    // Expenses
    pub fixed_opex: f64,
    pub management_fee: f64,
    pub property_tax: f64,
    pub capex_reserve: f64,
    pub total_expenses: f64,

    // Operating result
    pub noi: f64,

    // Capital events
    pub acquisition_costs: f64,
    pub exit_proceeds: f64,

    // Debt service
    pub interest_expense: f64,
    pub principal_payment: f64,
    pub debt_service: f64,

    // Bottom line
    pub unleveraged_cash_flow: f64,
    pub leveraged_cash_flow: f64,
}

/// Deal-year aggregation of the monthly series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualCashflow {
    /// Deal year, 1-based (periods 0-11 are year 1)
    pub year: u32,
    pub potential_revenue: f64,
    pub effective_revenue: f64,
    pub total_expenses: f64,
    pub noi: f64,
    pub debt_service: f64,
    pub unleveraged_cash_flow: f64,
    pub leveraged_cash_flow: f64,
}

/// Summary totals for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashflowSummary {
    pub total_months: u32,
    pub acquisition_costs: f64,
    pub exit_proceeds: f64,
    pub total_effective_revenue: f64,
    pub total_expenses: f64,
    pub total_noi: f64,
    pub total_debt_service: f64,
    pub total_unleveraged_cf: f64,
    pub total_leveraged_cf: f64,
}

/// Complete monthly projection for one deal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashflowResult {
    pub rows: Vec<PeriodCashflow>,
}

impl CashflowResult {
    /// Date series aligned with the rows (for XIRR)
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|row| row.date).collect()
    }

    /// Unleveraged cash-flow series
    pub fn unleveraged_series(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.unleveraged_cash_flow).collect()
    }

    /// Leveraged cash-flow series
    pub fn leveraged_series(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.leveraged_cash_flow).collect()
    }

    /// Sum one field over an inclusive period range
    pub fn sum_range<F>(&self, start_period: u32, end_period: u32, field: F) -> f64
    where
        F: Fn(&PeriodCashflow) -> f64,
    {
        self.rows
            .iter()
            .filter(|row| row.period >= start_period && row.period <= end_period)
            .map(field)
            .sum()
    }

    /// Collapse the monthly series into deal-year totals. Buckets are
    /// 12-month windows from acquisition, so a 120-month hold produces ten
    /// full years plus the exit month in year 11.
    pub fn annualize(&self) -> Vec<AnnualCashflow> {
        let mut annual: Vec<AnnualCashflow> = Vec::new();

        for row in &self.rows {
            let year = row.period / 12 + 1;
            if annual.last().map(|y| y.year) != Some(year) {
                annual.push(AnnualCashflow {
                    year,
                    potential_revenue: 0.0,
                    effective_revenue: 0.0,
                    total_expenses: 0.0,
                    noi: 0.0,
                    debt_service: 0.0,
                    unleveraged_cash_flow: 0.0,
                    leveraged_cash_flow: 0.0,
                });
            }
            let totals = annual.last_mut().unwrap();
            totals.potential_revenue += row.potential_revenue;
            totals.effective_revenue += row.effective_revenue;
            totals.total_expenses += row.total_expenses;
            totals.noi += row.noi;
            totals.debt_service += row.debt_service;
            totals.unleveraged_cash_flow += row.unleveraged_cash_flow;
            totals.leveraged_cash_flow += row.leveraged_cash_flow;
        }

        for totals in &mut annual {
            totals.potential_revenue = round_cents(totals.potential_revenue);
            totals.effective_revenue = round_cents(totals.effective_revenue);
            totals.total_expenses = round_cents(totals.total_expenses);
            totals.noi = round_cents(totals.noi);
            totals.debt_service = round_cents(totals.debt_service);
            totals.unleveraged_cash_flow = round_cents(totals.unleveraged_cash_flow);
            totals.leveraged_cash_flow = round_cents(totals.leveraged_cash_flow);
        }

        annual
    }

    /// Summary totals across the projection
    pub fn summary(&self) -> CashflowSummary {
        CashflowSummary {
            total_months: self.rows.len() as u32,
            acquisition_costs: self.rows.first().map(|r| r.acquisition_costs).unwrap_or(0.0),
            exit_proceeds: self.rows.last().map(|r| r.exit_proceeds).unwrap_or(0.0),
            total_effective_revenue: self.rows.iter().map(|r| r.effective_revenue).sum(),
            total_expenses: self.rows.iter().map(|r| r.total_expenses).sum(),
            total_noi: self.rows.iter().map(|r| r.noi).sum(),
            total_debt_service: self.rows.iter().map(|r| r.debt_service).sum(),
            total_unleveraged_cf: self.rows.iter().map(|r| r.unleveraged_cash_flow).sum(),
            total_leveraged_cf: self.rows.iter().map(|r| r.leveraged_cash_flow).sum(),
        }
    }

    /// First calendar year in the series (for display)
    pub fn start_year(&self) -> Option<i32> {
        self.rows.first().map(|row| row.date.year())
    }
}
