//! Core projection engine for monthly deal cashflows
//!
//! Two passes over periods 0..=hold: the first computes every operating
//! line (rent, reimbursements, vacancy, expenses, NOI) and keeps the
//! figures unrounded; the second resolves capital events and debt service.
//! The split exists because exit value depends on NOI beyond the current
//! period, so the full NOI array must be known before the exit month can be
//! priced.

use crate::assumptions::continuous_monthly_factor;
use crate::util::{generate_monthly_dates, round_cents};

use super::cashflows::{CashflowResult, PeriodCashflow};
use super::terms::DealTerms;

/// Pass-1 operating figures for one month, unrounded
struct OperatingFigures {
    base_rent: f64,
    reimbursement_revenue: f64,
    potential_revenue: f64,
    vacancy_loss: f64,
    effective_revenue: f64,
    fixed_opex: f64,
    management_fee: f64,
    property_tax: f64,
    capex_reserve: f64,
    total_expenses: f64,
    noi: f64,
}

/// Main projection engine
///
/// Pure and synchronous: one call produces the full period-indexed table
/// for the configured deal, with no shared state between runs. Inputs are
/// expected pre-validated by the calling layer; a malformed scenario
/// surfaces as NaN/Inf in the output rather than being silently clamped.
pub struct CashflowEngine {
    terms: DealTerms,
}

impl CashflowEngine {
    /// Create an engine for a configured deal
    pub fn new(terms: DealTerms) -> Self {
        Self { terms }
    }

    /// The deal configuration this engine projects
    pub fn terms(&self) -> &DealTerms {
        &self.terms
    }

    /// Run the projection over periods 0..=hold_period_months
    pub fn project(&self) -> CashflowResult {
        let hold = self.terms.acquisition.hold_period_months;
        let dates = generate_monthly_dates(self.terms.acquisition.acquisition_date, hold);

        // Pass 1: operating figures for every month
        let operating: Vec<OperatingFigures> =
            (0..=hold).map(|period| self.operating_month(period)).collect();

        // Pass 2: capital events, debt service, bottom line
        let mut rows = Vec::with_capacity(operating.len());
        for period in 0..=hold {
            let figures = &operating[period as usize];

            let acquisition_costs = if period == 0 {
                self.terms.acquisition.total_cost()
            } else {
                0.0
            };

            let exit_proceeds = if period == hold {
                self.exit_proceeds(&operating, hold)
            } else {
                0.0
            };

            let (interest_expense, principal_payment, debt_service) =
                self.debt_service(period, &dates);

            let unleveraged_cf = figures.noi - acquisition_costs + exit_proceeds;
            let mut leveraged_cf = unleveraged_cf - debt_service;

            if let Some(loan) = self.financing() {
                if period == 0 {
                    // Loan funds at close, net of the origination fee
                    leveraged_cf += loan.net_proceeds();
                }
                if period == hold {
                    // Payoff at the original loan amount. The workbook
                    // ignores any principal amortized before exit, and
                    // parity requires the same.
                    leveraged_cf -= loan.amount;
                }
            }

            rows.push(PeriodCashflow {
                period,
                date: dates[period as usize],
                base_rent: round_cents(figures.base_rent),
                reimbursement_revenue: round_cents(figures.reimbursement_revenue),
                potential_revenue: round_cents(figures.potential_revenue),
                vacancy_loss: round_cents(figures.vacancy_loss),
                effective_revenue: round_cents(figures.effective_revenue),
                fixed_opex: round_cents(figures.fixed_opex),
                management_fee: round_cents(figures.management_fee),
                property_tax: round_cents(figures.property_tax),
                capex_reserve: round_cents(figures.capex_reserve),
                total_expenses: round_cents(figures.total_expenses),
                noi: round_cents(figures.noi),
                acquisition_costs: round_cents(acquisition_costs),
                exit_proceeds: round_cents(exit_proceeds),
                interest_expense: round_cents(interest_expense),
                principal_payment: round_cents(principal_payment),
                debt_service: round_cents(debt_service),
                unleveraged_cash_flow: round_cents(unleveraged_cf),
                leveraged_cash_flow: round_cents(leveraged_cf),
            });
        }

        CashflowResult { rows }
    }

    /// Configured loan, ignoring zero-amount placeholders
    fn financing(&self) -> Option<&crate::debt::LoanTerms> {
        self.terms.financing.as_ref().filter(|loan| loan.amount > 0.0)
    }

    /// Pass-1 operating figures for one month.
    ///
    /// NNN ordering matters and must not be rearranged: fixed expense
    /// reimbursements join potential revenue first, vacancy applies to that
    /// pre-variable total, the management fee is computed on the
    /// vacancy-adjusted figure, and the fee then comes back in as a
    /// variable reimbursement that vacancy does not touch.
    fn operating_month(&self, period: u32) -> OperatingFigures {
        let revenue = &self.terms.revenue;
        let expenses = &self.terms.expenses;

        // Acquisition month has no operations
        let base_rent = if period == 0 {
            0.0
        } else {
            revenue.monthly_base_rent(period)
        };

        let fixed_opex = expenses.monthly_fixed_opex(revenue.total_sf, period);
        let property_tax = expenses.monthly_property_tax(period);
        let capex_reserve = expenses.monthly_capex(revenue.total_sf, period);

        let fixed_reimbursement = if revenue.nnn_lease {
            fixed_opex + property_tax
        } else {
            0.0
        };

        let pre_variable_revenue = base_rent + fixed_reimbursement;
        let vacancy_loss = -pre_variable_revenue * revenue.vacancy_rate;

        let management_fee =
            (pre_variable_revenue + vacancy_loss) * expenses.management_fee_percent;
        let variable_reimbursement = if revenue.nnn_lease { management_fee } else { 0.0 };

        let potential_revenue = base_rent + fixed_reimbursement + variable_reimbursement;
        let effective_revenue = potential_revenue + vacancy_loss;

        let total_expenses = fixed_opex + management_fee + property_tax + capex_reserve;
        let noi = effective_revenue - total_expenses;

        OperatingFigures {
            base_rent,
            reimbursement_revenue: fixed_reimbursement + variable_reimbursement,
            potential_revenue,
            vacancy_loss,
            effective_revenue,
            fixed_opex,
            management_fee,
            property_tax,
            capex_reserve,
            total_expenses,
            noi,
        }
    }

    /// Forward 12-month NOI for exit pricing: actual NOI for any forward
    /// month still inside the hold window, the exit month's NOI escalated
    /// at rent growth for months beyond it.
    fn forward_twelve_month_noi(&self, operating: &[OperatingFigures], exit_period: u32) -> f64 {
        let rent_growth = self.terms.revenue.rent_growth;
        let exit_noi = operating[exit_period as usize].noi;

        (1..=12u32)
            .map(|offset| match operating.get((exit_period + offset) as usize) {
                Some(figures) => figures.noi,
                None => exit_noi * continuous_monthly_factor(rent_growth, offset),
            })
            .sum()
    }

    /// Net exit proceeds at the final period: forward NOI capped at the
    /// exit cap rate, less sales costs
    fn exit_proceeds(&self, operating: &[OperatingFigures], exit_period: u32) -> f64 {
        let exit = &self.terms.exit;
        if exit.exit_cap_rate <= 0.0 {
            return 0.0;
        }

        let forward_noi = self.forward_twelve_month_noi(operating, exit_period);
        let gross_value = forward_noi / exit.exit_cap_rate;
        let sales_costs = gross_value * exit.sales_cost_percent;
        gross_value - sales_costs
    }

    /// (interest, principal, total debt service) for one period.
    ///
    /// Interest accrues on the original loan amount either actual/365 on
    /// the days in the period or as a flat rate/12. During the IO window
    /// no principal is due; afterwards the principal component is the level
    /// payment on the full original amortization term less interest.
    fn debt_service(&self, period: u32, dates: &[chrono::NaiveDate]) -> (f64, f64, f64) {
        let Some(loan) = self.financing() else {
            return (0.0, 0.0, 0.0);
        };
        if period == 0 {
            return (0.0, 0.0, 0.0);
        }

        let days = (dates[period as usize] - dates[period as usize - 1]).num_days();
        let interest = loan.periodic_interest(days);

        if period <= loan.io_months {
            (interest, 0.0, interest)
        } else {
            let payment = loan.level_payment();
            (interest, payment - interest, payment)
        }
    }
}
