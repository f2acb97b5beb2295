//! Loan payment and amortization schedule calculations
//!
//! Matches the workbook's PMT/IPMT/PPMT behavior: level payment on the
//! amortizing term, interest-only window with unchanged balance, and the
//! payment re-derived each period from the remaining amortization term.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::util::{add_months, round_cents};

/// One row of an amortization schedule, values in the loan's currency unit
/// rounded to cent precision at storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub period: u32,
    pub date: NaiveDate,
    pub beginning_balance: f64,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub ending_balance: f64,
}

/// Level monthly payment. Workbook PMT().
///
/// Returns 0 for a non-positive principal or term; straight-line when the
/// periodic rate is zero (never a division fault).
pub fn calculate_payment(principal: f64, annual_rate: f64, term_months: u32) -> f64 {
    if principal <= 0.0 || term_months == 0 {
        return 0.0;
    }

    let monthly_rate = annual_rate / 12.0;
    if monthly_rate == 0.0 {
        return principal / term_months as f64;
    }

    let growth = (1.0 + monthly_rate).powi(term_months as i32);
    principal * monthly_rate * growth / (growth - 1.0)
}

/// Closed-form remaining balance after `payments_completed` level payments,
/// floored at zero
pub fn calculate_remaining_balance(
    principal: f64,
    annual_rate: f64,
    term_months: u32,
    payments_completed: u32,
) -> f64 {
    let monthly_rate = annual_rate / 12.0;
    let payment = calculate_payment(principal, annual_rate, term_months);

    if monthly_rate == 0.0 {
        return (principal - payment * payments_completed as f64).max(0.0);
    }

    let growth = (1.0 + monthly_rate).powi(payments_completed as i32);
    let balance = principal * growth - payment * (growth - 1.0) / monthly_rate;
    balance.max(0.0)
}

/// Full amortization schedule for periods 1..=total_months.
///
/// During the interest-only window the balance is untouched. Afterwards the
/// payment is recomputed on the amortization term remaining at that period,
/// principal is clamped to the outstanding balance, and once the remaining
/// term reaches zero the balance is paid off in full. Stops early when the
/// balance hits zero.
pub fn generate_amortization_schedule(
    principal: f64,
    annual_rate: f64,
    amortization_months: u32,
    io_months: u32,
    total_months: u32,
    start_date: NaiveDate,
) -> Vec<AmortizationRow> {
    let mut schedule = Vec::new();
    let mut balance = principal;
    let monthly_rate = annual_rate / 12.0;

    for period in 1..=total_months {
        let date = add_months(start_date, period - 1);
        let interest = balance * monthly_rate;

        let (payment, principal_pmt) = if period <= io_months {
            (interest, 0.0)
        } else {
            let remaining_amort =
                amortization_months as i64 - (period as i64 - io_months as i64 - 1);
            if remaining_amort > 0 {
                let payment = calculate_payment(balance, annual_rate, remaining_amort as u32);
                let principal_pmt = (payment - interest).min(balance);
                (principal_pmt + interest, principal_pmt)
            } else {
                // Past the amortization horizon: pay off whatever is left
                (balance + interest, balance)
            }
        };

        let ending_balance = balance - principal_pmt;

        schedule.push(AmortizationRow {
            period,
            date,
            beginning_balance: round_cents(balance),
            payment: round_cents(payment),
            interest: round_cents(interest),
            principal: round_cents(principal_pmt),
            ending_balance: round_cents(ending_balance.max(0.0)),
        });

        balance = ending_balance.max(0.0);
        if balance == 0.0 {
            break;
        }
    }

    schedule
}

/// Total interest paid across a schedule
pub fn calculate_total_interest(schedule: &[AmortizationRow]) -> f64 {
    schedule.iter().map(|row| row.interest).sum()
}

/// Total principal repaid across a schedule
pub fn calculate_total_principal(schedule: &[AmortizationRow]) -> f64 {
    schedule.iter().map(|row| row.principal).sum()
}

/// Total debt service (P+I) for an inclusive period range
pub fn calculate_debt_service(schedule: &[AmortizationRow], start_period: u32, end_period: u32) -> f64 {
    schedule
        .iter()
        .filter(|row| row.period >= start_period && row.period <= end_period)
        .map(|row| row.payment)
        .sum()
}

/// Debt Service Coverage Ratio for one period
pub fn calculate_dscr(noi: f64, debt_service: f64) -> f64 {
    if debt_service == 0.0 {
        f64::INFINITY
    } else {
        noi / debt_service
    }
}

/// Loan constant: annual debt service over the loan amount
pub fn calculate_loan_constant(principal: f64, annual_rate: f64, amortization_years: u32) -> f64 {
    if principal <= 0.0 {
        return 0.0;
    }
    let monthly_payment = calculate_payment(principal, annual_rate, amortization_years * 12);
    monthly_payment * 12.0 / principal
}
