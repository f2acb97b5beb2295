//! IRR and NPV calculations
//!
//! Newton-Raphson root finder matching the workbook's IRR()/XIRR()
//! behavior: periodic discounting over integer period indexes for IRR,
//! actual-days-over-365 fractional years for XIRR.

use chrono::NaiveDate;

use crate::error::CalcError;

/// Iteration cap for the Newton-Raphson solver (hard cap, not wall-clock)
pub const MAX_ITERATIONS: u32 = 100;
/// Convergence tolerance on the rate update, also the degenerate-derivative
/// threshold
pub const TOLERANCE: f64 = 1e-7;
/// Initial rate guess
pub const DEFAULT_GUESS: f64 = 0.1;

/// Net present value of periodic cash flows at a discount rate.
/// Period indexes start at 0, so the first flow is undiscounted.
pub fn calculate_npv(cash_flows: &[f64], discount_rate: f64) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .map(|(period, &cf)| cf / (1.0 + discount_rate).powi(period as i32))
        .sum()
}

/// Derivative of NPV with respect to the rate
fn npv_derivative(cash_flows: &[f64], rate: f64) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .map(|(period, &cf)| -(period as f64 * cf) / (1.0 + rate).powi(period as i32 + 1))
        .sum()
}

/// Require at least two flows with mixed signs before attempting a root find
fn validate_cash_flows(cash_flows: &[f64]) -> Result<(), CalcError> {
    if cash_flows.len() < 2 {
        return Err(CalcError::TooFewCashFlows);
    }

    let has_positive = cash_flows.iter().any(|&cf| cf > 0.0);
    let has_negative = cash_flows.iter().any(|&cf| cf < 0.0);
    if !has_positive || !has_negative {
        return Err(CalcError::UniformSigns);
    }

    Ok(())
}

/// Periodic IRR with the default initial guess
pub fn calculate_irr(cash_flows: &[f64]) -> Result<f64, CalcError> {
    calculate_irr_from(cash_flows, DEFAULT_GUESS)
}

/// Periodic IRR via Newton-Raphson from an explicit initial guess.
///
/// Converges when the rate update falls below [`TOLERANCE`]; fails with
/// [`CalcError::DerivativeVanished`] when NPV' degenerates and
/// [`CalcError::NotConverged`] at the iteration cap.
pub fn calculate_irr_from(cash_flows: &[f64], guess: f64) -> Result<f64, CalcError> {
    validate_cash_flows(cash_flows)?;

    let mut rate = guess;
    for iteration in 0..MAX_ITERATIONS {
        let npv = calculate_npv(cash_flows, rate);
        let dnpv = npv_derivative(cash_flows, rate);

        if dnpv.abs() < TOLERANCE {
            return Err(CalcError::DerivativeVanished {
                iterations: iteration,
            });
        }

        let new_rate = rate - npv / dnpv;
        if (new_rate - rate).abs() < TOLERANCE {
            return Ok(new_rate);
        }
        rate = new_rate;
    }

    Err(CalcError::NotConverged {
        iterations: MAX_ITERATIONS,
    })
}

/// Fractional years from the series' first date, actual/365
fn year_fractions(dates: &[NaiveDate]) -> Vec<f64> {
    let base = dates[0];
    dates
        .iter()
        .map(|d| (*d - base).num_days() as f64 / 365.0)
        .collect()
}

/// NPV over dated cash flows (workbook XNPV): time measured in actual days
/// from the first flow divided by 365
pub fn calculate_xnpv(
    cash_flows: &[f64],
    dates: &[NaiveDate],
    discount_rate: f64,
) -> Result<f64, CalcError> {
    if cash_flows.len() != dates.len() {
        return Err(CalcError::LengthMismatch {
            cash_flows: cash_flows.len(),
            dates: dates.len(),
        });
    }
    if cash_flows.is_empty() {
        return Ok(0.0);
    }

    let years = year_fractions(dates);
    Ok(cash_flows
        .iter()
        .zip(&years)
        .map(|(&cf, &t)| cf / (1.0 + discount_rate).powf(t))
        .sum())
}

/// Dated IRR with the default initial guess
pub fn calculate_xirr(cash_flows: &[f64], dates: &[NaiveDate]) -> Result<f64, CalcError> {
    calculate_xirr_from(cash_flows, dates, DEFAULT_GUESS)
}

/// Dated IRR (workbook XIRR) via Newton-Raphson; same preconditions and
/// failure modes as [`calculate_irr_from`], plus a length check on the
/// date array
pub fn calculate_xirr_from(
    cash_flows: &[f64],
    dates: &[NaiveDate],
    guess: f64,
) -> Result<f64, CalcError> {
    if cash_flows.len() != dates.len() {
        return Err(CalcError::LengthMismatch {
            cash_flows: cash_flows.len(),
            dates: dates.len(),
        });
    }
    validate_cash_flows(cash_flows)?;

    let years = year_fractions(dates);
    let mut rate = guess;

    for iteration in 0..MAX_ITERATIONS {
        let mut xnpv = 0.0;
        let mut dxnpv = 0.0;
        for (&cf, &t) in cash_flows.iter().zip(&years) {
            xnpv += cf / (1.0 + rate).powf(t);
            dxnpv -= t * cf / (1.0 + rate).powf(t + 1.0);
        }

        if dxnpv.abs() < TOLERANCE {
            return Err(CalcError::DerivativeVanished {
                iterations: iteration,
            });
        }

        let new_rate = rate - xnpv / dxnpv;
        if (new_rate - rate).abs() < TOLERANCE {
            return Ok(new_rate);
        }
        rate = new_rate;
    }

    Err(CalcError::NotConverged {
        iterations: MAX_ITERATIONS,
    })
}

/// Equity multiple: total inflows over total outflows
pub fn calculate_multiple(cash_flows: &[f64]) -> Result<f64, CalcError> {
    let total_inflows: f64 = cash_flows.iter().filter(|&&cf| cf > 0.0).sum();
    let total_outflows: f64 = cash_flows.iter().filter(|&&cf| cf < 0.0).sum::<f64>().abs();

    if total_outflows == 0.0 {
        return Err(CalcError::NoOutflows);
    }

    Ok(total_inflows / total_outflows)
}

/// Profit: plain sum of all flows
pub fn calculate_profit(cash_flows: &[f64]) -> f64 {
    cash_flows.iter().sum()
}

/// Exact compounding conversion: (1+r)^12 - 1
pub fn monthly_to_annual_irr(monthly_irr: f64) -> f64 {
    (1.0 + monthly_irr).powi(12) - 1.0
}

/// Exact compounding conversion: (1+r)^(1/12) - 1
pub fn annual_to_monthly_irr(annual_irr: f64) -> f64 {
    (1.0 + annual_irr).powf(1.0 / 12.0) - 1.0
}
