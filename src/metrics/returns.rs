//! Return metric bundle for a projected deal

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::irr::{calculate_multiple, calculate_profit, calculate_xirr};
use crate::error::CalcError;

/// Return metrics for a deal. Unleveraged metrics are always present;
/// leveraged and LP/GP metrics exist only when financing / a waterfall is
/// configured, and an individual derived IRR is dropped (logged, not fatal)
/// when the solver fails to converge on that one series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnMetrics {
    pub unleveraged_irr: f64,
    pub unleveraged_multiple: f64,
    pub unleveraged_profit: f64,

    pub leveraged_irr: Option<f64>,
    pub leveraged_multiple: Option<f64>,
    pub leveraged_profit: Option<f64>,

    pub lp_irr: Option<f64>,
    pub lp_multiple: Option<f64>,
    pub gp_irr: Option<f64>,
    pub gp_multiple: Option<f64>,
}

/// XIRR that degrades to None on convergence failures. Invalid-input
/// errors still propagate: a malformed series is a bug upstream, a
/// pathological-but-valid one is an expected possibility.
fn xirr_or_suppress(
    cash_flows: &[f64],
    dates: &[NaiveDate],
    label: &str,
) -> Result<Option<f64>, CalcError> {
    match calculate_xirr(cash_flows, dates) {
        Ok(rate) => Ok(Some(rate)),
        Err(err) if err.is_convergence() => {
            log::warn!("{} IRR suppressed: {}", label, err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

impl ReturnMetrics {
    /// Assemble the metric bundle from the projected series. `leveraged`,
    /// `lp`, and `gp` are supplied only when financing / a waterfall is
    /// configured for the deal.
    pub fn calculate(
        unleveraged: &[f64],
        leveraged: Option<&[f64]>,
        lp: Option<&[f64]>,
        gp: Option<&[f64]>,
        dates: &[NaiveDate],
    ) -> Result<Self, CalcError> {
        let mut metrics = ReturnMetrics {
            unleveraged_irr: calculate_xirr(unleveraged, dates)?,
            unleveraged_multiple: calculate_multiple(unleveraged)?,
            unleveraged_profit: calculate_profit(unleveraged),
            leveraged_irr: None,
            leveraged_multiple: None,
            leveraged_profit: None,
            lp_irr: None,
            lp_multiple: None,
            gp_irr: None,
            gp_multiple: None,
        };

        if let Some(lev) = leveraged {
            metrics.leveraged_irr = xirr_or_suppress(lev, dates, "leveraged")?;
            metrics.leveraged_multiple = Some(calculate_multiple(lev)?);
            metrics.leveraged_profit = Some(calculate_profit(lev));
        }

        if let Some(lp_flows) = lp {
            metrics.lp_irr = xirr_or_suppress(lp_flows, dates, "LP")?;
            metrics.lp_multiple = Some(calculate_multiple(lp_flows)?);
        }

        if let Some(gp_flows) = gp {
            metrics.gp_irr = xirr_or_suppress(gp_flows, dates, "GP")?;
            metrics.gp_multiple = Some(calculate_multiple(gp_flows)?);
        }

        Ok(metrics)
    }
}
