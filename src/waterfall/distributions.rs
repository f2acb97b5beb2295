//! Waterfall distribution records and per-party extraction

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One period of waterfall distributions. Monetary fields are rounded to
/// cent precision at storage; the engine carries its running balances
/// unrounded and never mutates a record after pushing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionRow {
    pub period: u32,
    pub date: NaiveDate,

    /// Cash flow available for distribution this period
    pub cash_flow: f64,

    // Tier amounts
    pub lp_equity_paydown: f64,
    pub gp_equity_paydown: f64,
    pub lp_preferred_return: f64,
    pub gp_preferred_return: f64,
    pub lp_profit: f64,
    pub gp_profit: f64,
    pub gp_promote: f64,

    // Per-party totals (promote included in the GP total)
    pub total_to_lp: f64,
    pub total_to_gp: f64,

    // Running balances after this period's distributions
    pub lp_equity_balance: f64,
    pub gp_equity_balance: f64,
    pub lp_pref_accrued: f64,
    pub gp_pref_accrued: f64,
}

/// Line-item totals across a full distribution run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterfallSummary {
    pub total_to_lp: f64,
    pub total_to_gp: f64,
    pub total_equity_paydown: f64,
    pub total_preferred_return: f64,
    pub total_profit: f64,
    pub total_promote: f64,
}

/// Summarize distributions into per-line-item totals
pub fn calculate_waterfall_summary(distributions: &[DistributionRow]) -> WaterfallSummary {
    WaterfallSummary {
        total_to_lp: distributions.iter().map(|d| d.total_to_lp).sum(),
        total_to_gp: distributions.iter().map(|d| d.total_to_gp).sum(),
        total_equity_paydown: distributions
            .iter()
            .map(|d| d.lp_equity_paydown + d.gp_equity_paydown)
            .sum(),
        total_preferred_return: distributions
            .iter()
            .map(|d| d.lp_preferred_return + d.gp_preferred_return)
            .sum(),
        total_profit: distributions.iter().map(|d| d.lp_profit + d.gp_profit).sum(),
        total_promote: distributions.iter().map(|d| d.gp_promote).sum(),
    }
}

/// LP cash-flow series for IRR: equity out at period 0, distributions in
pub fn extract_lp_cash_flows(distributions: &[DistributionRow], lp_equity: f64) -> Vec<f64> {
    distributions
        .iter()
        .enumerate()
        .map(|(i, dist)| {
            if i == 0 {
                -lp_equity + dist.total_to_lp
            } else {
                dist.total_to_lp
            }
        })
        .collect()
}

/// GP cash-flow series for IRR: equity out at period 0, distributions in
pub fn extract_gp_cash_flows(distributions: &[DistributionRow], gp_equity: f64) -> Vec<f64> {
    distributions
        .iter()
        .enumerate()
        .map(|(i, dist)| {
            if i == 0 {
                -gp_equity + dist.total_to_gp
            } else {
                dist.total_to_gp
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn row(period: u32, to_lp: f64, to_gp: f64) -> DistributionRow {
        DistributionRow {
            period,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            cash_flow: to_lp + to_gp,
            lp_equity_paydown: 0.0,
            gp_equity_paydown: 0.0,
            lp_preferred_return: 0.0,
            gp_preferred_return: 0.0,
            lp_profit: to_lp,
            gp_profit: to_gp,
            gp_promote: 0.0,
            total_to_lp: to_lp,
            total_to_gp: to_gp,
            lp_equity_balance: 0.0,
            gp_equity_balance: 0.0,
            lp_pref_accrued: 0.0,
            gp_pref_accrued: 0.0,
        }
    }

    #[test]
    fn test_extract_lp_cash_flows() {
        let rows = vec![row(0, 5.0, 1.0), row(1, 10.0, 2.0), row(2, 100.0, 20.0)];
        let lp = extract_lp_cash_flows(&rows, 90.0);
        assert_relative_eq!(lp[0], -85.0);
        assert_relative_eq!(lp[1], 10.0);
        assert_relative_eq!(lp[2], 100.0);
    }

    #[test]
    fn test_extract_gp_cash_flows() {
        let rows = vec![row(0, 5.0, 1.0), row(1, 10.0, 2.0), row(2, 100.0, 20.0)];
        let gp = extract_gp_cash_flows(&rows, 10.0);
        assert_relative_eq!(gp[0], -9.0);
        assert_relative_eq!(gp[1], 2.0);
        assert_relative_eq!(gp[2], 20.0);
    }

    #[test]
    fn test_summary_totals() {
        let rows = vec![row(0, 90.0, 10.0), row(1, 90.0, 10.0)];
        let summary = calculate_waterfall_summary(&rows);
        assert_relative_eq!(summary.total_to_lp, 180.0);
        assert_relative_eq!(summary.total_to_gp, 20.0);
        assert_relative_eq!(summary.total_profit, 200.0);
        assert_relative_eq!(summary.total_promote, 0.0);
    }
}
