//! LP/GP distribution waterfall
//!
//! Allocates a leveraged cash-flow stream between the two equity parties
//! through fixed-priority tiers: accrued preferred return, return of
//! capital, then the promoted residual split. Tier order is the business
//! rule and must not be rearranged.

use chrono::NaiveDate;

use super::config::WaterfallConfig;
use super::distributions::DistributionRow;
use crate::util::round_cents;

/// Waterfall engine for one equity structure
pub struct WaterfallEngine {
    config: WaterfallConfig,
}

/// LP's pro-rata share of a tier pool. A zero pool falls back to the
/// static equity share instead of dividing by zero.
fn lp_pro_rata_share(lp_balance: f64, total_balance: f64, static_lp_share: f64) -> f64 {
    if total_balance > 0.0 {
        lp_balance / total_balance
    } else {
        static_lp_share
    }
}

impl WaterfallEngine {
    pub fn new(config: WaterfallConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WaterfallConfig {
        &self.config
    }

    /// Distribute each period's cash flow through the tiers.
    ///
    /// `cash_flows` and `dates` are aligned period series (period 0 is the
    /// investment month); `total_equity` seeds the unreturned-equity
    /// balances at each party's share. Preferred return accrues as simple
    /// interest on the original equity every period except period 0, or on
    /// equity plus the accrued unpaid balance when compounding is
    /// configured. Non-positive cash flows distribute nothing; the
    /// financing effects of a negative month are already netted into the
    /// leveraged series upstream, so drawing down balances here would
    /// double-count them.
    pub fn calculate_distributions(
        &self,
        cash_flows: &[f64],
        dates: &[NaiveDate],
        total_equity: f64,
    ) -> Vec<DistributionRow> {
        let config = &self.config;
        let lp_equity = total_equity * config.lp_share;
        let gp_equity = total_equity * config.gp_share;

        let mut lp_balance = lp_equity;
        let mut gp_balance = gp_equity;
        let mut lp_accrued = 0.0;
        let mut gp_accrued = 0.0;

        let monthly_pref_rate = config.pref_return / 12.0;
        let mut distributions = Vec::with_capacity(cash_flows.len());

        for (period, (&cash_flow, &date)) in cash_flows.iter().zip(dates).enumerate() {
            // No accrual on the investment month
            if period > 0 {
                if config.compound_monthly {
                    lp_accrued += (lp_equity + lp_accrued) * monthly_pref_rate;
                    gp_accrued += (gp_equity + gp_accrued) * monthly_pref_rate;
                } else {
                    lp_accrued += lp_equity * monthly_pref_rate;
                    gp_accrued += gp_equity * monthly_pref_rate;
                }
            }

            let mut lp_pref_paid = 0.0;
            let mut gp_pref_paid = 0.0;
            let mut lp_equity_paydown = 0.0;
            let mut gp_equity_paydown = 0.0;
            let mut lp_profit = 0.0;
            let mut gp_profit = 0.0;
            let mut gp_promote = 0.0;

            if cash_flow > 0.0 {
                let mut remaining = cash_flow;

                // 1. Outstanding preferred return, pro-rata to accrued
                // balances. An empty pool pays nothing and the share falls
                // back to the static split.
                let total_pref_owed = lp_accrued + gp_accrued;
                let pref_payment = remaining.min(total_pref_owed);
                let lp_share_of_pref =
                    lp_pro_rata_share(lp_accrued, total_pref_owed, config.lp_share);

                lp_pref_paid = pref_payment * lp_share_of_pref;
                gp_pref_paid = pref_payment - lp_pref_paid;
                lp_accrued -= lp_pref_paid;
                gp_accrued -= gp_pref_paid;
                remaining -= pref_payment;

                // 2. Return of capital, pro-rata to unreturned balances
                let total_equity_owed = lp_balance + gp_balance;
                if remaining > 0.0 {
                    let equity_payment = remaining.min(total_equity_owed);
                    let lp_share_of_equity =
                        lp_pro_rata_share(lp_balance, total_equity_owed, config.lp_share);

                    lp_equity_paydown = equity_payment * lp_share_of_equity;
                    gp_equity_paydown = equity_payment - lp_equity_paydown;
                    lp_balance -= lp_equity_paydown;
                    gp_balance -= gp_equity_paydown;
                    remaining -= equity_payment;
                }

                // 3. Residual profit at the final split; the promote is the
                // GP's incremental carry on top of its base share
                if remaining > 0.0 {
                    lp_profit = remaining * config.final_split.lp;
                    gp_profit = remaining * config.final_split.gp;
                    gp_promote = remaining * config.final_split.gp_promote;
                }
            }

            let total_to_lp = lp_equity_paydown + lp_pref_paid + lp_profit;
            let total_to_gp = gp_equity_paydown + gp_pref_paid + gp_profit + gp_promote;

            distributions.push(DistributionRow {
                period: period as u32,
                date,
                cash_flow: round_cents(cash_flow),
                lp_equity_paydown: round_cents(lp_equity_paydown),
                gp_equity_paydown: round_cents(gp_equity_paydown),
                lp_preferred_return: round_cents(lp_pref_paid),
                gp_preferred_return: round_cents(gp_pref_paid),
                lp_profit: round_cents(lp_profit),
                gp_profit: round_cents(gp_profit),
                gp_promote: round_cents(gp_promote),
                total_to_lp: round_cents(total_to_lp),
                total_to_gp: round_cents(total_to_gp),
                lp_equity_balance: round_cents(lp_balance.max(0.0)),
                gp_equity_balance: round_cents(gp_balance.max(0.0)),
                lp_pref_accrued: round_cents(lp_accrued.max(0.0)),
                gp_pref_accrued: round_cents(gp_accrued.max(0.0)),
            });
        }

        distributions
    }
}
