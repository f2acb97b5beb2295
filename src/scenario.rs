//! Scenario runner for single-deal and batch projections
//!
//! Owns a base scenario configuration and turns it into the full result
//! bundle: monthly rows, deal-year aggregates, return metrics, and the
//! waterfall when one is configured. Runs are independent pure
//! computations, so batches parallelize trivially.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::metrics::ReturnMetrics;
use crate::projection::{AnnualCashflow, CashflowEngine, CashflowResult, DealTerms};
use crate::waterfall::{
    calculate_waterfall_summary, extract_gp_cash_flows, extract_lp_cash_flows, DistributionRow,
    WaterfallEngine, WaterfallSummary,
};

/// Waterfall output bundle: distribution rows, line-item totals, and the
/// per-party cash-flow series used for LP/GP metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterfallResult {
    pub lp_equity: f64,
    pub gp_equity: f64,
    pub distributions: Vec<DistributionRow>,
    pub summary: WaterfallSummary,
    pub lp_cash_flows: Vec<f64>,
    pub gp_cash_flows: Vec<f64>,
}

/// Complete result bundle for one scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealResult {
    pub monthly: CashflowResult,
    pub annual: Vec<AnnualCashflow>,
    pub metrics: ReturnMetrics,
    pub waterfall: Option<WaterfallResult>,
}

/// Pre-configured scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(terms);
/// let result = runner.run()?;
/// println!("unleveraged IRR: {:.2}%", result.metrics.unleveraged_irr * 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_terms: DealTerms,
}

impl ScenarioRunner {
    /// Create a runner with a base scenario
    pub fn new(base_terms: DealTerms) -> Self {
        Self { base_terms }
    }

    /// Load the base scenario from a JSON file
    pub fn from_json_file<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            base_terms: DealTerms::from_json_file(path)?,
        })
    }

    /// Get reference to the base scenario for inspection
    pub fn terms(&self) -> &DealTerms {
        &self.base_terms
    }

    /// Get mutable reference to the base scenario for customization
    pub fn terms_mut(&mut self) -> &mut DealTerms {
        &mut self.base_terms
    }

    /// Run the base scenario
    pub fn run(&self) -> Result<DealResult, CalcError> {
        Self::run_terms(&self.base_terms)
    }

    /// Run an ad-hoc scenario without replacing the base
    pub fn run_with(&self, terms: DealTerms) -> Result<DealResult, CalcError> {
        Self::run_terms(&terms)
    }

    /// Run many scenario variations in parallel. Each element carries its
    /// own outcome so one pathological configuration cannot sink the batch.
    pub fn run_batch(&self, scenarios: &[DealTerms]) -> Vec<Result<DealResult, CalcError>> {
        scenarios.par_iter().map(Self::run_terms).collect()
    }

    fn run_terms(terms: &DealTerms) -> Result<DealResult, CalcError> {
        let monthly = CashflowEngine::new(terms.clone()).project();
        let dates = monthly.dates();
        let unleveraged = monthly.unleveraged_series();

        let has_loan = terms
            .financing
            .as_ref()
            .map(|loan| loan.amount > 0.0)
            .unwrap_or(false);
        let leveraged = has_loan.then(|| monthly.leveraged_series());

        let waterfall = terms.waterfall.as_ref().map(|config| {
            // Equity is the cash the partners put in at close, i.e. the
            // period-0 leveraged outflow
            let total_equity = (-monthly.rows[0].leveraged_cash_flow).max(0.0);
            let lp_equity = total_equity * config.lp_share;
            let gp_equity = total_equity * config.gp_share;

            let distributions = WaterfallEngine::new(config.clone()).calculate_distributions(
                &monthly.leveraged_series(),
                &dates,
                total_equity,
            );
            let summary = calculate_waterfall_summary(&distributions);
            let lp_cash_flows = extract_lp_cash_flows(&distributions, lp_equity);
            let gp_cash_flows = extract_gp_cash_flows(&distributions, gp_equity);

            WaterfallResult {
                lp_equity,
                gp_equity,
                distributions,
                summary,
                lp_cash_flows,
                gp_cash_flows,
            }
        });

        let metrics = ReturnMetrics::calculate(
            &unleveraged,
            leveraged.as_deref(),
            waterfall.as_ref().map(|w| w.lp_cash_flows.as_slice()),
            waterfall.as_ref().map(|w| w.gp_cash_flows.as_slice()),
            &dates,
        )?;

        Ok(DealResult {
            annual: monthly.annualize(),
            monthly,
            metrics,
            waterfall,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::{ExpenseAssumptions, RevenueAssumptions};
    use crate::debt::LoanTerms;
    use crate::projection::{AcquisitionTerms, ExitTerms};
    use crate::waterfall::WaterfallConfig;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn full_terms() -> DealTerms {
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

    #[test]
    fn test_full_pipeline() {
        let runner = ScenarioRunner::new(full_terms());
        let result = runner.run().unwrap();

        assert_eq!(result.monthly.rows.len(), 61);
        assert_eq!(result.annual.len(), 6);
        assert!(result.metrics.unleveraged_irr > 0.0);
        assert!(result.metrics.leveraged_irr.is_some());

        let waterfall = result.waterfall.as_ref().unwrap();
        assert_relative_eq!(
            waterfall.lp_equity + waterfall.gp_equity,
            -result.monthly.rows[0].leveraged_cash_flow,
            epsilon = 0.01
        );
        // Party series start with the equity outflow
        assert!(waterfall.lp_cash_flows[0] < 0.0);
        assert!(waterfall.gp_cash_flows[0] < 0.0);
        assert!(result.metrics.lp_irr.is_some());
        assert!(result.metrics.gp_irr.is_some());
    }

    #[test]
    fn test_all_cash_deal_has_no_leveraged_metrics() {
        let mut terms = full_terms();
        terms.financing = None;
        terms.waterfall = None;
        let result = ScenarioRunner::new(terms).run().unwrap();
        assert!(result.metrics.leveraged_irr.is_none());
        assert!(result.metrics.lp_irr.is_none());
        assert!(result.waterfall.is_none());
    }

    #[test]
    fn test_distributions_conserve_cash() {
        let result = ScenarioRunner::new(full_terms()).run().unwrap();
        let waterfall = result.waterfall.unwrap();
        let positive_cash: f64 = result
            .monthly
            .rows
            .iter()
            .map(|r| r.leveraged_cash_flow.max(0.0))
            .sum();
        assert_relative_eq!(
            waterfall.summary.total_to_lp + waterfall.summary.total_to_gp,
            positive_cash,
            epsilon = 1.0
        );
    }

    #[test]
    fn test_run_batch_scenarios() {
        let runner = ScenarioRunner::new(full_terms());
        let scenarios: Vec<DealTerms> = [0.05, 0.06, 0.07]
            .iter()
            .map(|&cap| {
                let mut terms = full_terms();
                terms.exit.exit_cap_rate = cap;
                terms
            })
            .collect();

        let results = runner.run_batch(&scenarios);
        assert_eq!(results.len(), 3);
        let irrs: Vec<f64> = results
            .iter()
            .map(|r| r.as_ref().unwrap().metrics.unleveraged_irr)
            .collect();
        // A lower exit cap rate means a richer exit and a higher IRR
        assert!(irrs[0] > irrs[1]);
        assert!(irrs[1] > irrs[2]);
    }
}
