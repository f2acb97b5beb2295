//! Scenario input bundle for a deal projection

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;

use crate::assumptions::{ExpenseAssumptions, RevenueAssumptions};
use crate::debt::LoanTerms;
use crate::waterfall::WaterfallConfig;

/// Acquisition timing and cost
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquisitionTerms {
    /// Acquisition (period 0) date
    pub acquisition_date: NaiveDate,

    /// Hold period in months; the projection runs periods 0..=hold
    pub hold_period_months: u32,

    /// Purchase price in $000s
    pub purchase_price: f64,

    /// Closing costs in $000s
    pub closing_costs: f64,
}

impl AcquisitionTerms {
    /// Total cost recorded at period 0
    pub fn total_cost(&self) -> f64 {
        self.purchase_price + self.closing_costs
    }
}

/// Exit valuation terms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitTerms {
    /// Cap rate applied to forward 12-month NOI
    pub exit_cap_rate: f64,

    /// Sales costs as a fraction of gross exit value
    pub sales_cost_percent: f64,
}

/// Complete scenario configuration for one deal. This is the engine's
/// entire input surface: the calling layer validates and supplies it, the
/// engine only computes. Serializable so the surrounding system can pass
/// scenarios as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealTerms {
    pub acquisition: AcquisitionTerms,
    pub revenue: RevenueAssumptions,
    pub expenses: ExpenseAssumptions,
    pub exit: ExitTerms,

    /// Optional financing; absent means an all-cash deal
    #[serde(default)]
    pub financing: Option<LoanTerms>,

    /// Optional LP/GP waterfall on the leveraged cash flows
    #[serde(default)]
    pub waterfall: Option<WaterfallConfig>,
}

impl DealTerms {
    /// Load a scenario from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Parse a scenario from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, Box<dyn Error>> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_cost() {
        let acq = AcquisitionTerms {
            acquisition_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            hold_period_months: 120,
            purchase_price: 41_500.0,
            closing_costs: 500.0,
        };
        assert_eq!(acq.total_cost(), 42_000.0);
    }

    #[test]
    fn test_scenario_json_round_trip() {
        let json = r#"{
            "acquisition": {
                "acquisition_date": "2026-03-31",
                "hold_period_months": 120,
                "purchase_price": 41500.0,
                "closing_costs": 500.0
            },
            "revenue": {
                "total_sf": 9932.0,
                "in_place_rent_psf": 193.22,
                "rent_growth": 0.025,
                "vacancy_rate": 0.0,
                "nnn_lease": true
            },
            "expenses": {
                "fixed_opex_psf": 36.0,
                "management_fee_percent": 0.04,
                "property_tax_annual": 622.5,
                "capex_reserve_psf": 5.0,
                "expense_growth": 0.025,
                "property_tax_escalation": "property_tax_annual_step"
            },
            "exit": {
                "exit_cap_rate": 0.05,
                "sales_cost_percent": 0.01
            },
            "financing": {
                "amount": 16937.18,
                "interest_rate": 0.0525,
                "io_months": 120,
                "amortization_years": 30,
                "use_actual_365": true
            }
        }"#;

        let terms = DealTerms::from_json_str(json).unwrap();
        assert_eq!(terms.acquisition.hold_period_months, 120);
        assert!(terms.revenue.nnn_lease);
        assert!(terms.revenue.tenants.is_empty());
        assert!(terms.financing.as_ref().unwrap().use_actual_365);
        assert!(terms.waterfall.is_none());

        // Survives a serialize/deserialize cycle intact
        let serialized = serde_json::to_string(&terms).unwrap();
        let reparsed = DealTerms::from_json_str(&serialized).unwrap();
        assert_eq!(
            reparsed.acquisition.purchase_price,
            terms.acquisition.purchase_price
        );
    }
}
