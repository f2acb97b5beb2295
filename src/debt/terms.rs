//! Loan terms for a financed acquisition

use serde::{Deserialize, Serialize};

use super::amortization::calculate_payment;

/// Financing terms for the deal. The loan funds at period 0 (net of the
/// origination fee) and is paid off at exit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Loan amount in $000s
    pub amount: f64,

    /// Annual interest rate
    pub interest_rate: f64,

    /// Interest-only period in months
    pub io_months: u32,

    /// Amortization period in years
    pub amortization_years: u32,

    /// Origination fee in $000s, netted from period-0 proceeds
    #[serde(default)]
    pub origination_fee: f64,

    /// Actual/365 day count for interest; false = simple monthly (rate/12)
    #[serde(default)]
    pub use_actual_365: bool,
}

impl LoanTerms {
    /// Amortization period in months
    pub fn amortization_months(&self) -> u32 {
        self.amortization_years * 12
    }

    /// Loan proceeds received at period 0, net of the origination fee
    pub fn net_proceeds(&self) -> f64 {
        self.amount - self.origination_fee
    }

    /// Level payment on the full original amortization term, in $000s
    pub fn level_payment(&self) -> f64 {
        calculate_payment(self.amount, self.interest_rate, self.amortization_months())
    }

    /// Interest for one period on the original loan amount, in $000s.
    ///
    /// Actual/365 scales by the actual days in the period; simple monthly
    /// uses rate/12 regardless of calendar length.
    pub fn periodic_interest(&self, days_in_period: i64) -> f64 {
        if self.use_actual_365 {
            self.amount * self.interest_rate / 365.0 * days_in_period as f64
        } else {
            self.amount * self.interest_rate / 12.0
        }
    }
}
