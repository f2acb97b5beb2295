//! Escalation factor conventions
//!
//! Growth factors for a 0-based month index under the three compounding
//! policies used by the reference workbook. Property taxes step on a
//! different anchor than other expenses, so the convention is selected per
//! expense category via [`EscalationMethod`].

use serde::{Deserialize, Serialize};

/// Compounding convention for an escalating revenue or expense line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EscalationMethod {
    /// Smooth monthly compounding: (1+r)^(period/12)
    #[default]
    ContinuousMonthly,
    /// Flat within each 12-month window starting at period 0; steps at
    /// months 12, 24, ...
    AnnualStep,
    /// Annual step anchored at the start of each year measured from
    /// period 1: flat through period 12, first step at period 13.
    /// Workbook row 4 behavior, preserved exactly.
    PropertyTaxAnnualStep,
}

impl EscalationMethod {
    /// Escalation factor for `period` under this convention
    pub fn factor(&self, annual_rate: f64, period: u32) -> f64 {
        match self {
            EscalationMethod::ContinuousMonthly => continuous_monthly_factor(annual_rate, period),
            EscalationMethod::AnnualStep => annual_step_factor(annual_rate, period),
            EscalationMethod::PropertyTaxAnnualStep => {
                property_tax_step_factor(annual_rate, period)
            }
        }
    }
}

/// Smooth monthly compounding: (1+r)^(period/12)
pub fn continuous_monthly_factor(annual_rate: f64, period: u32) -> f64 {
    (1.0 + annual_rate).powf(period as f64 / 12.0)
}

/// Annual step: (1+r)^floor(period/12)
///
/// Factor is 1.0 for periods 0-11, (1+r) for periods 12-23, and so on.
pub fn annual_step_factor(annual_rate: f64, period: u32) -> f64 {
    (1.0 + annual_rate).powi((period / 12) as i32)
}

/// Property-tax annual step: the step lands one month later than the
/// generic annual step. Workbook: =IF(AND(L$10>1,MOD(L$10-1,12)=0),K4*(1+$F4),K4)
///
/// Factor stays 1.0 through period 12 and becomes (1+r) at period 13.
pub fn property_tax_step_factor(annual_rate: f64, period: u32) -> f64 {
    if period == 0 {
        return 1.0;
    }
    (1.0 + annual_rate).powi(((period - 1) / 12) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_continuous_monthly() {
        assert_relative_eq!(continuous_monthly_factor(0.025, 0), 1.0);
        assert_relative_eq!(continuous_monthly_factor(0.025, 12), 1.025, epsilon = 1e-12);
        assert_relative_eq!(
            continuous_monthly_factor(0.025, 120),
            1.025f64.powi(10),
            epsilon = 1e-12
        );
        // Mid-year factor sits between the year boundaries
        let mid = continuous_monthly_factor(0.025, 6);
        assert!(mid > 1.0 && mid < 1.025);
    }

    #[test]
    fn test_annual_step_flat_within_year() {
        assert_eq!(annual_step_factor(0.03, 0), 1.0);
        assert_eq!(annual_step_factor(0.03, 6), 1.0);
        assert_eq!(annual_step_factor(0.03, 11), 1.0);
    }

    #[test]
    fn test_annual_step_boundary() {
        assert_relative_eq!(annual_step_factor(0.03, 12), 1.03, epsilon = 1e-12);
        assert_relative_eq!(annual_step_factor(0.03, 23), 1.03, epsilon = 1e-12);
        assert_relative_eq!(annual_step_factor(0.03, 24), 1.03f64.powi(2), epsilon = 1e-12);
    }

    #[test]
    fn test_property_tax_step_anchor() {
        // Flat through period 12, first step at period 13
        assert_eq!(property_tax_step_factor(0.025, 0), 1.0);
        assert_eq!(property_tax_step_factor(0.025, 1), 1.0);
        assert_eq!(property_tax_step_factor(0.025, 12), 1.0);
        assert_relative_eq!(property_tax_step_factor(0.025, 13), 1.025, epsilon = 1e-12);
        assert_relative_eq!(property_tax_step_factor(0.025, 24), 1.025, epsilon = 1e-12);
        assert_relative_eq!(property_tax_step_factor(0.025, 25), 1.025f64.powi(2), epsilon = 1e-12);
    }

    #[test]
    fn test_property_tax_step_year_10() {
        // 9 full steps by month 120
        assert_relative_eq!(
            property_tax_step_factor(0.025, 120),
            1.025f64.powi(9),
            epsilon = 1e-12
        );
        // Annual step is below continuous at the same horizon
        assert!(property_tax_step_factor(0.025, 120) < continuous_monthly_factor(0.025, 120));
    }

    #[test]
    fn test_method_dispatch() {
        assert_relative_eq!(
            EscalationMethod::ContinuousMonthly.factor(0.025, 12),
            1.025
        );
        assert_relative_eq!(EscalationMethod::AnnualStep.factor(0.025, 12), 1.025, epsilon = 1e-12);
        assert_relative_eq!(EscalationMethod::PropertyTaxAnnualStep.factor(0.025, 12), 1.0);
    }
}
