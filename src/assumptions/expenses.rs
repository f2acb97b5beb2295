//! Operating expense assumptions for a deal

use serde::{Deserialize, Serialize};

use super::EscalationMethod;

/// Operating expense assumptions. PSF rates are annual $/SF; the property
/// tax is an annual amount in $000s. Escalation conventions are selectable
/// per category because property taxes step on a different anchor than the
/// other expense lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseAssumptions {
    /// Fixed operating expenses ($/SF/year)
    pub fixed_opex_psf: f64,

    /// Management fee as a fraction of effective revenue
    pub management_fee_percent: f64,

    /// Annual property tax ($000s)
    pub property_tax_annual: f64,

    /// Capital expenditure reserve ($/SF/year)
    pub capex_reserve_psf: f64,

    /// Annual expense growth rate
    pub expense_growth: f64,

    /// Escalation convention for fixed opex and capex
    #[serde(default)]
    pub expense_escalation: EscalationMethod,

    /// Escalation convention for property taxes
    #[serde(default)]
    pub property_tax_escalation: EscalationMethod,

    /// Whether the capex reserve is charged in the acquisition month
    #[serde(default)]
    pub include_month0_capex: bool,
}

impl ExpenseAssumptions {
    /// Monthly fixed opex for a period in $000s (zero in the acquisition month)
    pub fn monthly_fixed_opex(&self, total_sf: f64, period: u32) -> f64 {
        if period == 0 {
            return 0.0;
        }
        let factor = self.expense_escalation.factor(self.expense_growth, period);
        total_sf * self.fixed_opex_psf * factor / 12.0 / 1000.0
    }

    /// Monthly property tax for a period in $000s (zero in the acquisition month)
    pub fn monthly_property_tax(&self, period: u32) -> f64 {
        if period == 0 {
            return 0.0;
        }
        let factor = self
            .property_tax_escalation
            .factor(self.expense_growth, period);
        self.property_tax_annual * factor / 12.0
    }

    /// Monthly capex reserve for a period in $000s. Month 0 is normally a
    /// pure acquisition month; `include_month0_capex` charges the reserve
    /// there as well, matching the reference workbook.
    pub fn monthly_capex(&self, total_sf: f64, period: u32) -> f64 {
        if period == 0 && !self.include_month0_capex {
            return 0.0;
        }
        let factor = self.expense_escalation.factor(self.expense_growth, period);
        total_sf * self.capex_reserve_psf * factor / 12.0 / 1000.0
    }
}
